use audio::{AudioLifecycle, AudioManager, TrackEvent};
use bracket_lib::prelude::{BEvent, BTerm, VirtualKeyCode, INPUT};
use clock::TimerQueue;
use common::{GameResult, Millis};

use crate::config::GameConfig;
use crate::input::{InputConfig, InputSampler};
use crate::types::GameTimer;
use crate::{render, Interaction, IslandWorld};

/// Outermost game phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Intro,
    Playing,
    Credits,
}

/// Owns the island, its timers and the backing track.
pub struct FlipFlopApp {
    state: GameState,
    world: IslandWorld,
    timers: TimerQueue<GameTimer>,
    audio: AudioManager,
    input: InputSampler,
    palette: ui::ColorPalette,
    frame_carry_ms: f32,
}

impl FlipFlopApp {
    /// Builds the app in [`GameState::Intro`] with the audio attached.
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        let mut audio = AudioManager::new(config.audio);
        audio.attach()?;
        let palette = if config.colorblind {
            ui::ColorPalette::colorblind()
        } else {
            ui::ColorPalette::default()
        };
        Ok(Self {
            state: GameState::Intro,
            world: IslandWorld::new(config),
            timers: TimerQueue::new(),
            audio,
            input: InputSampler::new(InputConfig::from_bindings(&config.input)?),
            palette,
            frame_carry_ms: 0.0,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn world(&self) -> &IslandWorld {
        &self.world
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    /// Current simulated time.
    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    /// Number of timers still scheduled.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Returns `true` once [`FlipFlopApp::teardown`] ran.
    pub fn is_torn_down(&self) -> bool {
        self.audio.lifecycle() == AudioLifecycle::Disposed
    }

    fn enter_playing(&mut self) {
        self.state = GameState::Playing;
        self.world.begin_play(&mut self.timers);
    }

    fn leave_playing(&mut self, next: GameState) {
        self.world.end_play(&mut self.timers);
        self.state = next;
    }

    /// Intro -> Playing.
    pub fn start(&mut self) -> GameResult<bool> {
        if self.state != GameState::Intro || self.is_torn_down() {
            tracing::debug!(state = ?self.state, "start ignored");
            return Ok(false);
        }
        self.audio.play()?;
        self.enter_playing();
        tracing::info!("game started");
        Ok(true)
    }

    /// Playing -> Credits, raised when the backing track ends.
    pub fn track_ended(&mut self) -> GameResult<bool> {
        if self.state != GameState::Playing || self.is_torn_down() {
            return Ok(false);
        }
        self.leave_playing(GameState::Credits);
        self.audio.pause()?;
        tracing::info!(
            sold = self.world.inventory().total_sold(),
            rewards = self.world.rewards().len(),
            "credits"
        );
        Ok(true)
    }

    /// Credits -> Playing, replaying the track from the start.
    pub fn continue_playing(&mut self) -> GameResult<bool> {
        if self.state != GameState::Credits || self.is_torn_down() {
            tracing::debug!(state = ?self.state, "continue ignored");
            return Ok(false);
        }
        self.audio.restart()?;
        self.enter_playing();
        tracing::info!("playing again");
        Ok(true)
    }

    /// Cancels every timer and releases the audio. The app is inert afterwards.
    pub fn teardown(&mut self) {
        self.world.end_play(&mut self.timers);
        self.audio.dispose();
        tracing::info!("torn down");
    }

    /// Advances timers and the backing track by `elapsed` milliseconds.
    ///
    /// Timers only fire up to the end of the track; once it ends the game
    /// leaves play before the clock moves on.
    pub fn advance(&mut self, elapsed: Millis) -> GameResult<()> {
        let now = self.timers.now();
        let target = now + elapsed;
        let horizon = match self.audio.remaining() {
            Some(left) => target.min(now + left),
            None => target,
        };
        while let Some(fired) = self.timers.pop_due(horizon) {
            self.world.dispatch(&mut self.timers, fired);
        }
        self.timers.settle(horizon);
        if let Some(TrackEvent::Ended) = self.audio.advance(elapsed) {
            self.track_ended()?;
        }
        self.timers.settle(target);
        Ok(())
    }

    /// Runs one simulation frame. Only does anything while playing.
    pub fn frame(&mut self, input: &common::InputState) -> Option<Interaction> {
        if self.state != GameState::Playing || self.is_torn_down() {
            return None;
        }
        self.world.frame(input, &mut self.timers)
    }

    fn read_keys(&mut self) {
        let mut input = INPUT.lock();
        let sampler = &mut self.input;
        input.for_each_message(|event| match event {
            BEvent::KeyboardInput { key, pressed, .. } => {
                if pressed {
                    sampler.key_down(key);
                } else {
                    sampler.key_up(key);
                }
            }
            BEvent::Focused { focused: false } => sampler.release_all(),
            _ => {}
        });
    }

    fn frame_elapsed(&mut self, frame_time_ms: f32) -> Millis {
        self.frame_carry_ms += frame_time_ms.max(0.0);
        let whole = self.frame_carry_ms.floor();
        self.frame_carry_ms -= whole;
        whole as Millis
    }

    /// Handles menu keys. Returns `true` when the player quits.
    fn update_state(&mut self, key: Option<VirtualKeyCode>) -> GameResult<bool> {
        use VirtualKeyCode::*;
        match (self.state, key) {
            (_, Some(Q)) | (_, Some(Escape)) => return Ok(true),
            (GameState::Intro, Some(Return)) => {
                self.start()?;
            }
            (GameState::Credits, Some(Return)) => {
                self.continue_playing()?;
            }
            _ => {}
        }
        Ok(false)
    }
}

impl bracket_lib::prelude::GameState for FlipFlopApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        self.read_keys();
        let quit = match self.update_state(ctx.key) {
            Ok(q) => q,
            Err(e) => {
                tracing::error!("lifecycle error: {}", e);
                true
            }
        };
        if quit {
            self.teardown();
            ctx.quit();
            return;
        }
        let elapsed = self.frame_elapsed(ctx.frame_time_ms);
        if let Err(e) = self.advance(elapsed) {
            tracing::error!("advance failed: {}", e);
        }
        let sample = self.input.sample();
        self.frame(&sample);
        match self.state {
            GameState::Intro => ui::draw_intro(ctx),
            GameState::Playing => render::draw_world(ctx, &self.world, &self.palette),
            GameState::Credits => ui::draw_credits(
                ctx,
                self.world.inventory().total_sold(),
                self.world.rewards().len(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boat::BoatState;
    use common::{GameError, InputState};

    fn app() -> FlipFlopApp {
        let config = GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        };
        FlipFlopApp::new(&config).expect("app")
    }

    fn press() -> InputState {
        InputState {
            interact: true,
            ..InputState::default()
        }
    }

    #[test]
    fn starts_in_intro() {
        let app = app();
        assert_eq!(app.state(), GameState::Intro);
        assert_eq!(app.pending_timers(), 0);
        assert!(!app.audio().is_playing());
    }

    #[test]
    fn enter_from_intro_starts_game() {
        let mut app = app();
        assert!(!app.update_state(Some(VirtualKeyCode::Return)).unwrap());
        assert_eq!(app.state(), GameState::Playing);
        assert!(app.audio().is_playing());
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        assert!(app.update_state(Some(VirtualKeyCode::Q)).unwrap());
    }

    #[test]
    fn commands_in_wrong_state_are_ignored() {
        let mut app = app();
        assert!(!app.continue_playing().unwrap());
        assert!(!app.track_ended().unwrap());
        assert_eq!(app.state(), GameState::Intro);
        assert!(app.start().unwrap());
        assert!(!app.start().unwrap());
        assert!(!app.continue_playing().unwrap());
    }

    #[test]
    fn frames_only_run_while_playing() {
        let mut app = app();
        let down = InputState {
            down: true,
            ..InputState::default()
        };
        app.frame(&down);
        assert_eq!(app.world().player().position, common::Vec3::on_ground(0.0, 0.0));
        app.start().unwrap();
        app.frame(&down);
        assert!(app.world().player().position.x > 0.0);
    }

    #[test]
    fn boat_timeline_from_session_start() {
        let mut app = app();
        app.start().unwrap();
        let checkpoints = [
            (0, BoatState::Gone),
            (4_999, BoatState::Gone),
            (5_000, BoatState::Arriving),
            (7_999, BoatState::Arriving),
            (8_000, BoatState::Docked),
            (14_999, BoatState::Docked),
            (15_000, BoatState::Leaving),
            (17_999, BoatState::Leaving),
            (18_000, BoatState::Gone),
            (37_999, BoatState::Gone),
            (38_000, BoatState::Arriving),
        ];
        for (t, expected) in checkpoints {
            app.advance(t - app.now()).unwrap();
            assert_eq!(app.world().boat_state(), expected, "at {}ms", t);
        }
    }

    #[test]
    fn track_end_rolls_credits_and_cancels_timers() {
        let mut app = app();
        app.start().unwrap();
        app.world.place_player(3.0, 1.5);
        app.frame(&press());
        assert!(app.world().player().is_fishing());
        app.advance(9_000).unwrap();
        let carried = app.world().inventory().carried();
        let boat = app.world().boat_state();
        assert!(app.track_ended().unwrap());
        assert_eq!(app.state(), GameState::Credits);
        assert_eq!(app.pending_timers(), 0);
        assert!(!app.audio().is_playing());
        for _ in 0..10 {
            app.advance(33_000).unwrap();
        }
        assert_eq!(app.world().inventory().carried(), carried);
        assert_eq!(app.world().boat_state(), boat);
        assert!(!app.world().player().is_fishing());
    }

    #[test]
    fn backing_track_end_triggers_credits() {
        let config = GameConfig {
            seed: Some(5),
            audio: audio::AudioConfig {
                track_length_ms: 20_000,
            },
            ..GameConfig::default()
        };
        let mut app = FlipFlopApp::new(&config).unwrap();
        app.start().unwrap();
        app.advance(19_999).unwrap();
        assert_eq!(app.state(), GameState::Playing);
        app.advance(1).unwrap();
        assert_eq!(app.state(), GameState::Credits);
        assert_eq!(app.pending_timers(), 0);
    }

    #[test]
    fn audio_failure_keeps_intro() {
        let mut app = app();
        app.audio = AudioManager::default();
        assert!(matches!(app.start(), Err(GameError::AudioUnavailable(_))));
        assert_eq!(app.state(), GameState::Intro);
        assert_eq!(app.pending_timers(), 0);
        assert_eq!(app.world().boat_state(), BoatState::Gone);
    }

    #[test]
    fn long_step_across_track_end_stops_timers_at_the_end() {
        let config = GameConfig {
            seed: Some(5),
            audio: audio::AudioConfig {
                track_length_ms: 20_000,
            },
            ..GameConfig::default()
        };
        let mut app = FlipFlopApp::new(&config).unwrap();
        app.start().unwrap();
        app.world.place_player(3.0, 1.5);
        app.frame(&press());
        app.advance(40_000).unwrap();
        assert_eq!(app.state(), GameState::Credits);
        assert_eq!(app.world().boat_state(), BoatState::Gone);
        // Ticks at 4500, 9000, 13500 and 18000 only.
        assert_eq!(app.world().inventory().carried(), 4);
        assert_eq!(app.pending_timers(), 0);
        assert_eq!(app.now(), 40_000);
    }

    #[test]
    fn continue_keeps_inventory_and_restarts_track() {
        let mut app = app();
        app.start().unwrap();
        app.advance(8_000).unwrap();
        app.world.set_inventory(2, 3);
        app.world.place_player(4.2, 1.5);
        assert!(matches!(app.frame(&press()), Some(Interaction::Sold(_))));
        app.world.set_inventory(1, 0);
        app.advance(1_000).unwrap();
        app.track_ended().unwrap();

        assert!(app.continue_playing().unwrap());
        assert_eq!(app.state(), GameState::Playing);
        assert_eq!(app.audio().position(), 0);
        assert!(app.audio().is_playing());
        assert_eq!(app.world().rewards().len(), 1);
        assert_eq!(app.world().inventory().carried(), 1);
        assert!(!app.world().player().is_fishing());
        assert_eq!(app.world().boat_state(), BoatState::Gone);
        let resumed = app.now();
        app.advance(4_999).unwrap();
        assert_eq!(app.world().boat_state(), BoatState::Gone);
        app.advance(1).unwrap();
        assert_eq!(app.world().boat_state(), BoatState::Arriving);
        assert_eq!(app.now(), resumed + 5_000);
    }

    #[test]
    fn teardown_mid_game_leaves_state_frozen() {
        let mut app = app();
        app.start().unwrap();
        app.world.place_player(3.0, 1.5);
        app.frame(&press());
        app.advance(6_000).unwrap();
        let carried = app.world().inventory().carried();
        app.teardown();
        assert_eq!(app.pending_timers(), 0);
        for _ in 0..20 {
            app.advance(4_500).unwrap();
        }
        assert_eq!(app.world().inventory().carried(), carried);
        assert_eq!(app.world().boat_state(), BoatState::Arriving);
        assert!(app.is_torn_down());
        let before = app.world().player().position;
        let moved = app.frame(&InputState {
            down: true,
            ..InputState::default()
        });
        assert!(moved.is_none());
        assert_eq!(app.world().player().position, before);
        assert!(!app.track_ended().unwrap());
        assert_eq!(app.state(), GameState::Playing);
        assert_eq!(app.pending_timers(), 0);
    }

    #[test]
    fn frame_elapsed_carries_fractions() {
        let mut app = app();
        let total: Millis = (0..3).map(|_| app.frame_elapsed(16.7)).sum();
        assert_eq!(total, 50);
    }
}
