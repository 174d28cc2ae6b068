use bracket_lib::prelude::VirtualKeyCode;
use common::{GameError, GameResult, InputState};
use serde::Deserialize;

/// Key names for each action, as written in the config file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub interact: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn names(keys: &[&str]) -> Vec<String> {
            keys.iter().map(|k| k.to_string()).collect()
        }
        Self {
            up: names(&["w", "up"]),
            down: names(&["s", "down"]),
            left: names(&["a", "left"]),
            right: names(&["d", "right"]),
            interact: names(&["space"]),
        }
    }
}

/// Configuration for keyboard controls.
#[derive(Clone, Debug, PartialEq)]
pub struct InputConfig {
    pub up: Vec<VirtualKeyCode>,
    pub down: Vec<VirtualKeyCode>,
    pub left: Vec<VirtualKeyCode>,
    pub right: Vec<VirtualKeyCode>,
    pub interact: Vec<VirtualKeyCode>,
}

impl Default for InputConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            up: vec![W, Up],
            down: vec![S, Down],
            left: vec![A, Left],
            right: vec![D, Right],
            interact: vec![Space],
        }
    }
}

impl InputConfig {
    /// Resolves key names into key codes.
    pub fn from_bindings(bindings: &KeyBindings) -> GameResult<Self> {
        fn keys(action: &str, names: &[String]) -> GameResult<Vec<VirtualKeyCode>> {
            names
                .iter()
                .map(|n| {
                    parse_key(n).ok_or_else(|| {
                        GameError::Config(format!("unknown key '{}' for {}", n, action))
                    })
                })
                .collect()
        }
        Ok(Self {
            up: keys("up", &bindings.up)?,
            down: keys("down", &bindings.down)?,
            left: keys("left", &bindings.left)?,
            right: keys("right", &bindings.right)?,
            interact: keys("interact", &bindings.interact)?,
        })
    }
}

fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    match name.to_ascii_lowercase().as_str() {
        "left" => Some(Left),
        "right" => Some(Right),
        "up" => Some(Up),
        "down" => Some(Down),
        "w" => Some(W),
        "a" => Some(A),
        "s" => Some(S),
        "d" => Some(D),
        "h" => Some(H),
        "j" => Some(J),
        "k" => Some(K),
        "l" => Some(L),
        "e" => Some(E),
        "f" => Some(F),
        "space" => Some(Space),
        "return" | "enter" => Some(Return),
        _ => None,
    }
}

/// Folds raw key events into one [`InputState`] per frame.
///
/// Direction flags mirror the keys currently held. `interact` is raised once
/// for every frame in which at least one fresh press happened.
#[derive(Debug, Default)]
pub struct InputSampler {
    config: InputConfig,
    held: Vec<VirtualKeyCode>,
    interact_pressed: bool,
}

impl InputSampler {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            held: Vec::new(),
            interact_pressed: false,
        }
    }

    /// Records a key going down. Auto-repeat of a held key is ignored.
    pub fn key_down(&mut self, key: VirtualKeyCode) {
        if self.held.contains(&key) {
            return;
        }
        self.held.push(key);
        if self.config.interact.contains(&key) {
            self.interact_pressed = true;
        }
    }

    /// Records a key going up.
    pub fn key_up(&mut self, key: VirtualKeyCode) {
        self.held.retain(|k| *k != key);
    }

    /// Forgets every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.interact_pressed = false;
    }

    fn any_held(&self, keys: &[VirtualKeyCode]) -> bool {
        keys.iter().any(|k| self.held.contains(k))
    }

    /// Builds this frame's input and consumes the pending interact edge.
    pub fn sample(&mut self) -> InputState {
        let state = InputState {
            up: self.any_held(&self.config.up),
            down: self.any_held(&self.config.down),
            left: self.any_held(&self.config.left),
            right: self.any_held(&self.config.right),
            interact: self.interact_pressed,
        };
        self.interact_pressed = false;
        state
    }
}
