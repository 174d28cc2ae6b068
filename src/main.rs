use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so the terminal view stays clean.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("flipflop=info,game_core=info,boat=info,fishing=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = game_core::run() {
        tracing::error!("game error: {}", e);
        eprintln!("Game error: {}", e);
    }
}
