mod app;
mod term;

use std::path::Path;

use gridsnake::GameConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Log to stderr so output does not fight the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load(Path::new("gridsnake.toml"))?;
    let mut app = app::App::new(config)?;
    app.run()
}
