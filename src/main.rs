#![windows_subsystem = "windows"]

use anyhow::Result;
use jetton_burner::{config::Config, gui};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Environment first; the GUI applies the saved network on top
    let config = Config::from_env();
    gui::launch(config)?;

    Ok(())
}
