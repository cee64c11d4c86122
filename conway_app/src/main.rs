// main.rs - Desktop front end for Conway's Game of Life

use std::path::{Path, PathBuf};

use conway::GameConfig;
use eframe::egui;

mod ui;

use ui::ConwayApp;

const DEFAULT_CONFIG_FILE: &str = "conway.toml";

/// First CLI argument, else `conway.toml` if present, else built-in defaults.
fn load_config() -> GameConfig {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| Path::new(DEFAULT_CONFIG_FILE).exists().then(|| PathBuf::from(DEFAULT_CONFIG_FILE)));

    match path.map(GameConfig::load) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("{err}; using defaults");
            GameConfig::default()
        }
        None => GameConfig::default(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let runtime = tokio::runtime::Runtime::new()?;
    let app = ConwayApp::new(runtime, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| {
            app.repaint_on_tick(cc.egui_ctx.clone());
            Box::new(app)
        }),
    )?;
    Ok(())
}
