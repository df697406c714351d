//! Binary entry point for the Helios orrery.
//!
//! Loads configuration, initializes logging, builds the solar-system
//! scene, and runs the window loop until closed.
//!
//! Run with: `cargo run -p helios-app`

use clap::Parser;
use tracing::{error, info};

use helios_config::{CliArgs, Config};
use helios_scene::{Scene, solar_system};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(Config::default_dir);
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config from {}: {err}", config_dir.display());
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    helios_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    info!("Helios orrery");
    info!(
        "Window: {}x{} | Title: {}",
        config.window.width, config.window.height, config.window.title
    );
    info!("Textures: {}", config.assets.texture_dir.display());

    // A failed build displays nothing: there is no partial-scene fallback.
    let scene = match Scene::build(&solar_system()) {
        Ok(scene) => scene,
        Err(err) => {
            error!("Scene construction failed: {err}");
            std::process::exit(1);
        }
    };
    info!(
        "Scene: {} bodies, {} orbit guides, camera distance {}..{}",
        scene.bodies().len(),
        scene.guides().len(),
        scene.camera_limits().min_distance,
        scene.camera_limits().max_distance,
    );

    helios_app::window::run(config, scene);
}
