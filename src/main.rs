mod app;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use mood_galaxy::GalaxyConfig;

use app::{GalaxyApp, Startup};

/// Mood Galaxy - browse a mood journal as a field of stars
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Entry snapshot: a JSON file or an http(s) URL
    #[arg(long, value_name = "PATH|URL")]
    entries: Option<String>,

    /// Galaxy settings (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of generated sample entries when no snapshot is given
    #[arg(long, value_name = "N", default_value_t = 120)]
    demo: usize,

    /// Start with this mood filter active
    #[arg(long, value_name = "MOOD")]
    filter: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match GalaxyConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GalaxyConfig::default(),
    };

    let startup = Startup {
        config,
        entries: cli.entries,
        demo: cli.demo,
        filter: cli.filter,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "Mood Galaxy",
        options,
        Box::new(move |cc| Ok(Box::new(GalaxyApp::new(cc, startup)))),
    ) {
        log::error!("viewer exited with error: {e}");
        std::process::exit(1);
    }
}
