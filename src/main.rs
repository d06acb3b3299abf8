#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use clap::Parser;
use eframe::NativeOptions;

use indicadores::config::DATA;
use indicadores::ui::config::UI_TEXT;
use indicadores::{Cli, run_app, run_pipeline};

fn main() -> eframe::Result {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);
    let data_path = args.data_path();

    // C. Data Loading (Blocking). A load failure is fatal before the window opens.
    let initial = match run_pipeline(&data_path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("Failed to load {}: {:#}", data_path.display(), e);
            if args.data.is_none() {
                log::error!(
                    "Expected {} in the working directory (or pass --data <PATH>)",
                    DATA.default_path
                );
            }
            std::process::exit(1);
        }
    };

    // D. Run Native App
    eframe::run_native(
        UI_TEXT.app_title,
        NativeOptions::default(),
        Box::new(move |cc| Ok(run_app(cc, data_path, initial))),
    )
}
