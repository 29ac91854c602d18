// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::{IconData, ViewportBuilder};
use nickboard::{
    config::{Config, state::{AppState, GuiState}},
    gui, log, store,
};

fn app_icon() -> Option<IconData> {
    let rgba = image::load_from_memory(include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/nickboard.png"
    )))
    .ok()?
    .to_rgba8();
    let (w, h) = rgba.dimensions();
    Some(IconData { rgba: rgba.into_raw(), width: w, height: h })
}

fn main() {
    let options = match Config::load(None) {
        Ok(cfg) => cfg.into_options(),
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = log::init_file(&options.dashboard.log_file) {
        eprintln!("File logging disabled: {e}");
    }

    let master = options.merge.master_path();
    let table = match store::load_master_if_present(&master) {
        Ok(t) => t,
        Err(e) => {
            nickboard::loge!("Startup: {}", e);
            eprintln!("Failed to read master table: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState { options, gui: GuiState::default() };

    let mut viewport = ViewportBuilder::default()
        .with_inner_size([state.gui.window_w as f32, state.gui.window_h as f32]);
    if let Some(icon) = app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let native = eframe::NativeOptions { viewport, ..Default::default() };

    if let Err(e) = gui::run(native, state, table) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
