mod app;
mod fullscreen;
mod theme;
mod thumbs;

use eframe::egui;

use app::GalleryApp;
use checkpoints_common::{Settings, TextKey};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let settings = Settings::load().unwrap_or_else(|err| {
        log::warn!("failed to load settings, using defaults: {err}");
        Settings::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    let title = settings.language.text(TextKey::WindowTitle).to_string();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Box::new(GalleryApp::new(cc, settings))),
    )
}
