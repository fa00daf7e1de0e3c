//! Dark/light visuals and the accent palette

use eframe::egui::{self, Color32};

use checkpoints_common::Theme;

/// Accent colors shared by cards, the status line and the fullscreen
/// viewer.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub info: Color32,
    pub warn: Color32,
    pub best: Color32,
    pub worst: Color32,
    pub drag: Color32,
    pub neutral_fill: Color32,
    pub positive_fill: Color32,
    pub negative_fill: Color32,
}

pub fn apply(ctx: &egui::Context, theme: Theme) {
    match theme {
        Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
        Theme::Light => ctx.set_visuals(egui::Visuals::light()),
    }
}

pub fn palette(theme: Theme) -> Palette {
    // Accents from the original stylesheet; only the criterion button
    // fills differ between themes.
    let base = Palette {
        info: Color32::from_rgb(0x21, 0x96, 0xF3),
        warn: Color32::from_rgb(0xFF, 0xC1, 0x07),
        best: Color32::from_rgb(0x4C, 0xAF, 0x50),
        worst: Color32::from_rgb(0xC6, 0x28, 0x28),
        drag: Color32::from_rgb(0x21, 0x96, 0xF3),
        neutral_fill: Color32::from_rgb(0x3A, 0x3A, 0x3A),
        positive_fill: Color32::from_rgb(0x2D, 0x50, 0x16),
        negative_fill: Color32::from_rgb(0x5C, 0x1A, 0x1A),
    };
    match theme {
        Theme::Dark => base,
        Theme::Light => Palette {
            neutral_fill: Color32::from_gray(220),
            positive_fill: Color32::from_rgb(0xA5, 0xD6, 0xA7),
            negative_fill: Color32::from_rgb(0xEF, 0x9A, 0x9A),
            ..base
        },
    }
}
