//! Fullscreen viewer with side-by-side comparison
//!
//! Shows one card's image fullscreen; picking another tab in the combo
//! overlays that tab's card at the matching index behind a draggable
//! split line.

use eframe::egui::{self, Color32, Pos2, Rect, RichText, Stroke};

use checkpoints_common::{Card, Language, TextKey};

use crate::app::TabState;
use crate::theme::Palette;
use crate::thumbs::{ImageStore, LoadKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenAction {
    None,
    Close,
}

pub struct FullscreenView {
    tab: usize,
    index: usize,
    compare_tab: Option<usize>,
    compare_index: usize,
    split: f32,
}

impl FullscreenView {
    pub fn open(tab: usize, index: usize) -> Self {
        Self {
            tab,
            index,
            compare_tab: None,
            compare_index: 0,
            split: 0.5,
        }
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        tabs: &[TabState],
        images: &mut ImageStore,
        language: Language,
        palette: &Palette,
    ) -> FullscreenAction {
        let Some(tab) = tabs.get(self.tab) else {
            return FullscreenAction::Close;
        };
        if tab.grid.is_empty() {
            return FullscreenAction::Close;
        }
        self.index = self.index.min(tab.grid.len() - 1);

        let mut action = FullscreenAction::None;
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            action = FullscreenAction::Close;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) && self.index > 0 {
            self.index -= 1;
            self.sync_compare(tabs);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) && self.index + 1 < tab.grid.len()
        {
            self.index += 1;
            self.sync_compare(tabs);
        }

        let card = &tab.grid.cards()[self.index];
        let compare_card = self.compare_card(tabs);

        let frame = egui::Frame::none()
            .fill(Color32::from_rgb(30, 30, 30))
            .inner_margin(egui::Margin::same(8.0));
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("✕ ESC").clicked() {
                    action = FullscreenAction::Close;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.compare_combo(ui, tabs);
                    ui.label(
                        RichText::new(language.text(TextKey::FullscreenCompare))
                            .color(Color32::from_gray(200)),
                    );
                });
            });

            let info_height = 26.0;
            let image_size =
                egui::vec2(ui.available_width(), ui.available_height() - info_height);
            let (rect, response) =
                ui.allocate_exact_size(image_size, egui::Sense::click_and_drag());
            self.paint_images(ui, rect, &response, card, compare_card, images, palette);

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(info_line(card)).color(Color32::from_gray(220)),
                );
                if let Some(other) = compare_card {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(info_line(other)).color(Color32::from_gray(220)),
                        );
                    });
                }
            });
        });

        action
    }

    fn compare_card<'a>(&self, tabs: &'a [TabState]) -> Option<&'a Card> {
        let tab = tabs.get(self.compare_tab?)?;
        tab.grid.cards().get(self.compare_index)
    }

    /// Keeps the comparison side on the card at the matching index,
    /// clamped to the other grid's length.
    fn sync_compare(&mut self, tabs: &[TabState]) {
        if let Some(compare) = self.compare_tab {
            let len = tabs.get(compare).map_or(0, |t| t.grid.len());
            if len == 0 {
                self.compare_tab = None;
            } else {
                self.compare_index = self.index.min(len - 1);
            }
        }
    }

    fn compare_combo(&mut self, ui: &mut egui::Ui, tabs: &[TabState]) {
        let selected_text = match self.compare_tab {
            Some(i) => tabs.get(i).map(|t| t.name.clone()).unwrap_or_default(),
            None => tabs
                .get(self.tab)
                .map(|t| format!("{} (current)", t.name))
                .unwrap_or_default(),
        };

        egui::ComboBox::from_id_source("fullscreen_compare_grid")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for (i, tab) in tabs.iter().enumerate() {
                    let label = if i == self.tab {
                        format!("{} (current)", tab.name)
                    } else {
                        tab.name.clone()
                    };
                    let selected = if i == self.tab {
                        self.compare_tab.is_none()
                    } else {
                        self.compare_tab == Some(i)
                    };
                    if ui.selectable_label(selected, label).clicked() {
                        if i == self.tab || tab.grid.is_empty() {
                            self.compare_tab = None;
                        } else {
                            self.compare_tab = Some(i);
                            // The original starts the comparison on the
                            // other grid's first card.
                            self.compare_index = 0;
                            self.split = 0.5;
                        }
                    }
                }
            });
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_images(
        &mut self,
        ui: &egui::Ui,
        rect: Rect,
        response: &egui::Response,
        card: &Card,
        compare_card: Option<&Card>,
        images: &mut ImageStore,
        palette: &Palette,
    ) {
        let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
        let painter = ui.painter().with_clip_rect(rect);

        let main_path = card.path().to_string_lossy().into_owned();
        images.request(&main_path, LoadKind::Full);
        let Some(main_tex) = images.full(&main_path).cloned() else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Loading...",
                egui::FontId::proportional(18.0),
                Color32::from_gray(200),
            );
            return;
        };

        let compare_tex = compare_card.and_then(|other| {
            let path = other.path().to_string_lossy().into_owned();
            images.request(&path, LoadKind::Full);
            images.full(&path).cloned()
        });

        let Some(compare_tex) = compare_tex else {
            // Single image, centered and fit to the available area.
            let scaled = fit(main_tex.size_vec2(), rect.size());
            let image_rect = Rect::from_center_size(rect.center(), scaled);
            painter.image(main_tex.id(), image_rect, uv, Color32::WHITE);
            return;
        };

        let main_scaled = fit(main_tex.size_vec2(), rect.size());
        let compare_scaled = fit(compare_tex.size_vec2(), rect.size());
        let display = egui::vec2(
            main_scaled.x.min(compare_scaled.x),
            main_scaled.y.min(compare_scaled.y),
        );
        let origin = rect.center() - display / 2.0;
        let display_rect = Rect::from_min_size(origin, display);

        if response.dragged() || response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.split = ((pos.x - origin.x) / display.x).clamp(0.0, 1.0);
            }
        }
        let split_x = origin.x + display.x * self.split;

        // Both images are anchored so the split line cuts each at the same
        // relative position, then clipped to their half.
        let left_clip =
            Rect::from_min_max(display_rect.min, Pos2::new(split_x, display_rect.max.y));
        painter.with_clip_rect(left_clip).image(
            main_tex.id(),
            Rect::from_min_size(origin, main_scaled),
            uv,
            Color32::WHITE,
        );

        let compare_origin = Pos2::new(split_x - compare_scaled.x * self.split, origin.y);
        let right_clip =
            Rect::from_min_max(Pos2::new(split_x, display_rect.min.y), display_rect.max);
        painter.with_clip_rect(right_clip).image(
            compare_tex.id(),
            Rect::from_min_size(compare_origin, compare_scaled),
            uv,
            Color32::WHITE,
        );

        painter.line_segment(
            [
                Pos2::new(split_x, display_rect.min.y),
                Pos2::new(split_x, display_rect.max.y),
            ],
            Stroke::new(3.0, Color32::WHITE),
        );
        let handle = Pos2::new(split_x, display_rect.center().y);
        painter.circle_filled(handle, 15.0, palette.drag);
        painter.line_segment(
            [handle - egui::vec2(8.0, 0.0), handle + egui::vec2(8.0, 0.0)],
            Stroke::new(2.0, Color32::WHITE),
        );
    }
}

fn info_line(card: &Card) -> String {
    format!("{} - {}", card.checkpoint_name(), card.file_name())
}

/// Scales `size` to fit inside `bounds`, preserving aspect ratio.
fn fit(size: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (bounds.x / size.x).min(bounds.y / size.y);
    size * scale
}
