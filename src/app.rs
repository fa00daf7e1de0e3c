//! Application state and the main update loop

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use chrono::{DateTime, Local};
use eframe::egui::{self, RichText};

use checkpoints_common::{
    checkpoints, Card, CardId, Criterion, Grid, ImportMode, Language, Marker, Score, Settings,
    TextKey, Theme,
};

use crate::fullscreen::{FullscreenAction, FullscreenView};
use crate::theme::{self, Palette};
use crate::thumbs::{ImageStore, LoadKind};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];
const MAX_TABS: usize = 26;
const CARD_MIN_SIZE: f32 = 210.0;
const CARD_MAX_SIZE: f32 = 600.0;
const STATUS_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Info,
    Warning,
}

/// One line of feedback per tab: a transient message shown for a few
/// seconds over a persistent summary ("12 images").
#[derive(Debug, Default)]
pub struct StatusLine {
    message: String,
    kind: StatusKind,
    expires: Option<Instant>,
    persistent: String,
}

impl StatusLine {
    pub fn log(&mut self, message: impl Into<String>) {
        self.set(message, StatusKind::Info);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.set(message, StatusKind::Warning);
    }

    fn set(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.message = message.into();
        self.kind = kind;
        self.expires = Some(Instant::now() + STATUS_DURATION);
    }

    pub fn set_persistent(&mut self, text: impl Into<String>) {
        self.persistent = text.into();
    }

    pub fn clear_persistent(&mut self) {
        self.persistent.clear();
    }

    pub fn current(&self) -> Option<(&str, StatusKind)> {
        if let Some(expires) = self.expires {
            if Instant::now() < expires {
                return Some((&self.message, self.kind));
            }
        }
        if self.persistent.is_empty() {
            None
        } else {
            Some((&self.persistent, StatusKind::Info))
        }
    }

    pub fn time_to_expiry(&self) -> Option<Duration> {
        let expires = self.expires?;
        expires.checked_duration_since(Instant::now())
    }
}

/// One grid tab: the grid itself plus per-tab UI state.
pub struct TabState {
    pub name: String,
    pub grid: Grid,
    pub card_size: f32,
    pub pending_size: f32,
    pub status: StatusLine,
    pub drag_source: Option<CardId>,
}

impl TabState {
    fn new(name: String) -> Self {
        Self {
            name,
            grid: Grid::new(),
            card_size: CARD_MIN_SIZE,
            pending_size: CARD_MIN_SIZE,
            status: StatusLine::default(),
            drag_source: None,
        }
    }
}

/// Deferred card interactions, applied after the render pass so the card
/// sequence is never mutated while it is being drawn.
enum CardAction {
    Remove(CardId),
    Toggle(CardId, Criterion),
    OpenFullscreen(usize),
    ShowDetails(CardId),
    DragStart(CardId),
    DropOn(CardId),
}

#[derive(Debug, Clone, Copy)]
struct DetailsPopup {
    tab: usize,
    card: CardId,
}

pub struct GalleryApp {
    settings: Settings,
    tabs: Vec<TabState>,
    active: usize,
    images: ImageStore,
    fullscreen: Option<FullscreenView>,
    details: Option<DetailsPopup>,
    options_open: bool,
}

impl GalleryApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        theme::apply(&cc.egui_ctx, settings.theme);
        Self {
            settings,
            tabs: vec![TabState::new("A".to_string())],
            active: 0,
            images: ImageStore::new(),
            fullscreen: None,
            details: None,
            options_open: false,
        }
    }

    fn text(&self, key: TextKey) -> &'static str {
        self.settings.language.text(key)
    }

    // -------------------------------------------------------------
    // Tabs
    // -------------------------------------------------------------

    fn add_tab(&mut self) {
        if self.tabs.len() >= MAX_TABS {
            return;
        }
        let letter = (b'A' + self.tabs.len() as u8) as char;
        self.tabs.push(TabState::new(letter.to_string()));
        self.active = self.tabs.len() - 1;
    }

    fn remove_all_tabs(&mut self) {
        self.tabs.clear();
        self.active = 0;
        self.details = None;
        self.add_tab();
    }

    fn close_active_tab(&mut self) {
        if self.tabs.len() > 1 {
            self.tabs.remove(self.active);
            if self.active >= self.tabs.len() {
                self.active = self.tabs.len() - 1;
            }
            if self.tabs.len() == 1 {
                self.tabs[0].name = "A".to_string();
            }
            self.details = None;
        } else {
            self.tabs[0].status.warn("Can't delete the first tab");
        }
    }

    // -------------------------------------------------------------
    // File intake
    // -------------------------------------------------------------

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        let paths: Vec<PathBuf> = dropped.into_iter().filter_map(|f| f.path).collect();
        if !paths.is_empty() {
            self.route_paths(paths);
        }
    }

    fn pick_files(&mut self) {
        let files = rfd::FileDialog::new()
            .add_filter("Images and JSON", &["png", "jpg", "jpeg", "webp", "json"])
            .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
            .add_filter("JSON", &["json"])
            .pick_files();
        if let Some(paths) = files {
            self.route_paths(paths);
        }
    }

    /// Splits a selection into images and grid files. A JSON grid wins
    /// over images in the same drop; only the first of several JSONs is
    /// imported.
    fn route_paths(&mut self, paths: Vec<PathBuf>) {
        let mut image_paths = Vec::new();
        let mut json_paths = Vec::new();
        for path in paths {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase());
            match ext.as_deref() {
                Some("json") => json_paths.push(path),
                Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => image_paths.push(path),
                _ => {}
            }
        }

        if let Some(first) = json_paths.first().cloned() {
            if json_paths.len() > 1 {
                self.tabs[self.active]
                    .status
                    .warn("Multiple JSON files detected. Importing only the first one.");
            }
            self.import_from_file(&first);
        } else if !image_paths.is_empty() {
            self.load_images(image_paths);
        }
    }

    fn load_images(&mut self, paths: Vec<PathBuf>) {
        let tab = &mut self.tabs[self.active];
        let report = tab.grid.add_images(&paths);
        let total = tab.grid.len();

        if report.added > 0 {
            tab.status.log(format!("Loaded {} new images", report.added));
            tab.status.set_persistent(format!("{total} images"));
        }
        if report.duplicates > 0 {
            tab.status
                .log(format!("Skipped {} duplicate(s)", report.duplicates));
        }
        if report.added == 0 && report.duplicates == 0 {
            tab.status.log("No images to load");
        }
    }

    // -------------------------------------------------------------
    // Import / export
    // -------------------------------------------------------------

    fn import_dialog(&mut self) {
        let file = rfd::FileDialog::new()
            .set_title(self.text(TextKey::DialogImportTitle))
            .add_filter("JSON", &["json"])
            .pick_file();
        if let Some(path) = file {
            self.import_from_file(&path);
        }
    }

    fn import_from_file(&mut self, path: &Path) {
        let mode = self.settings.import_mode;
        let imported_label = self.text(TextKey::MsgImported);
        let tab = &mut self.tabs[self.active];

        match tab.grid.import_file(path, mode) {
            Ok(report) => {
                let total = tab.grid.len();
                let mut message = match mode {
                    ImportMode::Add => {
                        format!("{imported_label}: +{} images (total: {total})", report.added)
                    }
                    ImportMode::Replace => format!("{imported_label}: {total} images"),
                };
                if report.missing > 0 {
                    message.push_str(&format!(" ({} missing files skipped)", report.missing));
                }
                if report.duplicates > 0 {
                    message.push_str(&format!(" ({} duplicates skipped)", report.duplicates));
                }
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                tab.status.log(message);
                tab.status.set_persistent(format!("{file_name} - {total} images"));
            }
            Err(err) => tab.status.warn(format!("Import error: {err}")),
        }
    }

    fn export_grid(&mut self) {
        let no_images = self.text(TextKey::MsgNoImages);
        let exported = self.text(TextKey::MsgExported);
        let title = self.text(TextKey::DialogExportTitle);
        let tab = &mut self.tabs[self.active];

        if tab.grid.is_empty() {
            tab.status.log(no_images);
            return;
        }

        let timestamp = Local::now().format("%Y%m%d-%H%M%S");
        let default_name = format!("grid-{}_{timestamp}.json", tab.name);
        let Some(path) = rfd::FileDialog::new()
            .set_title(title)
            .set_file_name(&default_name)
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };

        match tab.grid.export_file(&path) {
            Ok(()) => tab.status.log(exported),
            Err(err) => {
                log::error!("export to {} failed: {err}", path.display());
                tab.status.warn(format!("Export failed: {err}"));
            }
        }
    }

    // -------------------------------------------------------------
    // Checkpoint lists
    // -------------------------------------------------------------

    fn load_checkpoints_txt(&mut self) {
        let file = rfd::FileDialog::new()
            .add_filter("Text", &["txt"])
            .pick_file();
        let Some(path) = file else {
            return;
        };

        let tab = &mut self.tabs[self.active];
        match checkpoints::load_list(&path) {
            Ok(names) => {
                let count = names.len();
                let updated = tab.grid.relabel(names);
                tab.status.log(format!("Loaded {count} checkpoints from txt"));
                if updated > 0 {
                    tab.status.log(format!("Updated {updated} card name(s)"));
                }
            }
            Err(err) => tab.status.warn(format!("Error loading txt: {err}")),
        }
    }

    fn scan_checkpoints_folder(&mut self) {
        let title = self.text(TextKey::DialogSelectFolder);
        let Some(folder) = rfd::FileDialog::new().set_title(title).pick_folder() else {
            return;
        };

        let tab = &mut self.tabs[self.active];
        match checkpoints::scan_folder(&folder) {
            Ok(outcome) if outcome.names.is_empty() => {
                tab.status.log("No checkpoints found");
            }
            Ok(outcome) => {
                let count = outcome.names.len();
                let list_path = outcome
                    .list_path
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                let updated = tab.grid.relabel(outcome.names);
                tab.status
                    .log(format!("Loaded {count} checkpoints, saved to {list_path}"));
                if updated > 0 {
                    tab.status.log(format!("Updated {updated} card name(s)"));
                }
            }
            Err(err) => tab.status.warn(format!("Error scanning folder: {err}")),
        }
    }

    // -------------------------------------------------------------
    // Grid mutations
    // -------------------------------------------------------------

    fn clear_grid(&mut self) {
        let cleared = self.text(TextKey::MsgCleared);
        let tab = &mut self.tabs[self.active];
        tab.grid.clear();
        tab.status.clear_persistent();
        tab.status.log(cleared);
    }

    fn remove_card(&mut self, id: CardId) {
        let tab = &mut self.tabs[self.active];
        tab.grid.remove(id);
        if tab.grid.is_empty() {
            tab.status.clear_persistent();
        } else {
            tab.status.set_persistent(format!("{} images", tab.grid.len()));
        }
        if self.details.map_or(false, |d| d.card == id) {
            self.details = None;
        }
    }

    fn apply_card_actions(&mut self, ctx: &egui::Context, actions: Vec<CardAction>) {
        for action in actions {
            match action {
                CardAction::Remove(id) => self.remove_card(id),
                CardAction::Toggle(id, criterion) => {
                    self.tabs[self.active].grid.toggle(id, criterion);
                }
                CardAction::OpenFullscreen(index) => {
                    self.fullscreen = Some(FullscreenView::open(self.active, index));
                    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
                }
                CardAction::ShowDetails(id) => {
                    self.details = Some(DetailsPopup {
                        tab: self.active,
                        card: id,
                    });
                }
                CardAction::DragStart(id) => {
                    self.tabs[self.active].drag_source = Some(id);
                }
                CardAction::DropOn(target) => {
                    if let Some(source) = self.tabs[self.active].drag_source.take() {
                        self.tabs[self.active].grid.reorder(source, target);
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------
    // UI pieces
    // -------------------------------------------------------------

    fn tab_bar_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut selected = None;
            for (i, tab) in self.tabs.iter().enumerate() {
                if ui.selectable_label(i == self.active, &tab.name).clicked() {
                    selected = Some(i);
                }
            }
            if let Some(i) = selected {
                self.active = i;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("-").clicked() {
                    self.remove_all_tabs();
                }
                let can_add = self.tabs.len() < MAX_TABS;
                if ui.add_enabled(can_add, egui::Button::new("+")).clicked() {
                    self.add_tab();
                }
            });
        });
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        ui.horizontal(|ui| {
            if ui.button("×").clicked() {
                self.close_active_tab();
            }
            if ui.button(self.text(TextKey::BtnOptions)).clicked() {
                self.options_open = true;
            }
            if ui.button(self.text(TextKey::BtnSelectFolder)).clicked() {
                self.scan_checkpoints_folder();
            }
            if ui.button("Checkpoints.txt").clicked() {
                self.load_checkpoints_txt();
            }
            if ui.button(self.text(TextKey::BtnExport)).clicked() {
                self.export_grid();
            }
            if ui.button(self.text(TextKey::BtnImport)).clicked() {
                self.import_dialog();
            }
            if ui.button(self.text(TextKey::BtnClear)).clicked() {
                self.clear_grid();
            }
        });

        let slider_label = self.text(TextKey::SliderLabel);
        ui.horizontal(|ui| {
            ui.label(RichText::new("ℹ️ Info :").strong());
            if let Some((message, kind)) = self.tabs[self.active].status.current() {
                let color = match kind {
                    StatusKind::Info => palette.info,
                    StatusKind::Warning => palette.warn,
                };
                ui.label(RichText::new(message).color(color).strong());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let tab = &mut self.tabs[self.active];
                let response = ui.add(
                    egui::Slider::new(&mut tab.pending_size, CARD_MIN_SIZE..=CARD_MAX_SIZE)
                        .show_value(false),
                );
                // Applied on release, like the original slider.
                if response.drag_stopped() {
                    tab.card_size = tab.pending_size;
                }
                ui.label(format!("{slider_label}:"));
            });
        });
    }

    fn drop_zone_ui(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        let text = self.text(TextKey::DropZoneText);
        let hovering_files = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());

        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), 44.0),
            egui::Sense::click(),
        );
        let stroke = if hovering_files {
            egui::Stroke::new(2.0, palette.drag)
        } else {
            egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color)
        };
        ui.painter()
            .rect(rect, egui::Rounding::same(8.0), ui.visuals().faint_bg_color, stroke);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(14.0),
            ui.visuals().text_color(),
        );

        if response.clicked() {
            self.pick_files();
        }
    }

    fn cards_ui(&mut self, ctx: &egui::Context, palette: &Palette) {
        let mut actions: Vec<CardAction> = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            let tab = &self.tabs[self.active];
            let markers = tab.grid.classify();
            let card_size = tab.card_size;
            let drag_source = tab.drag_source;
            let images = &mut self.images;

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(10.0, 10.0);
                        for (index, card) in tab.grid.cards().iter().enumerate() {
                            let marker = markers.get(index).copied().unwrap_or(Marker::None);
                            card_ui(
                                ui,
                                card,
                                index,
                                marker,
                                card_size,
                                drag_source,
                                palette,
                                images,
                                &mut actions,
                            );
                        }
                    });
                });
        });

        self.apply_card_actions(ctx, actions);
        if ctx.input(|i| i.pointer.any_released()) {
            self.tabs[self.active].drag_source = None;
        }
    }

    fn options_window_ui(&mut self, ctx: &egui::Context) {
        if !self.options_open {
            return;
        }
        let before = self.settings;
        let language = self.settings.language;
        let mut open = true;

        egui::Window::new(language.text(TextKey::OptionsTitle))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.group(|ui| {
                    ui.label(RichText::new(language.text(TextKey::OptionsLanguage)).strong());
                    ui.horizontal(|ui| {
                        ui.radio_value(&mut self.settings.language, Language::Fr, "Français");
                        ui.radio_value(&mut self.settings.language, Language::En, "English");
                    });
                });
                ui.group(|ui| {
                    ui.label(RichText::new(language.text(TextKey::OptionsTheme)).strong());
                    ui.horizontal(|ui| {
                        ui.radio_value(
                            &mut self.settings.theme,
                            Theme::Dark,
                            language.text(TextKey::OptionsThemeDark),
                        );
                        ui.radio_value(
                            &mut self.settings.theme,
                            Theme::Light,
                            language.text(TextKey::OptionsThemeLight),
                        );
                    });
                });
                ui.group(|ui| {
                    ui.label(RichText::new(language.text(TextKey::OptionsImportMode)).strong());
                    ui.horizontal(|ui| {
                        ui.radio_value(
                            &mut self.settings.import_mode,
                            ImportMode::Add,
                            language.text(TextKey::OptionsImportAdd),
                        );
                        ui.radio_value(
                            &mut self.settings.import_mode,
                            ImportMode::Replace,
                            language.text(TextKey::OptionsImportReplace),
                        );
                    });
                });
                if ui.button(language.text(TextKey::OptionsClose)).clicked() {
                    self.options_open = false;
                }
            });

        if !open {
            self.options_open = false;
        }

        if self.settings != before {
            theme::apply(ctx, self.settings.theme);
            if self.settings.language != before.language {
                ctx.send_viewport_cmd(egui::ViewportCommand::Title(
                    self.text(TextKey::WindowTitle).to_string(),
                ));
            }
            if let Err(err) = self.settings.save() {
                log::warn!("failed to save settings: {err}");
            }
        }
    }

    fn details_window_ui(&mut self, ctx: &egui::Context) {
        let Some(popup) = self.details else {
            return;
        };
        let card = self
            .tabs
            .get(popup.tab)
            .and_then(|tab| tab.grid.card(popup.card));
        let Some(card) = card else {
            self.details = None;
            return;
        };

        let mut open = true;
        egui::Window::new("Details")
            .id(egui::Id::new(("card_details", popup.card)))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("card_details_grid")
                    .num_columns(2)
                    .spacing(egui::vec2(12.0, 6.0))
                    .show(ui, |ui| {
                        for (label, value) in card_details(card) {
                            ui.label(RichText::new(label).strong());
                            ui.label(value);
                            ui.end_row();
                        }
                    });
            });

        if !open {
            self.details = None;
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.images.poll(ctx);
        if self.images.loading() {
            ctx.request_repaint();
        }

        let palette = theme::palette(self.settings.theme);

        if let Some(view) = self.fullscreen.as_mut() {
            let action = view.show(
                ctx,
                &self.tabs,
                &mut self.images,
                self.settings.language,
                &palette,
            );
            if action == FullscreenAction::Close {
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
                self.images.drop_full();
                self.fullscreen = None;
            }
            return;
        }

        self.handle_dropped_files(ctx);
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len().saturating_sub(1);
        }

        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            self.tab_bar_ui(ui);
        });
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls_ui(ui, &palette);
            self.drop_zone_ui(ui, &palette);
            ui.add_space(4.0);
        });

        self.cards_ui(ctx, &palette);
        self.options_window_ui(ctx);
        self.details_window_ui(ctx);

        if let Some(remaining) = self.tabs[self.active].status.time_to_expiry() {
            ctx.request_repaint_after(remaining);
        }
    }
}

// -------------------------------------------------------------
// Card rendering
// -------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn card_ui(
    ui: &mut egui::Ui,
    card: &Card,
    index: usize,
    marker: Marker,
    size: f32,
    drag_source: Option<CardId>,
    palette: &Palette,
    images: &mut ImageStore,
    actions: &mut Vec<CardAction>,
) {
    let stroke_color = match marker {
        Marker::Best => palette.best,
        Marker::Worst => palette.worst,
        Marker::None => ui.visuals().widgets.noninteractive.bg_stroke.color,
    };
    let frame = egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .rounding(egui::Rounding::same(12.0))
        .inner_margin(egui::Margin::same(6.0));

    let inner = frame.show(ui, |ui| {
        ui.set_width(size);

        ui.horizontal(|ui| {
            if ui.button("×").clicked() {
                actions.push(CardAction::Remove(card.id()));
            }
            ui.add(
                egui::Label::new(RichText::new(card.checkpoint_name()).strong()).truncate(true),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(card.total().to_string()).strong().size(16.0));
            });
        });

        let path = card.path().to_string_lossy().into_owned();
        let thumb_size = egui::vec2(size, size);
        if let Some(texture) = images.thumb(&path).cloned() {
            let response = ui.add(
                egui::Image::new(&texture)
                    .fit_to_exact_size(thumb_size)
                    .sense(egui::Sense::click()),
            );
            if response.clicked() {
                actions.push(CardAction::OpenFullscreen(index));
            }
        } else {
            let placeholder = if images.failed(&path) {
                "No image"
            } else {
                images.request(&path, LoadKind::Thumb);
                "Loading..."
            };
            ui.allocate_ui_with_layout(
                thumb_size,
                egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                |ui| {
                    ui.label(placeholder);
                },
            );
        }

        ui.horizontal_wrapped(|ui| {
            for criterion in Criterion::ALL {
                let fill = match card.criteria().get(criterion) {
                    Score::Neutral => palette.neutral_fill,
                    Score::Positive => palette.positive_fill,
                    Score::Negative => palette.negative_fill,
                };
                let button = egui::Button::new(RichText::new(criterion.label()).size(12.0))
                    .fill(fill)
                    .min_size(egui::vec2(0.0, 26.0));
                if ui.add(button).clicked() {
                    actions.push(CardAction::Toggle(card.id(), criterion));
                }
            }
        });
    });

    let response = inner.response.interact(egui::Sense::click_and_drag());
    if response.drag_started() {
        actions.push(CardAction::DragStart(card.id()));
    }

    response.context_menu(|ui| {
        if ui.button("Details").clicked() {
            actions.push(CardAction::ShowDetails(card.id()));
            ui.close_menu();
        }
        if ui.button("Copy Path").clicked() {
            ui.output_mut(|o| o.copied_text = card.path().to_string_lossy().into_owned());
            ui.close_menu();
        }
    });

    // Drop target highlight while another card is being dragged over.
    if let Some(source) = drag_source {
        if source != card.id() && ui.rect_contains_pointer(response.rect) {
            ui.painter().rect_stroke(
                response.rect,
                egui::Rounding::same(12.0),
                egui::Stroke::new(3.0, palette.drag),
            );
            if ui.input(|i| i.pointer.any_released()) {
                actions.push(CardAction::DropOn(card.id()));
            }
        }
    }
}

fn card_details(card: &Card) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Checkpoint", card.checkpoint_name().to_string()),
        ("Filename", card.file_name().to_string()),
    ];
    match file_facts(card.path()) {
        Ok((file_size, modified)) => {
            rows.push(("Size", file_size));
            rows.push(("Modified", modified));
        }
        Err(err) => {
            log::debug!("{err:#}");
            rows.push(("Size", "Unknown".to_string()));
            rows.push(("Modified", "Unknown".to_string()));
        }
    }
    if let Some(source) = card.source_json() {
        rows.push(("Source JSON", source.to_string()));
    }
    rows
}

fn file_facts(path: &Path) -> anyhow::Result<(String, String)> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("read metadata for {}", path.display()))?;
    let modified: DateTime<Local> = metadata.modified()?.into();
    Ok((
        format_file_size(metadata.len()),
        modified.format("%Y-%m-%d %H:%M:%S").to_string(),
    ))
}

fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size_units() {
        assert_eq!(format_file_size(512), "512.0 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
    }
}
