//! Background image decoding and texture upload
//!
//! Decoding happens on short-lived worker threads; results travel over an
//! mpsc channel and are uploaded as egui textures once per frame on the UI
//! thread.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui;
use image::ImageReader;

// Card thumbnails are decoded at the slider maximum and scaled down on
// screen, so slider changes never re-decode.
const THUMB_MAX: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadKind {
    Thumb,
    Full,
}

struct LoadedImage {
    path: String,
    kind: LoadKind,
    size: [usize; 2],
    pixels: Vec<u8>,
}

pub struct ImageStore {
    thumbs: HashMap<String, egui::TextureHandle>,
    fulls: HashMap<String, egui::TextureHandle>,
    failed: HashSet<String>,
    inflight: HashSet<(String, LoadKind)>,
    rx: Receiver<LoadedImage>,
    tx: Sender<LoadedImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            thumbs: HashMap::new(),
            fulls: HashMap::new(),
            failed: HashSet::new(),
            inflight: HashSet::new(),
            rx,
            tx,
        }
    }

    pub fn thumb(&self, path: &str) -> Option<&egui::TextureHandle> {
        self.thumbs.get(path)
    }

    pub fn full(&self, path: &str) -> Option<&egui::TextureHandle> {
        self.fulls.get(path)
    }

    pub fn failed(&self, path: &str) -> bool {
        self.failed.contains(path)
    }

    /// Kicks off a decode unless the image is already loaded, loading or
    /// known bad.
    pub fn request(&mut self, path: &str, kind: LoadKind) {
        if path.is_empty() || self.failed.contains(path) {
            return;
        }
        let loaded = match kind {
            LoadKind::Thumb => self.thumbs.contains_key(path),
            LoadKind::Full => self.fulls.contains_key(path),
        };
        if loaded || self.inflight.contains(&(path.to_string(), kind)) {
            return;
        }

        self.inflight.insert((path.to_string(), kind));
        let sender = self.tx.clone();
        let path_owned = path.to_string();

        std::thread::spawn(move || {
            let decoded = ImageReader::open(&path_owned)
                .ok()
                .and_then(|reader| reader.decode().ok());
            let message = match decoded {
                Some(image) => {
                    let image = match kind {
                        LoadKind::Thumb => image.thumbnail(THUMB_MAX, THUMB_MAX),
                        LoadKind::Full => image,
                    };
                    let size = [image.width() as usize, image.height() as usize];
                    LoadedImage {
                        path: path_owned,
                        kind,
                        size,
                        pixels: image.to_rgba8().into_raw(),
                    }
                }
                None => LoadedImage {
                    path: path_owned,
                    kind,
                    size: [0, 0],
                    pixels: Vec::new(),
                },
            };
            let _ = sender.send(message);
        });
    }

    /// Drains finished decodes and uploads them as textures.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(message) = self.rx.try_recv() {
            self.inflight.remove(&(message.path.clone(), message.kind));
            if message.size[0] == 0 || message.size[1] == 0 {
                self.failed.insert(message.path);
                continue;
            }
            let color_image =
                egui::ColorImage::from_rgba_unmultiplied(message.size, &message.pixels);
            let name = match message.kind {
                LoadKind::Thumb => format!("thumb:{}", message.path),
                LoadKind::Full => format!("full:{}", message.path),
            };
            let texture = ctx.load_texture(name, color_image, egui::TextureOptions::default());
            match message.kind {
                LoadKind::Thumb => {
                    self.thumbs.insert(message.path, texture);
                }
                LoadKind::Full => {
                    self.fulls.insert(message.path, texture);
                }
            }
        }
    }

    pub fn loading(&self) -> bool {
        !self.inflight.is_empty()
    }

    /// Full-resolution textures are only needed while the fullscreen
    /// viewer is open.
    pub fn drop_full(&mut self) {
        self.fulls.clear();
    }
}
