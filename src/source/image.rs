//! Background photo loading for the detail panel.
//!
//! Entry photos are fetched and decoded on worker threads into RGBA buffers
//! ready for texture upload. The UI polls once per frame; nothing here blocks
//! the frame loop.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;

/// Longest edge of a decoded photo; larger images are downscaled.
pub const MAX_PHOTO_WIDTH: u32 = 640;

/// Decoded image data (RGBA).
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// State of a photo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoStatus {
    Pending,
    Ready,
    Failed,
    Unknown,
}

#[derive(Default)]
pub struct ImageLoader {
    pending: HashMap<String, mpsc::Receiver<Option<ImageData>>>,
    loaded: HashMap<String, ImageData>,
    failed: HashSet<String>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a photo to be loaded in the background. Repeated requests for
    /// the same location are ignored.
    pub fn request(&mut self, location: &str) {
        if self.loaded.contains_key(location)
            || self.pending.contains_key(location)
            || self.failed.contains(location)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let owned = location.to_string();

        std::thread::spawn(move || {
            let result = load_and_decode(&owned);
            if result.is_none() {
                log::warn!("could not load photo {owned}");
            }
            let _ = tx.send(result);
        });

        self.pending.insert(location.to_string(), rx);
    }

    /// Collect finished loads. Call every frame; returns how many completed.
    pub fn poll(&mut self) -> usize {
        let mut completed = Vec::new();
        for (location, rx) in &self.pending {
            match rx.try_recv() {
                Ok(Some(data)) => {
                    self.loaded.insert(location.clone(), data);
                    completed.push(location.clone());
                }
                Ok(None) | Err(mpsc::TryRecvError::Disconnected) => {
                    self.failed.insert(location.clone());
                    completed.push(location.clone());
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
        for location in &completed {
            self.pending.remove(location);
        }
        completed.len()
    }

    pub fn get(&self, location: &str) -> Option<&ImageData> {
        self.loaded.get(location)
    }

    pub fn status(&self, location: &str) -> PhotoStatus {
        if self.loaded.contains_key(location) {
            PhotoStatus::Ready
        } else if self.pending.contains_key(location) {
            PhotoStatus::Pending
        } else if self.failed.contains(location) {
            PhotoStatus::Failed
        } else {
            PhotoStatus::Unknown
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn read_bytes(location: &str) -> Option<Vec<u8>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let resp = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .ok()?
            .get(location)
            .send()
            .ok()?;
        if !resp.status().is_success() {
            return None;
        }
        Some(resp.bytes().ok()?.to_vec())
    } else {
        std::fs::read(location).ok()
    }
}

fn load_and_decode(location: &str) -> Option<ImageData> {
    decode(&read_bytes(location)?)
}

/// Decode image bytes into RGBA, capping the width at [`MAX_PHOTO_WIDTH`].
pub fn decode(bytes: &[u8]) -> Option<ImageData> {
    let img = image::load_from_memory(bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (w, h, pixels) = if w > MAX_PHOTO_WIDTH {
        let ratio = MAX_PHOTO_WIDTH as f32 / w as f32;
        let new_h = ((h as f32 * ratio) as u32).max(1);
        let resized = image::imageops::resize(
            &rgba,
            MAX_PHOTO_WIDTH,
            new_h,
            image::imageops::FilterType::Triangle,
        );
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    Some(ImageData {
        width: w,
        height: h,
        rgba: pixels,
    })
}
