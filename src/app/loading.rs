//! Entry loading for `GalaxyApp`.
//!
//! The snapshot is read once per activation on a worker thread and handed
//! back through a channel; the galaxy shows a loading state until then.

use std::sync::mpsc;

use eframe::egui;

use mood_galaxy::source::{demo_entries, load_entries};

use super::GalaxyApp;

impl GalaxyApp {
    /// Start (or restart) loading the entry snapshot.
    pub fn start_loading(&mut self, ctx: &egui::Context) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.error = None;

        let (tx, rx) = mpsc::channel();
        self.load_rx = Some(rx);

        let source = self.source.clone();
        let demo = self.demo;
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let result = match source {
                Some(location) => load_entries(&location),
                None => Ok(demo_entries(demo)),
            };
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Pick up a finished load. Failures leave an empty galaxy and an error
    /// message in the toolbar.
    pub fn check_loading(&mut self) {
        let received = match self.load_rx.as_ref() {
            Some(rx) => rx.try_recv(),
            None => return,
        };
        match received {
            Ok(Ok(entries)) => {
                self.scene.set_entries(entries);
            }
            Ok(Err(e)) => {
                log::error!("entry load failed: {e}");
                self.error = Some(e.to_string());
                self.scene.set_entries(Vec::new());
            }
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                log::error!("entry loader exited without a result");
                self.error = Some("entry loader exited without a result".to_string());
                self.scene.set_entries(Vec::new());
            }
        }
        if let Some(old) = self.hovered.take() {
            self.scene.pointer_leave(&old);
        }
        self.loading = false;
        self.load_rx = None;
    }
}
