//! `GalaxyApp`, the top-level egui application state.
//!
//! This module declares the `GalaxyApp` struct and the frame loop.
//! Drawing is split across the sibling sub-modules:
//!
//! - `loading` - background entry loading
//! - `toolbar` - title, mood filter bar, reload
//! - `canvas`  - the galaxy itself: projection, picking, camera input
//! - `detail`  - the selected entry's panel

pub mod canvas;
pub mod detail;
pub mod loading;
pub mod toolbar;

use std::collections::HashMap;
use std::sync::mpsc;

use eframe::egui;

use mood_galaxy::galaxy::camera::OrbitCamera;
use mood_galaxy::source::image::ImageLoader;
use mood_galaxy::{Entry, EntryId, GalaxyConfig, GalaxyError, GalaxyScene};

/// What the viewer was launched with.
pub struct Startup {
    pub config: GalaxyConfig,
    /// Snapshot location; `None` means generated sample entries
    pub entries: Option<String>,
    pub demo: usize,
    pub filter: Option<String>,
}

// ─── Application state ───────────────────────────────────────────────────────

pub struct GalaxyApp {
    pub scene: GalaxyScene,
    pub camera: OrbitCamera,
    /// Whether the camera moved on the last frame
    pub camera_moving: bool,
    pub source: Option<String>,
    pub demo: usize,
    pub error: Option<String>,
    pub loading: bool,
    pub load_rx: Option<mpsc::Receiver<Result<Vec<Entry>, GalaxyError>>>,
    /// Entry currently under the pointer, as last reported to the scene
    pub hovered: Option<EntryId>,
    // Photos for the detail panel
    pub image_loader: ImageLoader,
    pub image_textures: HashMap<String, egui::TextureHandle>,
    pub last_frame_time: std::time::Instant,
}

impl GalaxyApp {
    pub fn new(cc: &eframe::CreationContext<'_>, startup: Startup) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let camera = OrbitCamera::from_config(&startup.config.camera);
        let mut scene = GalaxyScene::new(startup.config, Vec::new());
        if let Some(mood) = startup.filter.as_deref() {
            scene.set_filter(Some(mood));
        }

        let mut app = Self {
            scene,
            camera,
            camera_moving: true,
            source: startup.entries,
            demo: startup.demo,
            error: None,
            loading: false,
            load_rx: None,
            hovered: None,
            image_loader: ImageLoader::new(),
            image_textures: HashMap::new(),
            last_frame_time: std::time::Instant::now(),
        };
        app.start_loading(&cc.egui_ctx);
        app
    }
}

impl eframe::App for GalaxyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_loading();
        self.image_loader.poll();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        if self.scene.selected_entry().is_some() {
            egui::SidePanel::right("detail")
                .default_width(320.0)
                .resizable(true)
                .show(ctx, |ui| {
                    self.draw_detail(ui, ctx);
                });
        }

        let ctx_clone = ctx.clone();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(canvas::BACKGROUND))
            .show(ctx, |ui| {
                self.draw_galaxy(ui, &ctx_clone);
            });

        if self.loading
            || self.image_loader.pending_count() > 0
            || self.scene.is_animating()
            || self.camera_moving
        {
            ctx.request_repaint();
        } else {
            // Stars keep breathing while everything else is at rest
            ctx.request_repaint_after(std::time::Duration::from_millis(33));
        }
    }
}
