//! The galaxy view session.
//!
//! `GalaxyScene` owns everything one active galaxy view needs: the entry
//! snapshot, the mood filter, the sphere layout, the focus state and the live
//! visuals. The render surface drives it:
//!
//! ```text
//! pointer events ──► enqueue / pointer_*()     (applied between ticks)
//! every frame     ──► tick(dt) ──► snapshot()  ──► draw
//! ```
//!
//! Filter changes re-run the layout and resync the visuals; focus changes only
//! retarget them.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::config::{FilterChangePolicy, GalaxyConfig};
use crate::entry::{Entry, EntryId};
use crate::galaxy::animator::{AnimationScheduler, LiveVisual, Smoothing};
use crate::galaxy::color::Rgba;
use crate::galaxy::encoder::{Role, VisualEncoder};
use crate::galaxy::filter::{filter_entries, toggle_filter};
use crate::galaxy::focus::{FocusGeometry, FocusStateMachine};
use crate::galaxy::sphere::{layout_points, LayoutPoint};
use crate::galaxy::ViewMode;
use crate::math::Vec3;

/// Input delivered by the render surface or the filter bar.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    PointerEnter(EntryId),
    PointerLeave(EntryId),
    PointerClick(EntryId),
    PointerClickBackground,
    SetFilter(Option<String>),
}

/// What the renderer draws for one entry this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualSnapshot {
    pub entry_id: EntryId,
    pub position: Vec3,
    pub scale: f32,
    pub brightness: f32,
    pub opacity: f32,
    pub color: Rgba,
    pub role: Role,
}

/// Read-only frame output, in filtered order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub visuals: Vec<VisualSnapshot>,
    /// Scene light color (filter mood, or white)
    pub accent: Rgba,
    pub view_mode: ViewMode,
}

impl FrameSnapshot {
    pub fn get(&self, id: &str) -> Option<&VisualSnapshot> {
        self.visuals.iter().find(|v| v.entry_id == id)
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}

pub struct GalaxyScene {
    config: GalaxyConfig,
    encoder: VisualEncoder,
    entries: Vec<Entry>,
    /// Entry id → index into `entries` (first occurrence wins)
    by_id: HashMap<EntryId, usize>,
    filter: Option<String>,
    layout: Vec<LayoutPoint>,
    /// Sphere position per laid-out id
    sphere_positions: HashMap<EntryId, Vec3>,
    focus: FocusStateMachine,
    scheduler: AnimationScheduler,
    pending: VecDeque<InteractionEvent>,
    elapsed: f32,
}

impl GalaxyScene {
    pub fn new(config: GalaxyConfig, entries: Vec<Entry>) -> Self {
        let smoothing = Smoothing {
            rate: config.smoothing_rate,
            snap_epsilon: config.snap_epsilon,
            max_frame_dt: config.max_frame_dt,
        };
        let mut scene = Self {
            encoder: VisualEncoder::from_config(&config),
            config,
            entries: Vec::new(),
            by_id: HashMap::new(),
            filter: None,
            layout: Vec::new(),
            sphere_positions: HashMap::new(),
            focus: FocusStateMachine::new(),
            scheduler: AnimationScheduler::new(smoothing),
            pending: VecDeque::new(),
            elapsed: 0.0,
        };
        scene.set_entries(entries);
        scene
    }

    /// Replace the entry snapshot and re-run the layout.
    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        self.by_id.clear();
        for (i, e) in entries.iter().enumerate() {
            self.by_id.entry(e.id.clone()).or_insert(i);
        }
        if self.by_id.len() != entries.len() {
            log::warn!(
                "{} duplicate entry ids in snapshot",
                entries.len() - self.by_id.len()
            );
        }
        log::info!("galaxy snapshot: {} entries", entries.len());
        self.entries = entries;
        self.relayout();
    }

    // ── Queries ──

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn encoder(&self) -> &VisualEncoder {
        &self.encoder
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// The current filtered sequence. May repeat an id if the snapshot does;
    /// [`layout`](Self::layout) keeps only the first occurrence.
    pub fn filtered(&self) -> Vec<&Entry> {
        filter_entries(&self.entries, self.filter.as_deref())
    }

    pub fn layout(&self) -> &[LayoutPoint] {
        &self.layout
    }

    pub fn focus(&self) -> &FocusStateMachine {
        &self.focus
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn live(&self, id: &str) -> Option<&LiveVisual> {
        self.scheduler.get(id)
    }

    /// Role of a rendered entry; `None` if the entry has no live visual.
    pub fn role_of(&self, id: &str) -> Option<Role> {
        self.scheduler.get(id).map(|_| self.focus.role_for(id))
    }

    /// Full record of the selected entry, for the detail panel.
    ///
    /// Resolved against the whole snapshot, so it is still available when a
    /// filter hides the entry under [`FilterChangePolicy::KeepSelection`].
    pub fn selected_entry(&self) -> Option<&Entry> {
        let id = self.focus.selected()?;
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn view_mode(&self) -> ViewMode {
        if self.focus.selected().is_some() {
            ViewMode::Focused
        } else if self.filter.is_some() {
            ViewMode::Filtered
        } else {
            ViewMode::Overview
        }
    }

    /// Heading for the view: "<Mood> Universe" or "MEMORY GALAXY".
    pub fn title(&self) -> String {
        match &self.filter {
            Some(m) => format!("{m} Universe"),
            None => "MEMORY GALAXY".to_string(),
        }
    }

    pub fn accent_color(&self) -> Rgba {
        self.encoder.accent_color(self.filter.as_deref())
    }

    /// Seconds of animation time since the session started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_animating(&self) -> bool {
        !self.pending.is_empty() || self.scheduler.is_animating()
    }

    fn is_laid_out(&self, id: &str) -> bool {
        self.sphere_positions.contains_key(id)
    }

    // ── Filter ──

    /// Change the mood filter. Re-runs the layout when the filter changes.
    pub fn set_filter(&mut self, mood: Option<&str>) {
        if self.filter.as_deref() == mood {
            return;
        }
        log::info!("filter: {:?} -> {:?}", self.filter, mood);
        self.filter = mood.map(str::to_string);
        self.relayout();
    }

    /// Filter bar click on `mood`.
    pub fn toggle_filter(&mut self, mood: &str) {
        let next = toggle_filter(self.filter.as_deref(), mood);
        self.set_filter(next.as_deref());
    }

    fn relayout(&mut self) {
        // One star per id: later duplicates never get a slot of their own
        let mut seen = HashSet::new();
        let filtered: Vec<&Entry> = filter_entries(&self.entries, self.filter.as_deref())
            .into_iter()
            .filter(|e| seen.insert(e.id.as_str()))
            .collect();
        self.layout = layout_points(&filtered, self.config.sphere_radius);
        self.sphere_positions = self
            .layout
            .iter()
            .map(|p| (p.entry_id.clone(), p.target_position))
            .collect();
        self.scheduler.sync(&self.layout);
        log::debug!("layout: {} points on radius {}", self.layout.len(), self.config.sphere_radius);

        if let Some(hovered) = self.focus.hovered().map(str::to_string) {
            if !self.is_laid_out(&hovered) {
                self.focus.unhover();
            }
        }
        if let Some(selected) = self.focus.selected().map(str::to_string) {
            if !self.is_laid_out(&selected) {
                match self.config.filter_change_policy {
                    FilterChangePolicy::Deselect => {
                        log::info!("selected entry {selected} hidden by filter; deselecting");
                        self.focus.deselect();
                    }
                    FilterChangePolicy::KeepSelection => {
                        log::debug!("selected entry {selected} hidden by filter; keeping selection");
                    }
                }
            }
        }
        self.retarget();
    }

    // ── Focus ──

    /// Recompute every live visual's target from the focus state.
    fn retarget(&mut self) {
        let geo = FocusGeometry {
            presentation_slot: self.config.presentation_slot,
            recede_factor: self.config.recede_factor,
        };
        for p in &self.layout {
            let target = self.focus.target_for(&p.entry_id, p.target_position, &geo);
            let emphasis = self.encoder.emphasis_for(target.role);
            self.scheduler.set_target(&p.entry_id, target.position, emphasis);
        }
    }

    /// Pointer entered an entry. Ignored for entries not on screen.
    pub fn pointer_enter(&mut self, id: &str) {
        if !self.is_laid_out(id) {
            log::debug!("ignoring hover on absent entry {id}");
            return;
        }
        if self.focus.hover(id) {
            self.retarget();
        }
    }

    /// Pointer left an entry.
    pub fn pointer_leave(&mut self, id: &str) {
        if self.focus.unhover_if(id) {
            self.retarget();
        }
    }

    /// Entry clicked: select it. Ignored for entries not on screen.
    pub fn pointer_click(&mut self, id: &str) {
        if !self.is_laid_out(id) {
            log::debug!("ignoring click on absent entry {id}");
            return;
        }
        if self.focus.select(id) {
            log::info!("selected entry {id}");
            self.retarget();
        }
    }

    /// Click on empty space: clear the selection.
    pub fn pointer_click_background(&mut self) {
        if self.focus.deselect() {
            log::info!("selection cleared");
            self.retarget();
        }
    }

    pub fn dispatch(&mut self, event: InteractionEvent) {
        match event {
            InteractionEvent::PointerEnter(id) => self.pointer_enter(&id),
            InteractionEvent::PointerLeave(id) => self.pointer_leave(&id),
            InteractionEvent::PointerClick(id) => self.pointer_click(&id),
            InteractionEvent::PointerClickBackground => self.pointer_click_background(),
            InteractionEvent::SetFilter(mood) => self.set_filter(mood.as_deref()),
        }
    }

    /// Queue an event to be applied at the start of the next tick.
    pub fn enqueue(&mut self, event: InteractionEvent) {
        self.pending.push_back(event);
    }

    // ── Frame ──

    /// Apply queued events, then advance the animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        while let Some(event) = self.pending.pop_front() {
            self.dispatch(event);
        }
        self.scheduler.tick(dt);
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt.min(self.config.max_frame_dt);
        }
    }

    /// Live values of every rendered entry.
    pub fn snapshot(&self) -> FrameSnapshot {
        let visuals = self
            .scheduler
            .visuals()
            .iter()
            .map(|v| {
                let mood = self
                    .by_id
                    .get(&v.entry_id)
                    .map(|&i| self.entries[i].mood.as_str())
                    .unwrap_or("");
                VisualSnapshot {
                    entry_id: v.entry_id.clone(),
                    position: v.position,
                    scale: v.scale,
                    brightness: v.brightness,
                    opacity: v.opacity,
                    color: self.encoder.color_for(mood),
                    role: self.focus.role_for(&v.entry_id),
                }
            })
            .collect();
        FrameSnapshot {
            visuals,
            accent: self.accent_color(),
            view_mode: self.view_mode(),
        }
    }
}
