//! Emotion galaxy: entries as stars on a sphere.
//!
//! Pipeline, leaves first:
//!   - `filter`   - mood filter over the entry snapshot
//!   - `sphere`   - Fibonacci-sphere layout of the filtered sequence
//!   - `color`    - mood palette and hex parsing
//!   - `encoder`  - mood → color, role → brightness / opacity / scale
//!   - `focus`    - selection / hover state machine and per-entry targets
//!   - `animator` - frame-rate independent easing of live visuals
//!   - `scene`    - the per-view session tying it all together
//!   - `camera`   - orbit camera and screen projection for render surfaces

pub mod animator;
pub mod camera;
pub mod color;
pub mod encoder;
pub mod filter;
pub mod focus;
pub mod scene;
pub mod sphere;

pub use scene::{FrameSnapshot, GalaxyScene, InteractionEvent, VisualSnapshot};

/// Presentation mode of the galaxy view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Every entry, nothing selected
    #[default]
    Overview,
    /// A mood filter is active, nothing selected
    Filtered,
    /// One entry is pulled forward for reading
    Focused,
}
