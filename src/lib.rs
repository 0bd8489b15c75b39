pub mod config;
pub mod entry;
pub mod error;
pub mod math;

// Galaxy engine: layout, focus, animation
pub mod galaxy;

// Entry snapshots and photos
pub mod source;

pub use config::GalaxyConfig;
pub use entry::{Entry, EntryId, Mood};
pub use error::GalaxyError;
pub use galaxy::{GalaxyScene, InteractionEvent};
