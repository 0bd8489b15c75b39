//! Where entries and their photos come from.

pub mod demo;
pub mod fetch;
pub mod image;

pub use demo::demo_entries;
pub use fetch::{load_entries, EntrySource};
