//! Page size and layout presets
//!
//! Built-in catalogues plus a registry for user-defined entries with
//! visibility, ordering and (with the `serde` feature) import/export.

mod builtin;
#[cfg(feature = "serde")]
mod records;
mod registry;

pub use builtin::{builtin_layouts, builtin_page_sizes};
#[cfg(feature = "serde")]
pub use records::{ImportReport, PresetRecord, parse_record};
pub use registry::{Preset, PresetEntry, PresetRegistry};
