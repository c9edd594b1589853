//! Shared constants for collage layout
//!
//! This module centralizes magic numbers and constants used throughout
//! the layout engine.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per centimeter
pub const MM_PER_CM: f32 = 10.0;

/// Millimeters per inch (exact by definition)
pub const MM_PER_INCH: f32 = 25.4;

/// Decimal places used when formatting a dimension for display
pub const DEFAULT_DECIMALS: usize = 2;

// =============================================================================
// Grid Fitting
// =============================================================================

/// Relative slack allowed when checking whether one more cell fits.
///
/// Covers `f32` rounding only (e.g. margins subtracted from inch-derived page
/// sizes); a cell that is genuinely short by any measurable amount never fits.
pub const FIT_EPSILON: f32 = 4.0 * f32::EPSILON;

// =============================================================================
// Defaults
// =============================================================================

/// Default page margin in millimeters (printer-safe area)
pub const DEFAULT_MARGIN_MM: f32 = 5.0;

/// Default repeat count for a newly added image
pub const DEFAULT_IMAGE_COUNT: usize = 1;

/// Default colour for cutting markers
pub const DEFAULT_MARKER_COLOR: &str = "#ff0000";

/// Label suffix applied to duplicated presets
pub const COPY_SUFFIX: &str = " (Copy)";

/// Identifier of the page size selected when nothing else is configured
pub const DEFAULT_PAGE_ID: &str = "a4";

/// Identifier of the layout preset selected when nothing else is configured
pub const DEFAULT_LAYOUT_ID: &str = "grid-2x2";
