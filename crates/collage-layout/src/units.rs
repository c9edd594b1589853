//! Unit conversion and dimension parsing
//!
//! Millimeters are the canonical internal unit. Everything else is converted
//! at the edge, either from user input (`parse_dimension`) or for display
//! (`format_dimension`).

use crate::constants::{MM_PER_CM, MM_PER_INCH};

/// Display/input unit for physical dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "mm"))]
    Millimeters,
    #[cfg_attr(feature = "serde", serde(rename = "cm"))]
    Centimeters,
    #[cfg_attr(feature = "serde", serde(rename = "in"))]
    Inches,
}

impl Unit {
    /// Short name used in parsed input and config files
    pub fn name(self) -> &'static str {
        match self {
            Unit::Millimeters => "mm",
            Unit::Centimeters => "cm",
            Unit::Inches => "in",
        }
    }

    /// Conventional display symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Millimeters => "mm",
            Unit::Centimeters => "cm",
            Unit::Inches => "\"",
        }
    }

    /// Millimeters in one of this unit
    pub fn mm_per_unit(self) -> f32 {
        match self {
            Unit::Millimeters => 1.0,
            Unit::Centimeters => MM_PER_CM,
            Unit::Inches => MM_PER_INCH,
        }
    }

    /// Match a unit suffix, ignoring case. Accepts abbreviations, inch marks
    /// and the full singular/plural words in both spellings.
    pub fn from_suffix(suffix: &str) -> Option<Unit> {
        let suffix = suffix.trim().to_lowercase();
        match suffix.as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Some(Unit::Millimeters)
            }
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Some(Unit::Centimeters)
            }
            "in" | "inch" | "inches" | "\"" | "″" => Some(Unit::Inches),
            _ => None,
        }
    }
}

/// Convert a value in `unit` to millimeters
#[inline]
pub fn to_mm(value: f32, unit: Unit) -> f32 {
    value * unit.mm_per_unit()
}

/// Convert millimeters to `unit`
#[inline]
pub fn from_mm(value_mm: f32, unit: Unit) -> f32 {
    value_mm / unit.mm_per_unit()
}

/// Result of parsing a dimension string.
///
/// Malformed input yields [`Dimension::INVALID`] (value 0, no unit) rather than
/// an error; callers check [`Dimension::is_valid`] before using it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimension {
    pub value: f32,
    pub unit: Option<Unit>,
}

impl Dimension {
    pub const INVALID: Dimension = Dimension {
        value: 0.0,
        unit: None,
    };

    pub fn new(value: f32, unit: Unit) -> Self {
        Self {
            value,
            unit: Some(unit),
        }
    }

    /// A usable dimension has a unit and a strictly positive value
    pub fn is_valid(&self) -> bool {
        self.unit.is_some() && self.value > 0.0
    }

    /// Value in millimeters (0 for an invalid dimension)
    pub fn to_mm(&self) -> f32 {
        match self.unit {
            Some(unit) => to_mm(self.value, unit),
            None => 0.0,
        }
    }
}

/// Parse `<digits>[.<digits>][ws]<unit>?`.
///
/// Missing units default to millimeters. Never fails: anything that does not
/// match the grammar comes back as [`Dimension::INVALID`].
pub fn parse_dimension(text: &str) -> Dimension {
    let trimmed = text.trim();

    let Some(number_len) = number_prefix_len(trimmed) else {
        return Dimension::INVALID;
    };
    let (number, rest) = trimmed.split_at(number_len);

    let Ok(value) = number.parse::<f32>() else {
        return Dimension::INVALID;
    };

    let suffix = rest.trim();
    if suffix.is_empty() {
        return Dimension::new(value, Unit::Millimeters);
    }

    match Unit::from_suffix(suffix) {
        Some(unit) => Dimension::new(value, unit),
        None => Dimension::INVALID,
    }
}

/// Length of the leading `<digits>[.<digits>]` run, if there is one
fn number_prefix_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let int_digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if int_digits == 0 {
        return None;
    }

    let mut end = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac_digits == 0 {
            return None;
        }
        end += 1 + frac_digits;
    }

    Some(end)
}

/// Render a millimeter value in `unit` with a fixed number of decimals.
///
/// Metric units are separated by a space (`215.90 mm`); inches use the inch
/// mark directly (`8.50"`).
pub fn format_dimension(value_mm: f32, unit: Unit, decimals: usize) -> String {
    let value = from_mm(value_mm, unit);
    match unit {
        Unit::Inches => format!("{:.*}{}", decimals, value, unit.symbol()),
        Unit::Millimeters | Unit::Centimeters => {
            format!("{:.*} {}", decimals, value, unit.symbol())
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
