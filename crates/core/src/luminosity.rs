//! Integrated-luminosity units and conversions.
//!
//! Certified records store integrated luminosity in pb⁻¹ with two decimal
//! places. Runs too small for that precision are displayed in µb⁻¹ instead.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Inverse microbarns per inverse picobarn.
pub const MICROBARN_PER_PICOBARN: f64 = 1_000_000.0;

/// Smallest pb⁻¹ value that survives the two-decimal storage precision.
/// Anything below rounds to 0.00 and is displayed in µb⁻¹ instead.
pub const MIN_DISPLAYABLE_PICOBARN: f64 = 0.005;

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Display unit of an integrated-luminosity value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LumiUnit {
    #[default]
    #[serde(rename = "pb⁻¹")]
    InversePicobarn,
    #[serde(rename = "µb⁻¹")]
    InverseMicrobarn,
}

impl LumiUnit {
    /// Return the unit symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InversePicobarn => "pb⁻¹",
            Self::InverseMicrobarn => "µb⁻¹",
        }
    }

    /// Parse a unit from its symbol.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "pb⁻¹" => Ok(Self::InversePicobarn),
            "µb⁻¹" => Ok(Self::InverseMicrobarn),
            _ => Err(CoreError::Validation(format!(
                "Invalid luminosity unit '{s}'. Must be one of: pb⁻¹, µb⁻¹"
            ))),
        }
    }

    /// How many of this unit make up one pb⁻¹.
    fn per_picobarn(&self) -> f64 {
        match self {
            Self::InversePicobarn => 1.0,
            Self::InverseMicrobarn => MICROBARN_PER_PICOBARN,
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Rescale a luminosity value between display units.
///
/// Used when the unit selector next to the luminosity field changes, so the
/// numeric value keeps describing the same physical quantity.
pub fn convert(value: f64, from: LumiUnit, to: LumiUnit) -> f64 {
    if from == to {
        return value;
    }
    value / from.per_picobarn() * to.per_picobarn()
}

/// Pick the display unit for a stored pb⁻¹ value.
///
/// Non-zero values that would round to 0.00 at the storage precision are
/// shown in µb⁻¹ so they do not display as zero.
pub fn auto_unit(value_pb: f64) -> LumiUnit {
    if value_pb != 0.0 && value_pb.abs() < MIN_DISPLAYABLE_PICOBARN {
        LumiUnit::InverseMicrobarn
    } else {
        LumiUnit::InversePicobarn
    }
}

/// Rescaled value and unit used to display a stored pb⁻¹ luminosity.
pub fn display_value(value_pb: f64) -> (f64, LumiUnit) {
    let unit = auto_unit(value_pb);
    (convert(value_pb, LumiUnit::InversePicobarn, unit), unit)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
