//! Axis parameterization and resolution to canonical edge pairs.

use std::fmt;

use crate::error::BoxmatchError;

/// Which box axis a span belongs to.
///
/// Only used for error reporting; the resolution arithmetic is identical
/// for both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// One axis of a box, defined by exactly two of {edge1, edge2, center, length}.
///
/// The six variants are the complete set of valid two-parameter
/// combinations. [`AxisSpan::resolve`] reduces each to the canonical
/// `(p1, p2)` edge pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisSpan {
    /// Both edges given directly.
    Edges { min: f64, max: f64 },
    /// Lower edge plus center.
    MinCenter { min: f64, center: f64 },
    /// Lower edge plus length.
    MinLength { min: f64, length: f64 },
    /// Upper edge plus center.
    MaxCenter { max: f64, center: f64 },
    /// Upper edge plus length.
    MaxLength { max: f64, length: f64 },
    /// Center plus length. Both resolved edges truncate toward zero.
    CenterLength { center: f64, length: f64 },
}

impl AxisSpan {
    /// Builds a span from optional parameters, as they arrive from
    /// annotation schemas with heterogeneous key sets.
    ///
    /// Exactly two of the four parameters must be present; anything else
    /// fails with [`BoxmatchError::InvalidParameterization`].
    pub fn from_parts(
        axis: Axis,
        min: Option<f64>,
        max: Option<f64>,
        center: Option<f64>,
        length: Option<f64>,
    ) -> Result<Self, BoxmatchError> {
        match (min, max, center, length) {
            (Some(min), Some(max), None, None) => Ok(Self::Edges { min, max }),
            (Some(min), None, Some(center), None) => Ok(Self::MinCenter { min, center }),
            (Some(min), None, None, Some(length)) => Ok(Self::MinLength { min, length }),
            (None, Some(max), Some(center), None) => Ok(Self::MaxCenter { max, center }),
            (None, Some(max), None, Some(length)) => Ok(Self::MaxLength { max, length }),
            (None, None, Some(center), Some(length)) => Ok(Self::CenterLength { center, length }),
            _ => {
                let supplied = [min, max, center, length]
                    .iter()
                    .filter(|value| value.is_some())
                    .count();
                Err(BoxmatchError::InvalidParameterization { axis, supplied })
            }
        }
    }

    /// Resolves the span to its canonical `(p1, p2)` edge pair.
    ///
    /// `CenterLength` bisects the length around the center and truncates
    /// both bounds toward zero; all other variants resolve exactly.
    pub fn resolve(self) -> (f64, f64) {
        match self {
            Self::Edges { min, max } => (min, max),
            Self::MinCenter { min, center } => (min, min + 2.0 * (center - min)),
            Self::MinLength { min, length } => (min, min + length),
            Self::MaxCenter { max, center } => (max - 2.0 * (max - center), max),
            Self::MaxLength { max, length } => (max - length, max),
            Self::CenterLength { center, length } => (
                (center - length / 2.0).trunc(),
                (center + length / 2.0).trunc(),
            ),
        }
    }
}
