//! Single bounding box with a canonical two-point representation.

use std::fmt;
use std::str::FromStr;

use crate::error::BoxmatchError;

use super::axis::{Axis, AxisSpan};

/// A single bounding box.
///
/// Stores one resolved edge pair per axis plus an optional integer label
/// and detection flag. All other views (width, height, center) are derived
/// on read. A box is immutable after construction.
///
/// Note: This type does NOT enforce that `x1 <= x2` or `y1 <= y2`,
/// allowing "malformed" boxes to exist in memory. Validation catches and
/// reports these rather than preventing them from being represented.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    label: Option<i64>,
    detect: Option<i64>,
}

/// Optional construction parameters for [`BBox::from_parts`].
///
/// This is the entry point for annotation schemas that carry an arbitrary
/// two-of-four key subset per axis. Exactly two of `{x1, x2, cx, w}` and
/// two of `{y1, y2, cy, h}` must be set.
#[derive(Clone, Copy, Debug, Default)]
pub struct BBoxParts {
    pub x1: Option<f64>,
    pub x2: Option<f64>,
    pub cx: Option<f64>,
    pub w: Option<f64>,
    pub y1: Option<f64>,
    pub y2: Option<f64>,
    pub cy: Option<f64>,
    pub h: Option<f64>,
    pub label: Option<i64>,
    pub detect: Option<i64>,
}

impl BBox {
    /// Creates a box from one resolved span per axis.
    pub fn new(x: AxisSpan, y: AxisSpan) -> Self {
        let (x1, x2) = x.resolve();
        let (y1, y2) = y.resolve();
        Self {
            x1,
            x2,
            y1,
            y2,
            label: None,
            detect: None,
        }
    }

    /// Creates a box from explicit edges.
    #[inline]
    pub fn from_edges(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(
            AxisSpan::Edges { min: x1, max: x2 },
            AxisSpan::Edges { min: y1, max: y2 },
        )
    }

    /// Creates a box from optional per-axis parameters.
    ///
    /// # Errors
    /// Fails with [`BoxmatchError::InvalidParameterization`] if either axis
    /// is under- or over-specified.
    pub fn from_parts(parts: BBoxParts) -> Result<Self, BoxmatchError> {
        let x = AxisSpan::from_parts(Axis::X, parts.x1, parts.x2, parts.cx, parts.w)?;
        let y = AxisSpan::from_parts(Axis::Y, parts.y1, parts.y2, parts.cy, parts.h)?;

        let mut bbox = Self::new(x, y);
        bbox.label = parts.label;
        bbox.detect = parts.detect;
        Ok(bbox)
    }

    /// Attaches a label to the box.
    pub fn with_label(mut self, label: i64) -> Self {
        self.label = Some(label);
        self
    }

    /// Attaches an explicit detection flag to the box.
    pub fn with_detect(mut self, detect: i64) -> Self {
        self.detect = Some(detect);
        self
    }

    /// Returns the lower x edge.
    #[inline]
    pub fn x1(&self) -> f64 {
        self.x1
    }

    /// Returns the upper x edge.
    #[inline]
    pub fn x2(&self) -> f64 {
        self.x2
    }

    /// Returns the lower y edge.
    #[inline]
    pub fn y1(&self) -> f64 {
        self.y1
    }

    /// Returns the upper y edge.
    #[inline]
    pub fn y2(&self) -> f64 {
        self.y2
    }

    /// Returns the width of the box.
    ///
    /// May be negative if the box is malformed (x2 < x1).
    #[inline]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Returns the height of the box.
    ///
    /// May be negative if the box is malformed (y2 < y1).
    #[inline]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Returns the x coordinate of the box center.
    #[inline]
    pub fn center_x(&self) -> f64 {
        (self.x1 + self.x2) / 2.0
    }

    /// Returns the y coordinate of the box center.
    #[inline]
    pub fn center_y(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }

    /// Returns the label, or `-1` when the box carries none.
    #[inline]
    pub fn label(&self) -> i64 {
        self.label.unwrap_or(-1)
    }

    /// Returns true if a label was set at construction.
    #[inline]
    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }

    /// Returns the detection flag.
    ///
    /// Falls back to `1` for positively labeled boxes and `0` otherwise
    /// when no explicit flag was set.
    #[inline]
    pub fn detect(&self) -> i64 {
        match self.detect {
            Some(detect) => detect,
            None => {
                if self.label() > 0 {
                    1
                } else {
                    0
                }
            }
        }
    }

    /// Returns true if all edges are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.x2.is_finite() && self.y1.is_finite() && self.y2.is_finite()
    }

    /// Reads one derived field as a float.
    pub fn field(&self, field: BoxField) -> f64 {
        match field {
            BoxField::X1 => self.x1,
            BoxField::X2 => self.x2,
            BoxField::Y1 => self.y1,
            BoxField::Y2 => self.y2,
            BoxField::W => self.width(),
            BoxField::H => self.height(),
            BoxField::Cx => self.center_x(),
            BoxField::Cy => self.center_y(),
            BoxField::Label => self.label() as f64,
            BoxField::Detect => self.detect() as f64,
        }
    }

    /// Reads the requested fields in caller-specified order.
    pub fn get_pos(&self, fields: &[BoxField]) -> Vec<f64> {
        fields.iter().map(|&field| self.field(field)).collect()
    }
}

/// A readable box field, selecting what [`BBox::get_pos`] extracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxField {
    X1,
    X2,
    Y1,
    Y2,
    W,
    H,
    Cx,
    Cy,
    Label,
    Detect,
}

impl BoxField {
    /// The string key for this field, as used by annotation consumers.
    pub const fn as_str(self) -> &'static str {
        match self {
            BoxField::X1 => "x1",
            BoxField::X2 => "x2",
            BoxField::Y1 => "y1",
            BoxField::Y2 => "y2",
            BoxField::W => "w",
            BoxField::H => "h",
            BoxField::Cx => "cx",
            BoxField::Cy => "cy",
            BoxField::Label => "label",
            BoxField::Detect => "detect",
        }
    }

    /// Parses a list of string keys into fields, preserving order.
    ///
    /// # Errors
    /// Fails with [`BoxmatchError::UnsupportedKey`] on any unknown key.
    pub fn parse_keys(keys: &[&str]) -> Result<Vec<BoxField>, BoxmatchError> {
        keys.iter().map(|key| key.parse()).collect()
    }
}

impl FromStr for BoxField {
    type Err = BoxmatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "x1" => BoxField::X1,
            "x2" => BoxField::X2,
            "y1" => BoxField::Y1,
            "y2" => BoxField::Y2,
            "w" => BoxField::W,
            "h" => BoxField::H,
            "cx" => BoxField::Cx,
            "cy" => BoxField::Cy,
            "label" => BoxField::Label,
            "detect" => BoxField::Detect,
            other => return Err(BoxmatchError::UnsupportedKey(other.to_string())),
        })
    }
}

impl fmt::Display for BoxField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
