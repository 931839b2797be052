//! Bounding-box geometry for boxmatch.
//!
//! This module defines the canonical box model and the overlap metric on
//! top of it:
//!
//! 1. **Canonical Representation**: a box stores one edge pair per axis
//!    (`x1 <= x2` is not enforced; readers may produce malformed boxes and
//!    validation reports them rather than panicking during parsing).
//!
//! 2. **Exhaustive Parameterization**: an axis can be specified by any two
//!    of {edge1, edge2, center, length}. The valid combinations are a
//!    closed set, expressed as the [`AxisSpan`] sum type and checked at
//!    construction.
//!
//! 3. **Caller-Ordered Extraction**: consumers pull coordinates out in
//!    whatever field order they need via [`BBox::get_pos`] and
//!    [`Boxes::get_pos`], so a renderer can ask for `(x1, y1, x2, y2)`
//!    while a writer asks for `(cx, cy, w, h)`.
//!
//! # Example
//!
//! ```
//! use boxmatch::geom::{AxisSpan, BBox, Boxes, OverlapCalculator};
//!
//! let truth = Boxes::from(vec![BBox::from_edges(10.0, 10.0, 20.0, 20.0)]);
//! let predictions = Boxes::from(vec![BBox::new(
//!     AxisSpan::CenterLength { center: 15.0, length: 10.0 },
//!     AxisSpan::CenterLength { center: 15.0, length: 10.0 },
//! )]);
//!
//! let overlap = OverlapCalculator::new(&predictions, &truth);
//! let ious = overlap.ious_per_truth();
//! assert_eq!(ious.len(), 1);
//! ```

mod axis;
mod bbox;
mod boxes;
mod overlap;

// Re-export core types for convenient access
pub use axis::{Axis, AxisSpan};
pub use bbox::{BBox, BBoxParts, BoxField};
pub use boxes::Boxes;
pub use overlap::{iou_inclusive, OverlapCalculator};
