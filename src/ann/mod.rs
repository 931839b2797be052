//! Annotation models and on-disk format support.
//!
//! Readers in this module produce [`AnnotationSet`] values (ordered lists
//! of per-image box collections); the VOC XML reader is the exception and
//! stays independent of the box model, yielding raw labels and edges.

mod model;

pub mod io_json;
pub mod io_voc_xml;

pub use model::{AnnotationSet, ImageAnnotation};
