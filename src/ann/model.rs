//! Per-image annotation model.
//!
//! Annotation files pair each image file name with the boxes drawn on it.
//! Order matters: consumers align truth and prediction sets by position,
//! so readers must preserve file order.

use crate::geom::Boxes;

/// One image's annotated boxes.
#[derive(Clone, Debug, Default)]
pub struct ImageAnnotation {
    /// File name of the annotated image.
    pub file_name: String,

    /// Boxes drawn on the image.
    pub boxes: Boxes,
}

impl ImageAnnotation {
    /// Creates a per-image annotation.
    pub fn new(file_name: impl Into<String>, boxes: Boxes) -> Self {
        Self {
            file_name: file_name.into(),
            boxes,
        }
    }
}

/// An ordered list of per-image annotations.
///
/// This is the unit every reader produces and every consumer takes.
#[derive(Clone, Debug, Default)]
pub struct AnnotationSet {
    /// Per-image annotations, in file order.
    pub images: Vec<ImageAnnotation>,
}

impl AnnotationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    /// Appends an image annotation.
    pub fn push(&mut self, image: ImageAnnotation) {
        self.images.push(image);
    }

    /// Returns the number of images.
    pub fn num_images(&self) -> usize {
        self.images.len()
    }

    /// Returns the total number of boxes across all images.
    pub fn num_boxes(&self) -> usize {
        self.images.iter().map(|image| image.boxes.num()).sum()
    }

    /// Iterates over the per-image annotations in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, ImageAnnotation> {
        self.images.iter()
    }
}

impl From<Vec<ImageAnnotation>> for AnnotationSet {
    fn from(images: Vec<ImageAnnotation>) -> Self {
        Self { images }
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a ImageAnnotation;
    type IntoIter = std::slice::Iter<'a, ImageAnnotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::BBox;

    #[test]
    fn counts_cover_all_images() {
        let mut first = Boxes::new();
        first.add_box(BBox::from_edges(0.0, 0.0, 1.0, 1.0));
        first.add_box(BBox::from_edges(2.0, 2.0, 3.0, 3.0));

        let mut set = AnnotationSet::new();
        set.push(ImageAnnotation::new("1.png", first));
        set.push(ImageAnnotation::new("2.png", Boxes::new()));

        assert_eq!(set.num_images(), 2);
        assert_eq!(set.num_boxes(), 2);
        assert_eq!(set.images[0].file_name, "1.png");
    }
}
