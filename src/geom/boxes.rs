//! Ordered collections of bounding boxes.

use super::bbox::{BBox, BoxField};

/// An ordered, growable collection of [`BBox`].
///
/// Every instance owns its own container; two collections never share
/// backing storage.
#[derive(Clone, Debug, Default)]
pub struct Boxes {
    boxes: Vec<BBox>,
}

impl Boxes {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Appends a box to the collection.
    pub fn add_box(&mut self, bbox: BBox) {
        self.boxes.push(bbox);
    }

    /// Returns the number of boxes.
    #[inline]
    pub fn num(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if the collection holds no boxes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Returns the box at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&BBox> {
        self.boxes.get(index)
    }

    /// Iterates over the boxes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, BBox> {
        self.boxes.iter()
    }

    /// Extracts the requested fields from every box.
    ///
    /// Returns one row per box, each of `fields.len()` values in the
    /// caller-specified order. An empty collection yields zero rows.
    pub fn get_pos(&self, fields: &[BoxField]) -> Vec<Vec<f64>> {
        self.boxes.iter().map(|bbox| bbox.get_pos(fields)).collect()
    }
}

impl From<Vec<BBox>> for Boxes {
    fn from(boxes: Vec<BBox>) -> Self {
        Self { boxes }
    }
}

impl FromIterator<BBox> for Boxes {
    fn from_iter<I: IntoIterator<Item = BBox>>(iter: I) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Boxes {
    type Item = &'a BBox;
    type IntoIter = std::slice::Iter<'a, BBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
