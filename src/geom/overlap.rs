//! Pairwise IoU between prediction and ground-truth box sets.

use super::bbox::BBox;
use super::boxes::Boxes;

/// Computes overlap between a prediction set and a ground-truth set.
///
/// Stateless over two borrowed collections; every call recomputes from the
/// current contents.
pub struct OverlapCalculator<'a> {
    boxes: &'a Boxes,
    true_boxes: &'a Boxes,
}

impl<'a> OverlapCalculator<'a> {
    /// Creates a calculator over `boxes` (predictions) and `true_boxes`
    /// (ground truth).
    pub fn new(boxes: &'a Boxes, true_boxes: &'a Boxes) -> Self {
        Self { boxes, true_boxes }
    }

    /// Returns the full IoU matrix.
    ///
    /// One row per ground-truth box, one column per prediction; entry
    /// `(g, p)` is `iou(truth_g, pred_p)`. Either side being empty yields
    /// the corresponding zero dimension.
    pub fn ious_per_truth(&self) -> Vec<Vec<f64>> {
        self.true_boxes
            .iter()
            .map(|truth| {
                self.boxes
                    .iter()
                    .map(|pred| iou_inclusive(pred, truth))
                    .collect()
            })
            .collect()
    }

    /// Returns the best ground-truth overlap for each prediction.
    ///
    /// The max over the truth axis of [`Self::ious_per_truth`]. With no
    /// ground-truth boxes every prediction reads 0.0.
    pub fn maximum_ious(&self) -> Vec<f64> {
        let mut best = vec![0.0; self.boxes.num()];

        for truth in self.true_boxes.iter() {
            for (slot, pred) in best.iter_mut().zip(self.boxes.iter()) {
                let iou = iou_inclusive(pred, truth);
                if iou > *slot {
                    *slot = iou;
                }
            }
        }

        best
    }
}

/// IoU of two boxes under the pixel-inclusive convention: a box spanning
/// `x1..=x2` covers `x2 - x1 + 1` pixels.
///
/// A degenerate pair whose union term is not positive yields 0.0.
pub fn iou_inclusive(pred: &BBox, truth: &BBox) -> f64 {
    let iw = (pred.x2().min(truth.x2()) - pred.x1().max(truth.x1()) + 1.0).max(0.0);
    let ih = (pred.y2().min(truth.y2()) - pred.y1().max(truth.y1()) + 1.0).max(0.0);
    let intersection = iw * ih;

    let pred_area = (pred.x2() - pred.x1() + 1.0) * (pred.y2() - pred.y1() + 1.0);
    let truth_area = (truth.x2() - truth.x1() + 1.0) * (truth.y2() - truth.y1() + 1.0);

    let union = pred_area + truth_area - intersection;
    if union <= 0.0 {
        return 0.0;
    }

    intersection / union
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes_of(edges: &[(f64, f64, f64, f64)]) -> Boxes {
        edges
            .iter()
            .map(|&(x1, y1, x2, y2)| BBox::from_edges(x1, y1, x2, y2))
            .collect()
    }

    #[test]
    fn identical_boxes_have_full_overlap() {
        let truth = boxes_of(&[(10.0, 10.0, 20.0, 20.0)]);
        let pred = boxes_of(&[(10.0, 10.0, 20.0, 20.0)]);

        let ious = OverlapCalculator::new(&pred, &truth).ious_per_truth();
        assert_eq!(ious, vec![vec![1.0]]);
    }

    #[test]
    fn disjoint_boxes_have_zero_overlap() {
        let truth = boxes_of(&[(10.0, 10.0, 20.0, 20.0)]);
        let pred = boxes_of(&[(30.0, 30.0, 40.0, 40.0)]);

        let ious = OverlapCalculator::new(&pred, &truth).ious_per_truth();
        assert_eq!(ious, vec![vec![0.0]]);
    }

    #[test]
    fn partial_overlap_uses_inclusive_pixel_counts() {
        // Intersection is 6x6 = 36; each box covers 11x11 = 121 pixels.
        let truth = boxes_of(&[(10.0, 10.0, 20.0, 20.0)]);
        let pred = boxes_of(&[(15.0, 15.0, 25.0, 25.0)]);

        let ious = OverlapCalculator::new(&pred, &truth).ious_per_truth();
        let expected = 36.0 / (121.0 + 121.0 - 36.0);
        assert!((ious[0][0] - expected).abs() < 1e-12);
    }

    #[test]
    fn matrix_shape_is_truth_rows_by_prediction_columns() {
        let truth = boxes_of(&[(0.0, 0.0, 9.0, 9.0), (20.0, 20.0, 29.0, 29.0)]);
        let pred = boxes_of(&[
            (0.0, 0.0, 9.0, 9.0),
            (100.0, 100.0, 109.0, 109.0),
            (20.0, 20.0, 29.0, 29.0),
        ]);

        let ious = OverlapCalculator::new(&pred, &truth).ious_per_truth();
        assert_eq!(ious.len(), 2);
        assert!(ious.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn maximum_ious_takes_column_max_over_truth() {
        let truth = boxes_of(&[(0.0, 0.0, 9.0, 9.0), (5.0, 5.0, 14.0, 14.0)]);
        let pred = boxes_of(&[(5.0, 5.0, 14.0, 14.0)]);

        let calculator = OverlapCalculator::new(&pred, &truth);
        let matrix = calculator.ious_per_truth();
        let maxima = calculator.maximum_ious();

        assert_eq!(maxima.len(), 1);
        let column_max = matrix[0][0].max(matrix[1][0]);
        assert_eq!(maxima[0], column_max);
        assert_eq!(maxima[0], 1.0);
    }

    #[test]
    fn empty_sets_yield_empty_dimensions() {
        let empty = Boxes::new();
        let truth = boxes_of(&[(0.0, 0.0, 9.0, 9.0)]);

        let no_predictions = OverlapCalculator::new(&empty, &truth);
        assert_eq!(no_predictions.ious_per_truth(), vec![Vec::<f64>::new()]);
        assert!(no_predictions.maximum_ious().is_empty());

        let pred = boxes_of(&[(0.0, 0.0, 9.0, 9.0)]);
        let no_truth = OverlapCalculator::new(&pred, &empty);
        assert!(no_truth.ious_per_truth().is_empty());
        assert_eq!(no_truth.maximum_ious(), vec![0.0]);
    }

    #[test]
    fn degenerate_union_reads_as_zero() {
        // Both inclusive areas collapse to zero (x2 = x1 - 1), so the
        // denominator would be zero without the guard.
        let degenerate = boxes_of(&[(0.0, 0.0, -1.0, -1.0)]);
        let truth = boxes_of(&[(0.0, 0.0, -1.0, -1.0)]);

        let ious = OverlapCalculator::new(&degenerate, &truth).ious_per_truth();
        assert_eq!(ious[0][0], 0.0);
    }

    #[test]
    fn iou_value_is_symmetric_in_its_arguments() {
        let a = BBox::from_edges(10.0, 10.0, 20.0, 20.0);
        let b = BBox::from_edges(15.0, 15.0, 25.0, 25.0);
        assert_eq!(iou_inclusive(&a, &b), iou_inclusive(&b, &a));
    }
}
