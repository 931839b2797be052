//! Evaluation report types and terminal formatting.

use std::fmt;

use serde::Serialize;

/// The result of comparing a prediction set against ground truth.
#[derive(Clone, Debug, Serialize)]
pub struct EvalReport {
    /// IoU threshold a prediction must reach to count as matched.
    pub threshold: f64,
    /// One row per image pair, in file order.
    pub images: Vec<ImageEval>,
    /// Aggregates over all image pairs.
    pub totals: EvalTotals,
}

/// Per-image evaluation row.
#[derive(Clone, Debug, Serialize)]
pub struct ImageEval {
    /// File name from the ground-truth side of the pair.
    pub file_name: String,
    /// Number of ground-truth boxes.
    pub truth_count: usize,
    /// Number of predicted boxes.
    pub prediction_count: usize,
    /// Predictions whose best truth overlap reached the threshold.
    pub matched: usize,
    /// Mean best-truth IoU over predictions (0.0 with no predictions).
    pub mean_best_iou: f64,
}

/// Aggregates over all image pairs.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EvalTotals {
    pub images: usize,
    pub truth_boxes: usize,
    pub predictions: usize,
    pub matched: usize,
    /// Mean best-truth IoU over every prediction in the set.
    pub mean_best_iou: f64,
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Evaluated {} image(s) at IoU threshold {:.2}",
            self.totals.images, self.threshold
        )?;
        writeln!(f)?;

        for image in &self.images {
            writeln!(
                f,
                "  {}: {}/{} prediction(s) matched against {} truth box(es), mean best IoU {:.4}",
                image.file_name,
                image.matched,
                image.prediction_count,
                image.truth_count,
                image.mean_best_iou
            )?;
        }

        writeln!(f)?;

        let matched_pct = if self.totals.predictions > 0 {
            (self.totals.matched as f64 / self.totals.predictions as f64) * 100.0
        } else {
            0.0
        };

        writeln!(
            f,
            "Totals: {}/{} predictions matched ({:.1}%), mean best IoU {:.4}",
            self.totals.matched, self.totals.predictions, matched_pct, self.totals.mean_best_iou
        )
    }
}
