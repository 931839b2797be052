//! Prediction-vs-truth evaluation over paired annotation sets.
//!
//! Truth and prediction sets are paired by position: entry `i` of the
//! prediction set is compared against entry `i` of the truth set. File
//! names are reported from the truth side but not matched on.

mod report;

pub use report::{EvalReport, EvalTotals, ImageEval};

use crate::ann::AnnotationSet;
use crate::error::BoxmatchError;
use crate::geom::OverlapCalculator;

/// Options for evaluation behavior.
#[derive(Clone, Debug)]
pub struct EvalOptions {
    /// IoU a prediction's best truth overlap must reach to count as matched.
    pub iou_threshold: f64,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { iou_threshold: 0.5 }
    }
}

/// Compares a prediction set against ground truth.
///
/// Each prediction is scored by its best overlap over the image's truth
/// boxes; predictions at or above the threshold count as matched. A
/// prediction can match a truth box another prediction already matched —
/// this is a per-prediction score, not an assignment.
///
/// # Errors
/// Fails with [`BoxmatchError::ImageCountMismatch`] when the two sets have
/// different image counts.
pub fn evaluate(
    truth: &AnnotationSet,
    predictions: &AnnotationSet,
    opts: &EvalOptions,
) -> Result<EvalReport, BoxmatchError> {
    if truth.num_images() != predictions.num_images() {
        return Err(BoxmatchError::ImageCountMismatch {
            truth: truth.num_images(),
            predictions: predictions.num_images(),
        });
    }

    let mut images = Vec::with_capacity(truth.num_images());
    let mut totals = EvalTotals::default();
    let mut iou_sum = 0.0;

    for (truth_image, pred_image) in truth.iter().zip(predictions.iter()) {
        let calculator = OverlapCalculator::new(&pred_image.boxes, &truth_image.boxes);
        let best = calculator.maximum_ious();

        let matched = best
            .iter()
            .filter(|iou| **iou >= opts.iou_threshold)
            .count();
        let mean_best_iou = if best.is_empty() {
            0.0
        } else {
            best.iter().sum::<f64>() / best.len() as f64
        };

        totals.truth_boxes += truth_image.boxes.num();
        totals.predictions += best.len();
        totals.matched += matched;
        iou_sum += best.iter().sum::<f64>();

        images.push(ImageEval {
            file_name: truth_image.file_name.clone(),
            truth_count: truth_image.boxes.num(),
            prediction_count: pred_image.boxes.num(),
            matched,
            mean_best_iou,
        });
    }

    totals.images = truth.num_images();
    totals.mean_best_iou = if totals.predictions > 0 {
        iou_sum / totals.predictions as f64
    } else {
        0.0
    };

    Ok(EvalReport {
        threshold: opts.iou_threshold,
        images,
        totals,
    })
}
