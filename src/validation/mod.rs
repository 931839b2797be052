//! Annotation-set validation for boxmatch.
//!
//! Readers are permissive on purpose: they accept inverted or unlabeled
//! boxes so that bad data can be loaded, reported, and fixed instead of
//! failing at an arbitrary midpoint. This module is the reporting side of
//! that bargain.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::ann::AnnotationSet;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates an annotation set and returns a report of all issues found.
///
/// Checks performed:
/// - Empty or duplicate image file names
/// - Boxes with non-finite edges (NaN or Infinity)
/// - Boxes with inverted edges (negative width or height)
/// - Boxes without a label
pub fn validate_set(set: &AnnotationSet, _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    let mut seen_names: HashMap<&str, usize> = HashMap::new();

    for (image_index, image) in set.iter().enumerate() {
        if image.file_name.is_empty() {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyFileName,
                "Empty file name",
                IssueContext::Image { index: image_index },
            ));
        } else if let Some(first_index) = seen_names.get(image.file_name.as_str()) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateFileName,
                format!(
                    "Duplicate file name '{}' (first seen at index {})",
                    image.file_name, first_index
                ),
                IssueContext::Image { index: image_index },
            ));
        } else {
            seen_names.insert(image.file_name.as_str(), image_index);
        }

        for (box_index, bbox) in image.boxes.iter().enumerate() {
            let context = IssueContext::Box {
                image: image_index,
                index: box_index,
            };

            if !bbox.is_finite() {
                report.add(ValidationIssue::error(
                    IssueCode::NonFiniteBox,
                    "Box has non-finite edges",
                    context,
                ));
                continue;
            }

            if bbox.width() < 0.0 || bbox.height() < 0.0 {
                report.add(ValidationIssue::warning(
                    IssueCode::InvertedBox,
                    format!(
                        "Box has inverted edges (width {}, height {})",
                        bbox.width(),
                        bbox.height()
                    ),
                    context,
                ));
            }

            if !bbox.has_label() {
                report.add(ValidationIssue::warning(
                    IssueCode::UnlabeledBox,
                    "Box carries no label",
                    context,
                ));
            }
        }
    }

    report
}
