//! JSON annotation reader and writer.
//!
//! The on-disk shape is a JSON array of per-image objects:
//!
//! ```json
//! [
//!   {
//!     "boxes": [ { "cx": 15.0, "cy": 25.0, "w": 10.0, "h": 20.0, "label": 3 } ],
//!     "filename": "1.png"
//!   }
//! ]
//! ```
//!
//! Two box schemas exist in the wild: digit-dataset exports keyed as
//! `{top, left, width, height, label}` and the tool's own writer format
//! keyed as `{cx, cy, w, h, label}`. The reader does not guess; the caller
//! selects a [`BoxFieldMapper`] (usually through [`BoxSchema`]) and every
//! box in the file must match it.
//!
//! The writer always emits the center+size schema, pretty-printed.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::{AnnotationSet, ImageAnnotation};
use crate::error::BoxmatchError;
use crate::geom::{BBox, BBoxParts, Boxes};

// ============================================================================
// Box schemas and mappers
// ============================================================================

/// Maps one raw JSON box object onto box construction parameters.
///
/// Implementations correspond to on-disk box schemas. The trait boundary
/// keeps schema knowledge out of the reader loop: readers call
/// [`BoxFieldMapper::box_parts`] per raw value and build boxes from the
/// result.
pub trait BoxFieldMapper {
    /// The schema name, used in error messages and CLI help.
    fn schema_name(&self) -> &'static str;

    /// Maps a raw JSON box value onto construction parameters.
    ///
    /// # Errors
    /// Fails with [`BoxmatchError::BoxSchemaMismatch`] when the value does
    /// not carry the schema's keys.
    fn box_parts(&self, raw: &serde_json::Value) -> Result<BBoxParts, BoxmatchError>;
}

/// Boxes keyed as `{top, left, width, height, label}` (edge+length per axis).
#[derive(Clone, Copy, Debug, Default)]
pub struct CornerSizeMapper;

/// Boxes keyed as `{cx, cy, w, h, label}` (center+length per axis).
#[derive(Clone, Copy, Debug, Default)]
pub struct CenterSizeMapper;

/// Raw corner+size box as it appears on disk.
///
/// Labels are read as floats: older writers serialized numeric arrays
/// wholesale, so `"label": 3.0` is common.
#[derive(Debug, Deserialize)]
struct CornerSizeBox {
    top: f64,
    left: f64,
    width: f64,
    height: f64,
    label: f64,
}

/// Raw center+size box as it appears on disk.
#[derive(Debug, Deserialize)]
struct CenterSizeBox {
    cx: f64,
    cy: f64,
    w: f64,
    h: f64,
    label: f64,
}

impl BoxFieldMapper for CornerSizeMapper {
    fn schema_name(&self) -> &'static str {
        "corner-size"
    }

    fn box_parts(&self, raw: &serde_json::Value) -> Result<BBoxParts, BoxmatchError> {
        let raw: CornerSizeBox = serde_json::from_value(raw.clone()).map_err(|source| {
            BoxmatchError::BoxSchemaMismatch {
                schema: self.schema_name(),
                message: source.to_string(),
            }
        })?;

        Ok(BBoxParts {
            y1: Some(raw.top),
            x1: Some(raw.left),
            w: Some(raw.width),
            h: Some(raw.height),
            label: Some(raw.label as i64),
            ..Default::default()
        })
    }
}

impl BoxFieldMapper for CenterSizeMapper {
    fn schema_name(&self) -> &'static str {
        "center-size"
    }

    fn box_parts(&self, raw: &serde_json::Value) -> Result<BBoxParts, BoxmatchError> {
        let raw: CenterSizeBox = serde_json::from_value(raw.clone()).map_err(|source| {
            BoxmatchError::BoxSchemaMismatch {
                schema: self.schema_name(),
                message: source.to_string(),
            }
        })?;

        Ok(BBoxParts {
            cx: Some(raw.cx),
            cy: Some(raw.cy),
            w: Some(raw.w),
            h: Some(raw.h),
            label: Some(raw.label as i64),
            ..Default::default()
        })
    }
}

/// A named box schema, selectable from CLI arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxSchema {
    /// `{top, left, width, height, label}`
    CornerSize,
    /// `{cx, cy, w, h, label}`
    CenterSize,
}

impl BoxSchema {
    /// Returns the mapper implementing this schema.
    pub fn mapper(self) -> &'static dyn BoxFieldMapper {
        match self {
            BoxSchema::CornerSize => &CornerSizeMapper,
            BoxSchema::CenterSize => &CenterSizeMapper,
        }
    }

    /// The schema's CLI name.
    pub const fn as_str(self) -> &'static str {
        match self {
            BoxSchema::CornerSize => "corner-size",
            BoxSchema::CenterSize => "center-size",
        }
    }
}

impl FromStr for BoxSchema {
    type Err = BoxmatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corner-size" | "corner" => Ok(BoxSchema::CornerSize),
            "center-size" | "center" => Ok(BoxSchema::CenterSize),
            other => Err(BoxmatchError::UnsupportedSchema(format!(
                "'{}' (supported: corner-size, center-size)",
                other
            ))),
        }
    }
}

// ============================================================================
// On-disk shapes
// ============================================================================

/// Per-image entry as read from disk. Box objects stay raw until the
/// selected mapper interprets them.
#[derive(Debug, Deserialize)]
struct JsonImage {
    boxes: Vec<serde_json::Value>,
    filename: String,
}

/// Per-box entry as written to disk (always center+size).
#[derive(Debug, Serialize)]
struct CenterSizeBoxOut {
    cx: f64,
    cy: f64,
    w: f64,
    h: f64,
    label: i64,
}

/// Per-image entry as written to disk.
#[derive(Debug, Serialize)]
struct JsonImageOut {
    boxes: Vec<CenterSizeBoxOut>,
    filename: String,
}

// ============================================================================
// Public API
// ============================================================================

/// Reads an annotation set from a JSON file.
///
/// # Arguments
/// * `path` - Path to the JSON file
/// * `mapper` - Box schema the file's boxes must match
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if any box
/// fails the schema or axis-parameterization checks.
pub fn read_annotation_json(
    path: &Path,
    mapper: &dyn BoxFieldMapper,
) -> Result<AnnotationSet, BoxmatchError> {
    let file = File::open(path).map_err(BoxmatchError::Io)?;
    let reader = BufReader::new(file);

    let raw: Vec<JsonImage> =
        serde_json::from_reader(reader).map_err(|source| BoxmatchError::AnnotationJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    build_set(raw, mapper, path)
}

/// Reads an annotation set from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_annotation_json_str(
    json: &str,
    mapper: &dyn BoxFieldMapper,
) -> Result<AnnotationSet, BoxmatchError> {
    let raw: Vec<JsonImage> =
        serde_json::from_str(json).map_err(|source| BoxmatchError::AnnotationJsonParse {
            path: PathBuf::from("<memory>"),
            source,
        })?;

    build_set(raw, mapper, Path::new("<memory>"))
}

/// Reads an annotation set from raw bytes.
pub fn from_annotation_json_slice(
    bytes: &[u8],
    mapper: &dyn BoxFieldMapper,
) -> Result<AnnotationSet, BoxmatchError> {
    let raw: Vec<JsonImage> =
        serde_json::from_slice(bytes).map_err(|source| BoxmatchError::AnnotationJsonParse {
            path: PathBuf::from("<memory>"),
            source,
        })?;

    build_set(raw, mapper, Path::new("<memory>"))
}

/// Writes an annotation set as center+size JSON.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_annotation_json(path: &Path, set: &AnnotationSet) -> Result<(), BoxmatchError> {
    let file = File::create(path).map_err(BoxmatchError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &to_json_images(set)).map_err(|source| {
        BoxmatchError::AnnotationJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Writes an annotation set to a center+size JSON string.
///
/// Useful for testing without file I/O.
pub fn to_annotation_json_string(set: &AnnotationSet) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_json_images(set))
}

fn build_set(
    raw: Vec<JsonImage>,
    mapper: &dyn BoxFieldMapper,
    path: &Path,
) -> Result<AnnotationSet, BoxmatchError> {
    let mut set = AnnotationSet::new();

    for image in raw {
        let mut boxes = Boxes::new();

        for (index, value) in image.boxes.iter().enumerate() {
            let bbox = mapper
                .box_parts(value)
                .and_then(BBox::from_parts)
                .map_err(|source| BoxmatchError::AnnotationBox {
                    path: path.to_path_buf(),
                    file_name: image.filename.clone(),
                    index,
                    source: Box::new(source),
                })?;

            boxes.add_box(bbox);
        }

        set.push(ImageAnnotation::new(image.filename, boxes));
    }

    Ok(set)
}

fn to_json_images(set: &AnnotationSet) -> Vec<JsonImageOut> {
    set.iter()
        .map(|image| JsonImageOut {
            boxes: image
                .boxes
                .iter()
                .map(|bbox| CenterSizeBoxOut {
                    cx: bbox.center_x(),
                    cy: bbox.center_y(),
                    w: bbox.width(),
                    h: bbox.height(),
                    label: bbox.label(),
                })
                .collect(),
            filename: image.file_name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::BoxField;

    const CENTER_JSON: &str = r#"[
        {
            "boxes": [
                { "cx": 15.0, "cy": 25.0, "w": 10.0, "h": 20.0, "label": 3 },
                { "cx": 40.0, "cy": 40.0, "w": 20.0, "h": 20.0, "label": 7.0 }
            ],
            "filename": "1.png"
        },
        {
            "boxes": [],
            "filename": "2.png"
        }
    ]"#;

    const CORNER_JSON: &str = r#"[
        {
            "boxes": [
                { "top": 15.0, "left": 10.0, "width": 10.0, "height": 20.0, "label": 2 }
            ],
            "filename": "1.png"
        }
    ]"#;

    #[test]
    fn reads_center_size_schema() {
        let set = from_annotation_json_str(CENTER_JSON, &CenterSizeMapper).expect("parse");
        assert_eq!(set.num_images(), 2);
        assert_eq!(set.num_boxes(), 2);

        let first = set.images[0].boxes.get(0).expect("first box");
        assert_eq!(first.x1(), 10.0);
        assert_eq!(first.x2(), 20.0);
        assert_eq!(first.y1(), 15.0);
        assert_eq!(first.y2(), 35.0);
        assert_eq!(first.label(), 3);

        // Float-typed labels are accepted.
        let second = set.images[0].boxes.get(1).expect("second box");
        assert_eq!(second.label(), 7);
    }

    #[test]
    fn reads_corner_size_schema() {
        let set = from_annotation_json_str(CORNER_JSON, &CornerSizeMapper).expect("parse");

        let bbox = set.images[0].boxes.get(0).expect("box");
        assert_eq!(
            bbox.get_pos(&[BoxField::X1, BoxField::Y1, BoxField::X2, BoxField::Y2]),
            vec![10.0, 15.0, 20.0, 35.0]
        );
        assert_eq!(bbox.label(), 2);
    }

    #[test]
    fn schema_mismatch_names_image_and_box() {
        let err = from_annotation_json_str(CORNER_JSON, &CenterSizeMapper).unwrap_err();
        match err {
            BoxmatchError::AnnotationBox {
                file_name, index, ..
            } => {
                assert_eq!(file_name, "1.png");
                assert_eq!(index, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn writer_emits_center_size_schema() {
        let set = from_annotation_json_str(CORNER_JSON, &CornerSizeMapper).expect("parse");
        let json = to_annotation_json_string(&set).expect("serialize");

        assert!(json.contains("\"cx\""));
        assert!(json.contains("\"filename\": \"1.png\""));
        assert!(!json.contains("\"top\""));
    }

    #[test]
    fn write_read_roundtrip_preserves_center_fields() {
        let original = from_annotation_json_str(CENTER_JSON, &CenterSizeMapper).expect("parse");
        let json = to_annotation_json_string(&original).expect("serialize");
        let restored = from_annotation_json_str(&json, &CenterSizeMapper).expect("reparse");

        assert_eq!(restored.num_images(), original.num_images());
        assert_eq!(restored.num_boxes(), original.num_boxes());

        let keys = [BoxField::Cx, BoxField::Cy, BoxField::W, BoxField::H];
        for (image, restored_image) in original.iter().zip(restored.iter()) {
            assert_eq!(image.file_name, restored_image.file_name);
            assert_eq!(image.boxes.get_pos(&keys), restored_image.boxes.get_pos(&keys));
        }
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = from_annotation_json_str("{not json", &CenterSizeMapper).unwrap_err();
        assert!(matches!(err, BoxmatchError::AnnotationJsonParse { .. }));
    }

    #[test]
    fn schema_names_parse_from_cli_strings() {
        assert_eq!(
            "corner-size".parse::<BoxSchema>().unwrap(),
            BoxSchema::CornerSize
        );
        assert_eq!(
            "center".parse::<BoxSchema>().unwrap(),
            BoxSchema::CenterSize
        );
        assert!("yolo".parse::<BoxSchema>().is_err());
    }
}
