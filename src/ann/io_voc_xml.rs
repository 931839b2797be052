//! Pascal VOC XML reader.
//!
//! Parses the `<annotation><object><name>/<bndbox>` layout into string
//! labels and raw integer edges. This reader stays independent of the box
//! model: VOC labels are free-form class names, not the integer labels the
//! JSON annotation schemas carry, so the caller decides how (and whether)
//! to bridge them.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;
use walkdir::WalkDir;

use crate::error::BoxmatchError;

const VOC_XML_EXTENSION: &str = "xml";

/// One `<object>` entry: a class name plus pixel edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocObject {
    pub name: String,
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl VocObject {
    /// Returns the edges as `[xmin, ymin, xmax, ymax]`.
    pub fn edges(&self) -> [i64; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }
}

/// One parsed VOC XML file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocAnnotation {
    /// The `<filename>` of the annotated image.
    pub file_name: String,

    /// All `<object>` entries, in document order.
    pub objects: Vec<VocObject>,
}

impl VocAnnotation {
    /// Returns the object class names, in document order.
    pub fn labels(&self) -> Vec<&str> {
        self.objects.iter().map(|obj| obj.name.as_str()).collect()
    }

    /// Returns the object edges as `[xmin, ymin, xmax, ymax]` rows.
    pub fn edges(&self) -> Vec<[i64; 4]> {
        self.objects.iter().map(VocObject::edges).collect()
    }
}

/// Reads one VOC XML file.
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse as a VOC
/// annotation document.
pub fn read_voc_xml(path: &Path) -> Result<VocAnnotation, BoxmatchError> {
    let xml = fs::read_to_string(path).map_err(BoxmatchError::Io)?;
    parse_voc_xml_str(&xml, path)
}

/// Parses VOC XML from a UTF-8 string.
///
/// Useful for testing parse behavior in-memory.
pub fn from_voc_xml_str(xml: &str) -> Result<VocAnnotation, BoxmatchError> {
    parse_voc_xml_str(xml, Path::new("<memory>"))
}

/// Parses VOC XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<VocAnnotation, BoxmatchError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| BoxmatchError::VocXmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_voc_xml_str(xml)
}

/// Reads every `.xml` file under a directory, sorted by relative path.
///
/// # Errors
/// Returns an error on traversal failures or if any file fails to parse.
pub fn read_voc_dir(dir: &Path) -> Result<Vec<VocAnnotation>, BoxmatchError> {
    let mut xml_files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|source| BoxmatchError::VocXmlParse {
            path: dir.to_path_buf(),
            message: format!("failed while traversing annotation directory: {source}"),
        })?;

        if entry.file_type().is_file() && has_xml_extension(entry.path()) {
            xml_files.push(entry.path().to_path_buf());
        }
    }

    xml_files.sort_by_cached_key(|path| rel_string(dir, path));

    let mut annotations = Vec::with_capacity(xml_files.len());
    for path in xml_files {
        annotations.push(read_voc_xml(&path)?);
    }

    Ok(annotations)
}

fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<VocAnnotation, BoxmatchError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| BoxmatchError::VocXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let annotation = document.root_element();
    if annotation.tag_name().name() != "annotation" {
        return Err(BoxmatchError::VocXmlParse {
            path: path.to_path_buf(),
            message: "missing <annotation> root element".to_string(),
        });
    }

    let file_name = required_child_text(annotation, "filename", path, "<annotation>")?;

    let mut objects = Vec::new();
    for object in annotation
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let name = required_child_text(object, "name", path, "<object>")?;
        let bndbox = required_child_element(object, "bndbox", path, "<object>")?;

        let xmin = parse_required_i64(bndbox, "xmin", path, "<bndbox>")?;
        let ymin = parse_required_i64(bndbox, "ymin", path, "<bndbox>")?;
        let xmax = parse_required_i64(bndbox, "xmax", path, "<bndbox>")?;
        let ymax = parse_required_i64(bndbox, "ymax", path, "<bndbox>")?;

        objects.push(VocObject {
            name,
            xmin,
            ymin,
            xmax,
            ymax,
        });
    }

    Ok(VocAnnotation { file_name, objects })
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, BoxmatchError> {
    child_element(node, tag).ok_or_else(|| BoxmatchError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, BoxmatchError> {
    optional_child_text(node, tag).ok_or_else(|| BoxmatchError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn parse_required_i64(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<i64, BoxmatchError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<i64>().map_err(|_| BoxmatchError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected integer"),
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(VOC_XML_EXTENSION))
        .unwrap_or(false)
}

fn rel_string(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<annotation>
  <filename>000005.jpg</filename>
  <size>
    <width>500</width>
    <height>375</height>
    <depth>3</depth>
  </size>
  <object>
    <name>chair</name>
    <bndbox>
      <xmin>263</xmin>
      <ymin>211</ymin>
      <xmax>324</xmax>
      <ymax>339</ymax>
    </bndbox>
  </object>
  <object>
    <name>chair</name>
    <bndbox>
      <xmin>165</xmin>
      <ymin>264</ymin>
      <xmax>253</xmax>
      <ymax>372</ymax>
    </bndbox>
  </object>
</annotation>"#;

    #[test]
    fn parses_filename_labels_and_edges() {
        let parsed = from_voc_xml_str(SAMPLE_XML).expect("parse xml");

        assert_eq!(parsed.file_name, "000005.jpg");
        assert_eq!(parsed.labels(), vec!["chair", "chair"]);
        assert_eq!(
            parsed.edges(),
            vec![[263, 211, 324, 339], [165, 264, 253, 372]]
        );
    }

    #[test]
    fn object_free_annotation_parses_empty() {
        let xml = r#"<annotation><filename>a.jpg</filename></annotation>"#;
        let parsed = from_voc_xml_str(xml).expect("parse xml");
        assert!(parsed.objects.is_empty());
    }

    #[test]
    fn wrong_root_element_is_rejected() {
        let err = from_voc_xml_str("<notes><filename>a.jpg</filename></notes>").unwrap_err();
        assert!(matches!(err, BoxmatchError::VocXmlParse { .. }));
    }

    #[test]
    fn missing_bndbox_edge_is_rejected() {
        let xml = r#"<annotation>
  <filename>a.jpg</filename>
  <object>
    <name>cat</name>
    <bndbox><xmin>1</xmin><ymin>2</ymin><xmax>3</xmax></bndbox>
  </object>
</annotation>"#;
        let err = from_voc_xml_str(xml).unwrap_err();
        match err {
            BoxmatchError::VocXmlParse { message, .. } => {
                assert!(message.contains("ymax"), "message was: {message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_integer_edge_is_rejected() {
        let xml = r#"<annotation>
  <filename>a.jpg</filename>
  <object>
    <name>cat</name>
    <bndbox><xmin>1.5</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox>
  </object>
</annotation>"#;
        assert!(from_voc_xml_str(xml).is_err());
    }

    #[test]
    fn read_voc_dir_sorts_by_relative_path() {
        let temp = tempfile::tempdir().expect("create temp dir");

        let write_xml = |name: &str, file: &str| {
            let xml = format!("<annotation><filename>{file}</filename></annotation>");
            fs::write(temp.path().join(name), xml).expect("write xml");
        };

        write_xml("b.xml", "img_b.jpg");
        write_xml("a.xml", "img_a.jpg");
        fs::write(temp.path().join("notes.txt"), "ignored").expect("write txt");

        let parsed = read_voc_dir(temp.path()).expect("read dir");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].file_name, "img_a.jpg");
        assert_eq!(parsed[1].file_name, "img_b.jpg");
    }
}
