//! Persisted page record: a photo plus the ink drawn on it.

use crate::strokes::Stroke;
use serde::{Deserialize, Serialize};

/// One annotated photo as stored by the page backend.
///
/// `image` is an opaque self-contained encoding (usually a base64 data URL).
/// `strokes` is `null` or absent until something has been drawn; points are
/// in content space so they survive any later zoom level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub image: String,
    #[serde(default)]
    pub strokes: Option<Vec<Stroke>>,
}

impl Page {
    /// A page with no annotation yet.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            strokes: None,
        }
    }

    /// Set the strokes. An empty list is stored as "no annotation".
    pub fn with_strokes(mut self, strokes: Vec<Stroke>) -> Self {
        self.strokes = (!strokes.is_empty()).then_some(strokes);
        self
    }

    /// Sealed strokes, empty when none were recorded.
    pub fn strokes(&self) -> &[Stroke] {
        self.strokes.as_deref().unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_null_and_absent_strokes() {
        let null = Page::from_json(r#"{"image":"data:x","strokes":null}"#).unwrap();
        let absent = Page::from_json(r#"{"image":"data:x"}"#).unwrap();
        assert_eq!(null, absent);
        assert!(null.strokes().is_empty());
    }

    #[test]
    fn test_parses_nested_point_arrays() {
        let json = r#"{"image":"abc","strokes":[[{"x":1,"y":2},{"x":3.5,"y":4}],[{"x":0,"y":0}]]}"#;
        let page = Page::from_json(json).unwrap();

        assert_eq!(page.strokes().len(), 2);
        assert_eq!(
            page.strokes()[0].points(),
            &[Point::new(1.0, 2.0), Point::new(3.5, 4.0)]
        );
    }

    #[test]
    fn test_json_layout() {
        let page =
            Page::new("img").with_strokes(vec![Stroke::from_points(vec![Point::new(1.0, 2.0)])]);
        assert_eq!(
            page.to_json().unwrap(),
            r#"{"image":"img","strokes":[[{"x":1.0,"y":2.0}]]}"#
        );
        assert_eq!(Page::new("img").to_json().unwrap(), r#"{"image":"img","strokes":null}"#);
    }

    #[test]
    fn test_empty_strokes_stored_as_none() {
        assert_eq!(Page::new("img").with_strokes(Vec::new()).strokes, None);
    }

    #[test]
    fn test_corrupt_json_is_error() {
        assert!(Page::from_json(r#"{"image": 5}"#).is_err());
    }
}
