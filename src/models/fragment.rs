//! Recognized text fragments
//!
//! What the recognition engine hands back for one image: text, confidence
//! and a bounding box per fragment.

use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Vertical center, `(top + bottom) / 2`
    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// Bounding box as reported by the engine
///
/// PaddleOCR style engines report either the four corner points of a
/// quadrilateral or a flat `[x0, y0, x1, y1]` rectangle. Both are accepted.
/// Anything else (null, three-coordinate points, strings) lands in `Invalid`
/// and has no rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum RawBox {
    /// Corner points, in any order
    Points(Vec<[f64; 2]>),
    /// Flat coordinate list `[x0, y0, x1, y1, ...]`
    Flat(Vec<f64>),
    Invalid(serde_json::Value),
}

impl RawBox {
    /// Reduce the box to its axis-aligned bounding rectangle
    ///
    /// Returns None for unparseable and empty boxes, odd-length flat lists
    /// and non-finite coordinates.
    pub fn to_rect(&self) -> Option<Rect> {
        let points: Vec<(f64, f64)> = match self {
            RawBox::Points(points) => points.iter().map(|[x, y]| (*x, *y)).collect(),
            RawBox::Flat(coords) => {
                if coords.len() % 2 != 0 {
                    return None;
                }
                coords.chunks_exact(2).map(|c| (c[0], c[1])).collect()
            }
            RawBox::Invalid(_) => return None,
        };

        if points.is_empty() || points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return None;
        }

        let init = Rect {
            left: f64::INFINITY,
            top: f64::INFINITY,
            right: f64::NEG_INFINITY,
            bottom: f64::NEG_INFINITY,
        };
        Some(points.iter().fold(init, |r, &(x, y)| Rect {
            left: r.left.min(x),
            top: r.top.min(y),
            right: r.right.max(x),
            bottom: r.bottom.max(y),
        }))
    }
}

/// One recognized text unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    /// Recognition confidence, 0..1; None when the engine sent no number
    pub score: Option<f64>,
    #[serde(rename = "box")]
    pub bbox: RawBox,
}

/// Raw engine output for one image, as three parallel sequences
///
/// Field aliases accept the PaddleOCR `rec_*` names verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    #[serde(default, alias = "rec_texts")]
    pub texts: Vec<String>,
    #[serde(default, alias = "rec_scores")]
    pub scores: Vec<Option<f64>>,
    #[serde(default, alias = "rec_boxes")]
    pub boxes: Vec<RawBox>,
}

impl Recognition {
    /// Empty result, what a failed recognition degrades to
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Zip the parallel sequences into fragments, truncating to the shortest
    pub fn fragments(&self) -> Vec<Fragment> {
        self.texts
            .iter()
            .zip(&self.scores)
            .zip(&self.boxes)
            .map(|((text, score), bbox)| Fragment {
                text: text.clone(),
                score: *score,
                bbox: bbox.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_reduce_to_rect() {
        let bbox = RawBox::Points(vec![[30.0, 12.0], [10.0, 10.0], [30.0, 20.0], [10.0, 22.0]]);
        let rect = bbox.to_rect().unwrap();
        assert_eq!(rect.left, 10.0);
        assert_eq!(rect.top, 10.0);
        assert_eq!(rect.right, 30.0);
        assert_eq!(rect.bottom, 22.0);
        assert_eq!(rect.center_y(), 16.0);
    }

    #[test]
    fn test_flat_box_reduces_to_rect() {
        let rect = RawBox::Flat(vec![5.0, 100.0, 80.0, 120.0]).to_rect().unwrap();
        assert_eq!(rect.left, 5.0);
        assert_eq!(rect.center_y(), 110.0);
    }

    #[test]
    fn test_degenerate_boxes_rejected() {
        assert!(RawBox::Points(vec![]).to_rect().is_none());
        assert!(RawBox::Flat(vec![1.0, 2.0, 3.0]).to_rect().is_none());
        assert!(RawBox::Flat(vec![f64::NAN, 2.0]).to_rect().is_none());
    }

    #[test]
    fn test_recognition_accepts_paddle_field_names() {
        let json = r#"{
            "rec_texts": ["Sodio", "450"],
            "rec_scores": [0.98, 0.91],
            "rec_boxes": [[0, 0, 50, 20], [[60, 0], [90, 0], [90, 20], [60, 20]]]
        }"#;
        let rec: Recognition = serde_json::from_str(json).unwrap();
        assert_eq!(rec.texts.len(), 2);
        assert_eq!(rec.boxes[0], RawBox::Flat(vec![0.0, 0.0, 50.0, 20.0]));
        assert!(matches!(rec.boxes[1], RawBox::Points(_)));
    }

    #[test]
    fn test_fragments_truncate_to_shortest_sequence() {
        let rec = Recognition {
            texts: vec!["a".into(), "b".into(), "c".into()],
            scores: vec![Some(0.9), Some(0.9)],
            boxes: vec![RawBox::Flat(vec![0.0, 0.0, 1.0, 1.0]); 3],
        };
        assert_eq!(rec.fragments().len(), 2);
        assert!(Recognition::empty().is_empty());
    }

    #[test]
    fn test_damaged_entries_survive_decoding() {
        let json = r#"{
            "rec_texts": ["Sodio (mg)", "450", "ruido", "sin score"],
            "rec_scores": [0.99, 0.98, 0.95, null],
            "rec_boxes": [[0, 0, 90, 20], [[200, 0, 1], [230, 20, 1]], null, [10, 10, 20, 20]]
        }"#;
        let rec: Recognition = serde_json::from_str(json).unwrap();
        let fragments = rec.fragments();
        assert_eq!(fragments.len(), 4);
        assert!(fragments[0].bbox.to_rect().is_some());
        assert!(matches!(fragments[1].bbox, RawBox::Invalid(_)));
        assert!(fragments[2].bbox.to_rect().is_none());
        assert_eq!(fragments[3].score, None);
    }
}
