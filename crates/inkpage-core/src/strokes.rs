//! Freehand strokes and the per-page stroke store.

use crate::error::InvalidState;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// One continuous freehand ink path in content space.
///
/// Serializes as a bare array of `{x, y}` points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    /// Create a stroke starting at `point`.
    pub fn starting_at(point: Point) -> Self {
        Self {
            points: vec![point],
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Points in drawing order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Bounding box of the points, or `Rect::ZERO` when empty.
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
    }

    /// Polyline path: move to the first point, line to each following one.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter();
        if let Some(first) = points.next() {
            path.move_to(*first);
            for point in points {
                path.line_to(*point);
            }
        }
        path
    }
}

/// Ordered sealed strokes for the active page plus the stroke being drawn.
#[derive(Debug, Clone, Default)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
    current: Option<Stroke>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with previously sealed strokes.
    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self {
            strokes,
            current: None,
        }
    }

    /// Start a new current stroke at `point`.
    ///
    /// A stroke still in progress is sealed first so no ink is lost.
    pub fn begin_stroke(&mut self, point: Point) {
        if self.current.is_some() {
            log::warn!("beginning a stroke while another is in progress; sealing it");
            self.seal_current();
        }
        self.current = Some(Stroke::starting_at(point));
    }

    /// Append a point to the current stroke.
    pub fn append_to_current(&mut self, point: Point) -> Result<(), InvalidState> {
        let current = self.current.as_mut().ok_or(InvalidState::NoCurrentStroke)?;
        current.push(point);
        Ok(())
    }

    /// Move the current stroke into the sealed sequence.
    ///
    /// Returns whether a stroke was sealed.
    pub fn seal_current(&mut self) -> bool {
        match self.current.take() {
            Some(stroke) => {
                self.strokes.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Sealed strokes in drawing order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The stroke being drawn, if any.
    pub fn current(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the contents with another page's strokes, dropping any
    /// unsealed stroke.
    pub fn replace(&mut self, strokes: Vec<Stroke>) {
        if self.current.take().is_some() {
            log::warn!("discarding unsealed stroke on page switch");
        }
        self.strokes = strokes;
    }

    /// Seal any current stroke and hand out every sealed stroke, leaving the
    /// store empty.
    pub fn take(&mut self) -> Vec<Stroke> {
        self.seal_current();
        std::mem::take(&mut self.strokes)
    }
}
