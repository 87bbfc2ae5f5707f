use serde::Serialize;

use crate::geometry::{Point, Rect};
use crate::selection::SelectedItem;

/// Offset of a sequence label from the top-left corner of its classroom.
pub const LABEL_OFFSET: (f64, f64) = (2.0, 2.0);

/// A straight connector between two consecutive classroom centers.
///
/// Drawn as a zero-height rectangle of width `length`, anchored at `start` and
/// rotated by `angle` radians around that anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub length: f64,
    pub angle: f64,
}

impl Segment {
    pub fn between(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            length: start.distance_to(end),
            angle: start.angle_to(end),
        }
    }
}

/// Sequence marker for one stop of the path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// 1-based position in the visiting order.
    pub number: usize,
    pub item: SelectedItem,
    /// Where the label is drawn, in absolute map coordinates.
    pub position: Point,
    /// Absolute classroom rectangle the label belongs to.
    pub room: Rect,
    pub center: Point,
}

impl Annotation {
    pub fn label(&self) -> String {
        self.number.to_string()
    }
}

/// Everything needed to draw the path for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPlan {
    /// One per selected item, indexed like the selection.
    pub annotations: Vec<Annotation>,
    /// `annotations.len() - 1` connectors, in visiting order.
    pub segments: Vec<Segment>,
}

impl PathPlan {
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }

    /// Numbered stop list, e.g. `1. CS101 - Library, Room 101`.
    pub fn itinerary(&self) -> Vec<String> {
        self.annotations
            .iter()
            .map(|a| format!("{}. {}", a.number, a.item))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("Please select at least one course.")]
    NoSelection,
    #[error("Unknown location: {building}, Room {room}")]
    UnknownLocation { building: String, room: String },
}
