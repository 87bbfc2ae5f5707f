
use super::render;
use super::types::{PathPlan, Segment};
use crate::campus::CampusDescription;
use crate::geometry::Point;
use crate::selection::SelectedItem;

/// Library at (100,100) with room 101; Hall at (300,100) with room A;
/// Annex at (100,300) with rooms B1 and B2.
const CAMPUS: &str = r#"
buildings:
  Library:
    x: 100
    y: 100
    width: 150
    height: 120
    hallways:
      - { x: 0, y: 65, width: 150, height: 10 }
    classrooms:
      "101": { x: 10, y: 10, width: 50, height: 50, courses: [CS101, PH100] }
  Hall:
    x: 300
    y: 100
    width: 100
    height: 100
    classrooms:
      A: { x: 5, y: 5, width: 40, height: 40, courses: [MA201] }
  Annex:
    x: 100
    y: 300
    width: 200
    height: 80
    classrooms:
      B1: { x: 0, y: 0, width: 20, height: 20, courses: [EN110] }
      B2: { x: 100, y: 40, width: 60, height: 40, courses: [HI120, CS101] }
"#;

fn campus() -> CampusDescription {
    CampusDescription::from_yaml_str(CAMPUS).unwrap()
}

/// Helper to create a SelectedItem.
fn item(course: &str, building: &str, room: &str) -> SelectedItem {
    SelectedItem::new(course, building, room)
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}

/// Assert a segment joins `from` to `to` with Euclidean length and atan2 angle.
fn assert_segment(segment: &Segment, from: Point, to: Point) {
    assert_eq!(segment.start, from);
    assert_eq!(segment.end, to);
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    assert_close(segment.length, (dx * dx + dy * dy).sqrt(), 1e-9);
    assert_close(segment.angle, dy.atan2(dx), 1e-12);
}

fn render_ok(selection: &[SelectedItem]) -> PathPlan {
    match render(selection, &campus()) {
        Ok(plan) => plan,
        Err(e) => panic!("render failed: {e}"),
    }
}
