//! Declarative draw instructions for the campus map.
//!
//! The map is described as plain rectangles, lines and labels in absolute
//! campus coordinates. Whoever materializes them (the egui window, a test)
//! never needs to look at the campus data itself.

use crate::campus::CampusDescription;
use crate::geometry::{Point, Rect};
use crate::path::types::PathPlan;

/// Inset of a building's name from its top-left corner.
const BUILDING_LABEL_INSET: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectKind {
    Building,
    Hallway,
    Classroom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Anchored at its top-left.
    Building,
    /// Centered on its position.
    Classroom,
    /// Path stop number, anchored at its top-left.
    Sequence,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        kind: RectKind,
        rect: Rect,
    },
    /// A path connector: starts at `start`, runs `length` units at `angle` radians.
    Line {
        start: Point,
        length: f64,
        angle: f64,
    },
    Label {
        kind: LabelKind,
        position: Point,
        text: String,
    },
}

impl DrawCommand {
    /// Far end of a `Line`; `None` for other commands.
    pub fn line_end(&self) -> Option<Point> {
        match self {
            DrawCommand::Line {
                start,
                length,
                angle,
            } => Some(start.project(*length, *angle)),
            _ => None,
        }
    }
}

/// Buildings, their hallways and classrooms, back to front.
pub fn campus_scene(campus: &CampusDescription) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    for (name, building) in campus.buildings() {
        let origin = building.origin();
        commands.push(DrawCommand::Rect {
            kind: RectKind::Building,
            rect: building.rect(),
        });
        commands.push(DrawCommand::Label {
            kind: LabelKind::Building,
            position: origin.offset(BUILDING_LABEL_INSET, BUILDING_LABEL_INSET),
            text: name.to_string(),
        });

        for hallway in &building.hallways {
            commands.push(DrawCommand::Rect {
                kind: RectKind::Hallway,
                rect: hallway.translated(origin),
            });
        }

        for (room, classroom) in building.classrooms() {
            let rect = classroom.rect().translated(origin);
            commands.push(DrawCommand::Rect {
                kind: RectKind::Classroom,
                rect,
            });
            commands.push(DrawCommand::Label {
                kind: LabelKind::Classroom,
                position: rect.center(),
                text: room.to_string(),
            });
        }
    }
    commands
}

/// Path connectors followed by the stop numbers, so numbers stay on top.
pub fn path_scene(plan: &PathPlan) -> Vec<DrawCommand> {
    let lines = plan.segments.iter().map(|s| DrawCommand::Line {
        start: s.start,
        length: s.length,
        angle: s.angle,
    });
    let labels = plan.annotations.iter().map(|a| DrawCommand::Label {
        kind: LabelKind::Sequence,
        position: a.position,
        text: a.label(),
    });
    lines.chain(labels).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use crate::selection::SelectedItem;

    const CAMPUS: &str = r#"
buildings:
  Library:
    x: 100
    y: 100
    width: 150
    height: 150
    hallways:
      - { x: 0, y: 70, width: 150, height: 10 }
    classrooms:
      "101": { x: 10, y: 10, width: 50, height: 50, courses: [CS101] }
  Hall:
    x: 300
    y: 100
    width: 100
    height: 100
    classrooms:
      A: { x: 10, y: 10, width: 40, height: 40, courses: [MA201] }
"#;

    fn campus() -> CampusDescription {
        CampusDescription::from_yaml_str(CAMPUS).unwrap()
    }

    #[test]
    fn campus_scene_uses_absolute_coordinates() {
        let scene = campus_scene(&campus());
        assert!(scene.contains(&DrawCommand::Rect {
            kind: RectKind::Hallway,
            rect: Rect::new(100.0, 170.0, 150.0, 10.0),
        }));
        assert!(scene.contains(&DrawCommand::Rect {
            kind: RectKind::Classroom,
            rect: Rect::new(310.0, 110.0, 40.0, 40.0),
        }));
        assert!(scene.contains(&DrawCommand::Label {
            kind: LabelKind::Classroom,
            position: Point::new(330.0, 130.0),
            text: "A".into(),
        }));
    }

    #[test]
    fn buildings_are_drawn_before_their_rooms() {
        let scene = campus_scene(&campus());
        let kinds: Vec<RectKind> = scene
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                RectKind::Building,
                RectKind::Hallway,
                RectKind::Classroom,
                RectKind::Building,
                RectKind::Classroom,
            ]
        );
    }

    #[test]
    fn path_scene_draws_lines_then_numbers() {
        let campus = campus();
        let plan = path::render(
            &[
                SelectedItem::new("CS101", "Library", "101"),
                SelectedItem::new("MA201", "Hall", "A"),
            ],
            &campus,
        )
        .unwrap();
        let scene = path_scene(&plan);
        assert_eq!(scene.len(), 3);
        assert!(matches!(scene[0], DrawCommand::Line { .. }));

        let end = scene[0].line_end().unwrap();
        assert!((end.x - 330.0).abs() < 1e-9);
        assert!((end.y - 130.0).abs() < 1e-9);

        let labels: Vec<&str> = scene
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["1", "2"]);
    }

    #[test]
    fn line_end_is_none_for_rects() {
        let cmd = DrawCommand::Rect {
            kind: RectKind::Building,
            rect: Rect::default(),
        };
        assert_eq!(cmd.line_end(), None);
    }
}
