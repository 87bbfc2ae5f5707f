mod ordered;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::geometry::{Point, Rect};
use crate::selection::SelectedItem;

/// Errors raised while loading a campus document.
#[derive(Debug, thiserror::Error)]
pub enum CampusError {
    #[error("failed to read campus file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed campus document: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid geometry for {what}: {reason}")]
    Geometry { what: String, reason: &'static str },
}

/// The whole campus, as loaded from a YAML document. Never mutated after load.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampusDescription {
    #[serde(with = "ordered")]
    buildings: Vec<(String, Building)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Building {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Hallway rectangles, relative to the building.
    #[serde(default)]
    pub hallways: Vec<Rect>,
    #[serde(default, with = "ordered")]
    classrooms: Vec<(String, Classroom)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Classroom {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Course identifiers taught here. The same course may appear in several rooms.
    #[serde(default)]
    pub courses: Vec<String>,
}

impl CampusDescription {
    /// Parse and validate a campus document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CampusError> {
        let campus: CampusDescription = serde_yaml::from_str(yaml)?;
        campus.validate()?;
        tracing::debug!(
            buildings = campus.buildings.len(),
            classrooms = campus.classroom_count(),
            "campus parsed"
        );
        Ok(campus)
    }

    pub fn load(path: &Path) -> Result<Self, CampusError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| CampusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let campus = Self::from_yaml_str(&yaml)?;
        tracing::info!(path = %path.display(), "loaded campus");
        Ok(campus)
    }

    fn validate(&self) -> Result<(), CampusError> {
        for (name, building) in &self.buildings {
            building
                .rect()
                .validate()
                .map_err(|reason| CampusError::Geometry {
                    what: format!("building '{name}'"),
                    reason,
                })?;
            for (i, hallway) in building.hallways.iter().enumerate() {
                hallway.validate().map_err(|reason| CampusError::Geometry {
                    what: format!("hallway #{} of building '{name}'", i + 1),
                    reason,
                })?;
            }
            for (room, classroom) in &building.classrooms {
                classroom
                    .rect()
                    .validate()
                    .map_err(|reason| CampusError::Geometry {
                        what: format!("room '{room}' of building '{name}'"),
                        reason,
                    })?;
            }
        }
        Ok(())
    }

    /// Buildings in document order.
    pub fn buildings(&self) -> impl Iterator<Item = (&str, &Building)> {
        self.buildings.iter().map(|(name, b)| (name.as_str(), b))
    }

    pub fn building(&self, name: &str) -> Option<&Building> {
        self.buildings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    pub fn classroom(&self, building: &str, room: &str) -> Option<&Classroom> {
        self.building(building)?.classroom(room)
    }

    /// Absolute rectangle of a classroom on the campus map.
    pub fn classroom_rect(&self, building: &str, room: &str) -> Option<Rect> {
        let b = self.building(building)?;
        let c = b.classroom(room)?;
        Some(c.rect().translated(b.origin()))
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    pub fn classroom_count(&self) -> usize {
        self.buildings.iter().map(|(_, b)| b.classrooms.len()).sum()
    }

    /// Every (course, building, room) offering, in document order.
    ///
    /// This is the catalog the course picker is built from.
    pub fn courses(&self) -> impl Iterator<Item = SelectedItem> + '_ {
        self.buildings.iter().flat_map(|(building, b)| {
            b.classrooms.iter().flat_map(move |(room, c)| {
                c.courses
                    .iter()
                    .map(move |course| SelectedItem::new(course, building, room))
            })
        })
    }

    /// First classroom offering `course`.
    pub fn locate_course(&self, course: &str) -> Option<SelectedItem> {
        self.courses().find(|item| item.course == course)
    }

    /// Topmost classroom under an absolute map position.
    pub fn classroom_at(&self, p: Point) -> Option<(&str, &str, &Classroom)> {
        self.buildings.iter().rev().find_map(|(building, b)| {
            b.classrooms.iter().rev().find_map(|(room, c)| {
                c.rect()
                    .translated(b.origin())
                    .contains(p)
                    .then_some((building.as_str(), room.as_str(), c))
            })
        })
    }

    /// Extent of everything drawn on the map, or `None` for an empty campus.
    pub fn bounds(&self) -> Option<Rect> {
        self.buildings
            .iter()
            .flat_map(|(_, b)| {
                let origin = b.origin();
                std::iter::once(b.rect())
                    .chain(b.hallways.iter().map(move |h| h.translated(origin)))
                    .chain(b.classrooms.iter().map(move |(_, c)| c.rect().translated(origin)))
            })
            .reduce(|acc, r| acc.union(&r))
    }
}

impl Building {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Classrooms in document order.
    pub fn classrooms(&self) -> impl Iterator<Item = (&str, &Classroom)> {
        self.classrooms.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn classroom(&self, room: &str) -> Option<&Classroom> {
        self.classrooms
            .iter()
            .find(|(n, _)| n == room)
            .map(|(_, c)| c)
    }
}

impl Classroom {
    /// Rectangle relative to the owning building.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Text shown when a classroom is clicked or hovered.
    pub fn info_text(&self, building: &str, room: &str) -> String {
        format!(
            "{building} - Room {room}\nCourses: {}",
            self.courses.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
buildings:
  Library:
    x: 100
    y: 100
    width: 200
    height: 150
    hallways:
      - { x: 0, y: 70, width: 200, height: 10 }
    classrooms:
      "101":
        x: 10
        y: 10
        width: 50
        height: 50
        courses: [CS101, CS102]
      "102":
        x: 70
        y: 10
        width: 50
        height: 50
        courses: [PH100]
  Hall:
    x: 300
    y: 100
    width: 120
    height: 100
    classrooms:
      A:
        x: 5
        y: 5
        width: 40
        height: 40
        courses: [MA201, CS101]
"#;

    fn sample() -> CampusDescription {
        CampusDescription::from_yaml_str(SAMPLE).unwrap()
    }

    #[test]
    fn preserves_document_order() {
        let campus = sample();
        let names: Vec<&str> = campus.buildings().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Library", "Hall"]);

        let rooms: Vec<&str> = campus
            .building("Library")
            .unwrap()
            .classrooms()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(rooms, vec!["101", "102"]);
    }

    #[test]
    fn course_catalog_lists_every_offering() {
        let campus = sample();
        let catalog: Vec<String> = campus.courses().map(|i| i.to_string()).collect();
        assert_eq!(
            catalog,
            vec![
                "CS101 - Library, Room 101",
                "CS102 - Library, Room 101",
                "PH100 - Library, Room 102",
                "MA201 - Hall, Room A",
                "CS101 - Hall, Room A",
            ]
        );
    }

    #[test]
    fn locate_course_returns_first_offering() {
        let campus = sample();
        let item = campus.locate_course("CS101").unwrap();
        assert_eq!(item.building, "Library");
        assert_eq!(item.room, "101");
        assert!(campus.locate_course("XX999").is_none());
    }

    #[test]
    fn classroom_rect_is_absolute() {
        let campus = sample();
        assert_eq!(
            campus.classroom_rect("Hall", "A"),
            Some(Rect::new(305.0, 105.0, 40.0, 40.0))
        );
        assert_eq!(campus.classroom_rect("Hall", "B"), None);
        assert_eq!(campus.classroom_rect("Gym", "A"), None);
    }

    #[test]
    fn classroom_at_hit_tests_absolute_positions() {
        let campus = sample();
        let (building, room, _) = campus.classroom_at(Point::new(120.0, 120.0)).unwrap();
        assert_eq!((building, room), ("Library", "101"));
        assert!(campus.classroom_at(Point::new(250.0, 240.0)).is_none());
    }

    #[test]
    fn info_text_lists_courses() {
        let campus = sample();
        let c = campus.classroom("Library", "101").unwrap();
        assert_eq!(
            c.info_text("Library", "101"),
            "Library - Room 101\nCourses: CS101, CS102"
        );
    }

    #[test]
    fn bounds_cover_all_buildings() {
        let campus = sample();
        assert_eq!(campus.bounds(), Some(Rect::new(100.0, 100.0, 320.0, 150.0)));
        assert_eq!(CampusDescription::default().bounds(), None);
    }

    #[test]
    fn unquoted_numeric_room_names_are_accepted() {
        let yaml = "buildings:\n  Lab:\n    x: 0\n    y: 0\n    width: 10\n    height: 10\n    classrooms:\n      204:\n        x: 0\n        y: 0\n        width: 5\n        height: 5\n        courses: [BIO1]\n";
        let campus = CampusDescription::from_yaml_str(yaml).unwrap();
        assert!(campus.classroom("Lab", "204").is_some());
    }

    #[test]
    fn hallways_and_classrooms_default_to_empty() {
        let yaml = "buildings:\n  Shed:\n    x: 0\n    y: 0\n    width: 10\n    height: 10\n";
        let campus = CampusDescription::from_yaml_str(yaml).unwrap();
        let shed = campus.building("Shed").unwrap();
        assert!(shed.hallways.is_empty());
        assert_eq!(shed.classrooms().count(), 0);
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let yaml = "buildings:\n  Shed:\n    x: 0\n    y: 0\n    width: 10\n";
        let err = CampusDescription::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CampusError::Parse(_)));
        assert!(err.to_string().contains("height"), "{err}");
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let yaml = "buildings:\n  Shed:\n    x: 0\n    y: 0\n    width: 10\n    height: 10\n    colour: red\n";
        let err = CampusDescription::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("colour"), "{err}");
    }

    #[test]
    fn duplicate_building_is_rejected() {
        let yaml = "buildings:\n  Shed:\n    x: 0\n    y: 0\n    width: 1\n    height: 1\n  Shed:\n    x: 5\n    y: 0\n    width: 1\n    height: 1\n";
        assert!(CampusDescription::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn negative_size_is_a_geometry_error() {
        let yaml = "buildings:\n  Shed:\n    x: 0\n    y: 0\n    width: 10\n    height: 10\n    classrooms:\n      X:\n        x: 0\n        y: 0\n        width: -4\n        height: 4\n";
        let err = CampusDescription::from_yaml_str(yaml).unwrap_err();
        match err {
            CampusError::Geometry { what, .. } => assert_eq!(what, "room 'X' of building 'Shed'"),
            other => panic!("expected geometry error, got {other}"),
        }
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let yaml = "buildings:\n  Shed:\n    x: abc\n    y: 0\n    width: 10\n    height: 10\n";
        let err = CampusDescription::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CampusError::Parse(_)), "{err}");
    }

    #[test]
    fn infinite_size_is_a_geometry_error() {
        let yaml = "buildings:\n  Shed:\n    x: 0\n    y: 0\n    width: 10\n    height: 10\n    classrooms:\n      X:\n        x: 0\n        y: 0\n        width: .inf\n        height: 4\n";
        let err = CampusDescription::from_yaml_str(yaml).unwrap_err();
        match err {
            CampusError::Geometry { what, reason } => {
                assert_eq!(what, "room 'X' of building 'Shed'");
                assert_eq!(reason, "coordinates must be finite numbers");
            }
            other => panic!("expected geometry error, got {other}"),
        }
    }

    #[test]
    fn load_reports_missing_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = CampusDescription::load(&path).unwrap_err();
        assert!(matches!(err, CampusError::Read { .. }));
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn bundled_demo_campus_is_valid() {
        let campus = CampusDescription::from_yaml_str(include_str!("../../../../demos/campus.yaml"))
            .unwrap();
        assert_eq!(campus.building_count(), 3);
        assert!(campus.locate_course("MA201").is_some());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.yaml");
        std::fs::write(&path, SAMPLE).unwrap();
        let campus = CampusDescription::load(&path).unwrap();
        assert_eq!(campus.building_count(), 2);
        assert_eq!(campus.classroom_count(), 3);
    }
}
