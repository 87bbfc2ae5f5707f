use std::fmt;

use serde::Serialize;

/// Most courses a student can have selected at once.
pub const MAX_SELECTIONS: usize = 6;

/// A course together with the classroom it is taught in.
///
/// Identity is the course id: a course can be selected at most once, no matter
/// how many classrooms offer it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectedItem {
    pub course: String,
    pub building: String,
    pub room: String,
}

impl SelectedItem {
    pub fn new(
        course: impl Into<String>,
        building: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            course: course.into(),
            building: building.into(),
            room: room.into(),
        }
    }
}

impl fmt::Display for SelectedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}, Room {}", self.course, self.building, self.room)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("You can only select up to {capacity} courses.")]
    CapacityExceeded { capacity: usize },
    #[error("{course} is already selected.")]
    AlreadySelected { course: String },
}

/// Ordered set of selected courses, bounded by a fixed capacity.
///
/// Insertion order is the visiting order of the drawn path.
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    items: Vec<SelectedItem>,
    capacity: usize,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SELECTIONS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `item` to the selection.
    ///
    /// A course that is already selected is rejected with `AlreadySelected` and
    /// leaves the list untouched. A full list rejects with `CapacityExceeded`; the
    /// caller is responsible for reverting whatever UI state triggered the call.
    pub fn select(&mut self, item: SelectedItem) -> Result<(), SelectionError> {
        if self.contains(&item.course) {
            return Err(SelectionError::AlreadySelected { course: item.course });
        }
        if self.is_full() {
            tracing::debug!(course = %item.course, "selection full");
            return Err(SelectionError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        tracing::debug!(course = %item.course, building = %item.building, room = %item.room, "selected");
        self.items.push(item);
        Ok(())
    }

    /// Remove the course if selected. Returns the removed item.
    pub fn deselect(&mut self, course: &str) -> Option<SelectedItem> {
        let idx = self.items.iter().position(|i| i.course == course)?;
        tracing::debug!(course, "deselected");
        Some(self.items.remove(idx))
    }

    pub fn list(&self) -> &[SelectedItem] {
        &self.items
    }

    pub fn contains(&self, course: &str) -> bool {
        self.items.iter().any(|i| i.course == course)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
