use crate::campus::CampusDescription;
use crate::path::{self, types::PathPlan};
use crate::selection::{SelectedItem, SelectionTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// A message for the user. The UI decides how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }
}

/// Result of a checkbox toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Whether the checkbox should end up in the requested state.
    /// `false` means the UI must revert it.
    pub accepted: bool,
    pub notice: Option<Notice>,
}

impl ToggleOutcome {
    fn accepted() -> Self {
        Self {
            accepted: true,
            notice: None,
        }
    }

    fn rejected(notice: Notice) -> Self {
        Self {
            accepted: false,
            notice: Some(notice),
        }
    }
}

/// State behind one open campus map: the campus, the selection and the path
/// currently on screen.
pub struct Session {
    campus: CampusDescription,
    tracker: SelectionTracker,
    plan: Option<PathPlan>,
}

impl Session {
    pub fn new(campus: CampusDescription) -> Self {
        Self {
            campus,
            tracker: SelectionTracker::new(),
            plan: None,
        }
    }

    pub fn campus(&self) -> &CampusDescription {
        &self.campus
    }

    pub fn selection(&self) -> &[SelectedItem] {
        self.tracker.list()
    }

    pub fn capacity(&self) -> usize {
        self.tracker.capacity()
    }

    /// Whether this exact offering (course in this room) is selected.
    pub fn is_selected(&self, item: &SelectedItem) -> bool {
        self.tracker.list().contains(item)
    }

    /// The path on screen, if one has been requested.
    pub fn plan(&self) -> Option<&PathPlan> {
        self.plan.as_ref()
    }

    /// Handle a course checkbox changing to `checked`.
    pub fn on_toggle(
        &mut self,
        course: &str,
        building: &str,
        room: &str,
        checked: bool,
    ) -> ToggleOutcome {
        if checked {
            if let Err(e) = self
                .tracker
                .select(SelectedItem::new(course, building, room))
            {
                return ToggleOutcome::rejected(Notice::warning(e.to_string()));
            }
        } else if self.tracker.deselect(course).is_none() {
            return ToggleOutcome::accepted();
        }
        self.refresh_plan();
        ToggleOutcome::accepted()
    }

    /// Compute the path for the current selection and keep it on screen.
    pub fn on_recompute_requested(&mut self) -> Result<&PathPlan, Notice> {
        match path::render(self.tracker.list(), &self.campus) {
            Ok(plan) => Ok(&*self.plan.insert(plan)),
            Err(e) => {
                self.plan = None;
                Err(Notice::warning(e.to_string()))
            }
        }
    }

    /// Drop every selection and the path.
    pub fn clear(&mut self) {
        self.tracker.clear();
        self.plan = None;
    }

    /// Room details, as shown when a classroom is clicked.
    pub fn classroom_info(&self, building: &str, room: &str) -> Option<Notice> {
        self.campus
            .classroom(building, room)
            .map(|c| Notice::info(c.info_text(building, room)))
    }

    /// A path on screen follows every change to the selection.
    fn refresh_plan(&mut self) {
        if self.plan.is_none() {
            return;
        }
        if self.tracker.is_empty() {
            self.plan = None;
            return;
        }
        self.plan = match path::render(self.tracker.list(), &self.campus) {
            Ok(plan) => Some(plan),
            Err(e) => {
                tracing::debug!(error = %e, "dropping path");
                None
            }
        };
    }
}
