pub mod types;

#[cfg(test)]
mod tests;

use crate::campus::CampusDescription;
use crate::selection::SelectedItem;

use types::{Annotation, LABEL_OFFSET, PathPlan, RenderError, Segment};

/// Lay out the path through the selected classrooms.
///
/// Stops are visited in selection order; nothing is reordered or optimized.
/// Each stop gets a numbered annotation near its classroom's top-left corner,
/// and each consecutive pair is joined by a straight segment between the two
/// classroom centers.
///
/// # Errors
/// * `NoSelection` when `selection` is empty.
/// * `UnknownLocation` when a selected building or room is not in `campus`.
pub fn render(
    selection: &[SelectedItem],
    campus: &CampusDescription,
) -> Result<PathPlan, RenderError> {
    if selection.is_empty() {
        return Err(RenderError::NoSelection);
    }

    let annotations = selection
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<Annotation, RenderError> {
            let room = campus
                .classroom_rect(&item.building, &item.room)
                .ok_or_else(|| RenderError::UnknownLocation {
                    building: item.building.clone(),
                    room: item.room.clone(),
                })?;
            Ok(Annotation {
                number: i + 1,
                item: item.clone(),
                position: room.origin().offset(LABEL_OFFSET.0, LABEL_OFFSET.1),
                room,
                center: room.center(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let segments: Vec<Segment> = annotations
        .windows(2)
        .map(|pair| Segment::between(pair[0].center, pair[1].center))
        .collect();

    tracing::debug!(
        stops = annotations.len(),
        segments = segments.len(),
        "path rendered"
    );

    Ok(PathPlan {
        annotations,
        segments,
    })
}
