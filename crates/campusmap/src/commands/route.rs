use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use crate::campus::CampusDescription;
use crate::path::{self, types::PathPlan};
use crate::selection::SelectionTracker;

/// Select `courses` in order, each at the first classroom offering it, and
/// print the resulting path.
pub fn run(file: &Path, courses: &[String], json: bool) -> anyhow::Result<()> {
    let campus = CampusDescription::load(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let plan = plan_for(&campus, courses)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }
    Ok(())
}

fn plan_for(campus: &CampusDescription, courses: &[String]) -> anyhow::Result<PathPlan> {
    let mut tracker = SelectionTracker::new();
    for course in courses {
        let item = campus
            .locate_course(course)
            .ok_or_else(|| anyhow::anyhow!("No classroom offers course '{course}'"))?;
        tracker.select(item)?;
    }
    Ok(path::render(tracker.list(), campus)?)
}

fn print_plan(plan: &PathPlan) {
    println!("{}", "Path:".bold());
    for line in plan.itinerary() {
        println!("  {line}");
    }
    if plan.segments.is_empty() {
        return;
    }
    println!();
    for (i, segment) in plan.segments.iter().enumerate() {
        println!(
            "  {} {} -> {}  length {:.2}  angle {:.4} rad",
            format!("{}-{}", i + 1, i + 2).cyan(),
            segment.start,
            segment.end,
            segment.length,
            segment.angle,
        );
    }
    println!("  total length {:.2}", plan.total_length());
}
