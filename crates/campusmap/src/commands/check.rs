use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use crate::campus::CampusDescription;

pub fn run(file: &Path) -> anyhow::Result<()> {
    let campus = CampusDescription::load(file)
        .with_context(|| format!("{} is not a valid campus file", file.display()))?;

    println!("{} {}", "✓".green(), file.display());
    println!(
        "  {} buildings, {} classrooms, {} course offerings",
        campus.building_count(),
        campus.classroom_count(),
        campus.courses().count(),
    );
    if let Some(bounds) = campus.bounds() {
        println!(
            "  map extent: {}x{} at {}",
            bounds.width,
            bounds.height,
            bounds.origin()
        );
    }

    for (name, building) in campus.buildings() {
        println!(
            "  {} {} hallway(s), {} room(s)",
            format!("{name}:").bold(),
            building.hallways.len(),
            building.classrooms().count(),
        );
        for (room, classroom) in building.classrooms() {
            if classroom.courses.is_empty() {
                println!("    {}", format!("room {room} has no courses").yellow());
            }
        }
    }
    Ok(())
}
