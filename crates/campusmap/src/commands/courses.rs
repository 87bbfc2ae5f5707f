use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use crate::campus::CampusDescription;

pub fn run(file: &Path) -> anyhow::Result<()> {
    let campus = CampusDescription::load(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    println!("{}", "Available Courses:".bold());
    let mut count = 0;
    for item in campus.courses() {
        println!("  {item}");
        count += 1;
    }
    if count == 0 {
        println!("  {}", "(none)".dimmed());
    }
    Ok(())
}
