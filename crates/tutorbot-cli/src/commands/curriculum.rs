//! The `tutorbot curriculum` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use tutorbot_core::curriculum::{self, GRADE_BANDS, PATHWAYS};

pub fn execute(grade: Option<String>, pathways: bool) -> Result<()> {
    if let Some(grade) = grade {
        let band = curriculum::band_for_grade(&grade)
            .ok_or_else(|| anyhow::anyhow!("unknown grade: {grade}"))?;
        println!("{} ({})", grade.trim(), band.name);
        for area in band.learning_areas {
            println!("  - {area}");
        }
        return Ok(());
    }

    if pathways {
        let mut table = Table::new();
        table.set_header(vec!["Pathway", "Tracks"]);
        for p in PATHWAYS {
            table.add_row(vec![Cell::new(p.name), Cell::new(p.tracks.join(", "))]);
        }
        println!("{table}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Level", "Grades", "Learning areas"]);
    for band in GRADE_BANDS {
        table.add_row(vec![
            Cell::new(band.name),
            Cell::new(band.grades.join(", ")),
            Cell::new(band.learning_areas.len()),
        ]);
    }
    println!("{table}");
    println!("\nUse --grade <grade> for learning areas or --pathways for senior school pathways.");
    Ok(())
}
