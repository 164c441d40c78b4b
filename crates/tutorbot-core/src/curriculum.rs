//! Static CBC curriculum reference tables.

use serde::Serialize;

/// A band of CBC grade levels sharing one set of learning areas.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GradeBand {
    pub name: &'static str,
    pub grades: &'static [&'static str],
    pub learning_areas: &'static [&'static str],
}

/// A senior-school pathway and its tracks.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pathway {
    pub name: &'static str,
    pub tracks: &'static [&'static str],
}

pub const GRADE_BANDS: &[GradeBand] = &[
    GradeBand {
        name: "Pre-Primary",
        grades: &["PP1", "PP2"],
        learning_areas: &[
            "Language Activities",
            "Mathematical Activities",
            "Environmental Activities",
            "Psychomotor and Creative Activities",
            "Religious Education Activities",
        ],
    },
    GradeBand {
        name: "Lower Primary",
        grades: &["Grade 1", "Grade 2", "Grade 3"],
        learning_areas: &[
            "Literacy",
            "Kiswahili Language Activities",
            "English Language Activities",
            "Mathematical Activities",
            "Environmental Activities",
            "Hygiene and Nutrition Activities",
            "Religious Education Activities",
            "Movement and Creative Activities",
        ],
    },
    GradeBand {
        name: "Upper Primary",
        grades: &["Grade 4", "Grade 5", "Grade 6"],
        learning_areas: &[
            "English",
            "Kiswahili",
            "Mathematics",
            "Science and Technology",
            "Agriculture and Nutrition",
            "Social Studies",
            "Religious Education",
            "Creative Arts",
        ],
    },
    GradeBand {
        name: "Junior School",
        grades: &["Grade 7", "Grade 8", "Grade 9"],
        learning_areas: &[
            "English",
            "Kiswahili",
            "Mathematics",
            "Integrated Science",
            "Pre-Technical Studies",
            "Social Studies",
            "Religious Education",
            "Agriculture and Nutrition",
            "Creative Arts and Sports",
        ],
    },
    GradeBand {
        name: "Senior School",
        grades: &["Grade 10", "Grade 11", "Grade 12"],
        learning_areas: &[
            "English",
            "Kiswahili",
            "Community Service Learning",
            "Physical Education",
            "Pathway electives",
        ],
    },
];

pub const PATHWAYS: &[Pathway] = &[
    Pathway {
        name: "STEM",
        tracks: &[
            "Pure Sciences",
            "Applied Sciences",
            "Technical and Engineering",
            "Careers and Technology Studies",
        ],
    },
    Pathway {
        name: "Social Sciences",
        tracks: &[
            "Languages and Literature",
            "Humanities and Business Studies",
        ],
    },
    Pathway {
        name: "Arts and Sports Science",
        tracks: &["Performing Arts", "Visual Arts", "Sports Science"],
    },
];

/// Find the band containing a grade, matched case-insensitively.
pub fn band_for_grade(grade: &str) -> Option<&'static GradeBand> {
    let wanted = normalize(grade);
    GRADE_BANDS
        .iter()
        .find(|band| band.grades.iter().any(|g| normalize(g) == wanted))
}

/// Learning areas for a grade, or an empty slice for unknown grades.
pub fn learning_areas(grade: &str) -> &'static [&'static str] {
    band_for_grade(grade).map(|b| b.learning_areas).unwrap_or(&[])
}

pub fn pathway(name: &str) -> Option<&'static Pathway> {
    PATHWAYS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

fn normalize(grade: &str) -> String {
    grade
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
