//! RIASEC career-interest profiling.
//!
//! Interest questions carry a RIASEC type as their category. Summing the
//! scores per type gives the learner's interest profile; the top three types
//! form the Holland code used for pathway guidance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Answers, Question, Source};

/// One of the six Holland interest types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiasecType {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl RiasecType {
    /// All types in canonical R-I-A-S-E-C order.
    pub const ALL: [RiasecType; 6] = [
        RiasecType::Realistic,
        RiasecType::Investigative,
        RiasecType::Artistic,
        RiasecType::Social,
        RiasecType::Enterprising,
        RiasecType::Conventional,
    ];

    pub fn letter(self) -> char {
        match self {
            RiasecType::Realistic => 'R',
            RiasecType::Investigative => 'I',
            RiasecType::Artistic => 'A',
            RiasecType::Social => 'S',
            RiasecType::Enterprising => 'E',
            RiasecType::Conventional => 'C',
        }
    }

    /// Senior-school pathway this type leans towards.
    pub fn suggested_pathway(self) -> &'static str {
        match self {
            RiasecType::Realistic | RiasecType::Investigative => "STEM",
            RiasecType::Artistic => "Arts and Sports Science",
            RiasecType::Social | RiasecType::Enterprising | RiasecType::Conventional => {
                "Social Sciences"
            }
        }
    }

    pub fn example_careers(self) -> &'static [&'static str] {
        match self {
            RiasecType::Realistic => &["Mechanical technician", "Agronomist", "Electrician"],
            RiasecType::Investigative => &["Medical doctor", "Software engineer", "Lab scientist"],
            RiasecType::Artistic => &["Graphic designer", "Musician", "Journalist"],
            RiasecType::Social => &["Teacher", "Nurse", "Counsellor"],
            RiasecType::Enterprising => &["Entrepreneur", "Lawyer", "Sales manager"],
            RiasecType::Conventional => &["Accountant", "Banker", "Records officer"],
        }
    }
}

impl fmt::Display for RiasecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiasecType::Realistic => "realistic",
            RiasecType::Investigative => "investigative",
            RiasecType::Artistic => "artistic",
            RiasecType::Social => "social",
            RiasecType::Enterprising => "enterprising",
            RiasecType::Conventional => "conventional",
        };
        f.write_str(name)
    }
}

impl FromStr for RiasecType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "realistic" | "r" => Ok(RiasecType::Realistic),
            "investigative" | "i" => Ok(RiasecType::Investigative),
            "artistic" | "a" => Ok(RiasecType::Artistic),
            "social" | "s" => Ok(RiasecType::Social),
            "enterprising" | "e" => Ok(RiasecType::Enterprising),
            "conventional" | "c" => Ok(RiasecType::Conventional),
            other => Err(format!("unknown RIASEC type: {other}")),
        }
    }
}

/// Summed interest scores per RIASEC type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterestProfile {
    /// `(type, total score, answered count)` in canonical order.
    pub totals: Vec<(RiasecType, u32, u32)>,
}

impl InterestProfile {
    /// Sum answered interest-source questions by their RIASEC category.
    pub fn from_answers(pool: &[Question], answers: &Answers) -> Self {
        let mut totals: Vec<(RiasecType, u32, u32)> =
            RiasecType::ALL.iter().map(|&t| (t, 0, 0)).collect();

        for question in pool.iter().filter(|q| q.source == Source::Interest) {
            let Ok(kind) = question.category.parse::<RiasecType>() else {
                continue;
            };
            if let Some(score) = answers.get(&question.id) {
                if let Some(entry) = totals.iter_mut().find(|(t, _, _)| *t == kind) {
                    entry.1 += score.value() as u32;
                    entry.2 += 1;
                }
            }
        }

        Self { totals }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.iter().all(|(_, _, n)| *n == 0)
    }

    /// Answered types ranked by total, ties kept in R-I-A-S-E-C order.
    pub fn ranked(&self) -> Vec<RiasecType> {
        let mut answered: Vec<&(RiasecType, u32, u32)> =
            self.totals.iter().filter(|(_, _, n)| *n > 0).collect();
        // Stable sort keeps canonical order for equal totals.
        answered.sort_by(|a, b| b.1.cmp(&a.1));
        answered.into_iter().map(|(t, _, _)| *t).collect()
    }

    /// Top three letters, e.g. `"IAS"`. Empty when nothing was answered.
    pub fn holland_code(&self) -> String {
        self.ranked().into_iter().take(3).map(RiasecType::letter).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Score};

    fn interest(id: &str, kind: &str) -> Question {
        Question {
            id: id.into(),
            text: format!("I enjoy {kind} work"),
            category: kind.into(),
            source: Source::Interest,
            difficulty: Difficulty::Easy,
            adaptive_level: 1,
            competency_focus: vec![],
            core_competency: false,
        }
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("I".parse::<RiasecType>().unwrap(), RiasecType::Investigative);
        assert_eq!("Social".parse::<RiasecType>().unwrap(), RiasecType::Social);
        assert!("mathematics".parse::<RiasecType>().is_err());
        assert_eq!(RiasecType::Enterprising.to_string(), "enterprising");
    }

    #[test]
    fn holland_code_from_answers() {
        let pool = vec![
            interest("r1", "realistic"),
            interest("i1", "investigative"),
            interest("i2", "investigative"),
            interest("a1", "artistic"),
            interest("s1", "social"),
            interest("c1", "conventional"),
        ];
        let mut answers = Answers::new();
        for (id, s) in [("r1", 2), ("i1", 5), ("i2", 4), ("a1", 5), ("s1", 3), ("c1", 1)] {
            answers.record(id, Score::new(s).unwrap());
        }
        let profile = InterestProfile::from_answers(&pool, &answers);
        assert_eq!(profile.holland_code(), "IAS");
    }

    #[test]
    fn ties_use_canonical_order() {
        let pool = vec![interest("s1", "social"), interest("r1", "realistic")];
        let mut answers = Answers::new();
        answers.record("s1", Score::new(4).unwrap());
        answers.record("r1", Score::new(4).unwrap());
        let profile = InterestProfile::from_answers(&pool, &answers);
        assert_eq!(profile.holland_code(), "RS");
    }

    #[test]
    fn non_interest_questions_are_ignored() {
        let mut q = interest("x", "investigative");
        q.source = Source::Curriculum;
        let mut answers = Answers::new();
        answers.record("x", Score::new(5).unwrap());
        let profile = InterestProfile::from_answers(&[q], &answers);
        assert!(profile.is_empty());
        assert_eq!(profile.holland_code(), "");
    }
}
