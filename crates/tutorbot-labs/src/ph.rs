//! pH testing lab.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::LabError;
use crate::sequence::{GuidedSequence, Step};

/// Where a pH value falls on the acid/base scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhCategory {
    StronglyAcidic,
    WeaklyAcidic,
    Neutral,
    WeaklyBasic,
    StronglyBasic,
}

impl PhCategory {
    pub fn label(self) -> &'static str {
        match self {
            PhCategory::StronglyAcidic => "Strongly Acidic",
            PhCategory::WeaklyAcidic => "Weakly Acidic",
            PhCategory::Neutral => "Neutral",
            PhCategory::WeaklyBasic => "Weakly Basic",
            PhCategory::StronglyBasic => "Strongly Basic",
        }
    }

    /// Universal indicator colour for this range.
    pub fn indicator_colour(self) -> &'static str {
        match self {
            PhCategory::StronglyAcidic => "red",
            PhCategory::WeaklyAcidic => "orange",
            PhCategory::Neutral => "green",
            PhCategory::WeaklyBasic => "blue",
            PhCategory::StronglyBasic => "purple",
        }
    }
}

impl fmt::Display for PhCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PhCategory {
    type Err = LabError;

    /// Accepts labels such as "weakly basic" or "strongly-acidic".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match key.as_str() {
            "stronglyacidic" => Ok(PhCategory::StronglyAcidic),
            "weaklyacidic" => Ok(PhCategory::WeaklyAcidic),
            "neutral" => Ok(PhCategory::Neutral),
            "weaklybasic" => Ok(PhCategory::WeaklyBasic),
            "stronglybasic" => Ok(PhCategory::StronglyBasic),
            _ => Err(LabError::InvalidInput(format!("unknown pH category: {s}"))),
        }
    }
}

/// Classify a pH value. Boundaries at 3, 6, 8 and 11 are exclusive upper
/// bounds of the lower range.
pub fn describe_ph(ph: f64) -> Result<PhCategory, LabError> {
    if !ph.is_finite() || !(0.0..=14.0).contains(&ph) {
        return Err(LabError::InvalidPh(ph));
    }
    let category = if ph < 3.0 {
        PhCategory::StronglyAcidic
    } else if ph < 6.0 {
        PhCategory::WeaklyAcidic
    } else if ph < 8.0 {
        PhCategory::Neutral
    } else if ph < 11.0 {
        PhCategory::WeaklyBasic
    } else {
        PhCategory::StronglyBasic
    };
    Ok(category)
}

/// A household substance available on the lab bench.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Substance {
    pub name: &'static str,
    pub ph: f64,
}

pub const SUBSTANCES: &[Substance] = &[
    Substance { name: "Lemon juice", ph: 2.0 },
    Substance { name: "Vinegar", ph: 2.8 },
    Substance { name: "Tomato juice", ph: 4.2 },
    Substance { name: "Milk", ph: 6.5 },
    Substance { name: "Pure water", ph: 7.0 },
    Substance { name: "Baking soda", ph: 8.3 },
    Substance { name: "Soap solution", ph: 10.0 },
    Substance { name: "Ammonia", ph: 11.6 },
    Substance { name: "Bleach", ph: 13.0 },
];

pub fn substance(name: &str) -> Result<&'static Substance, LabError> {
    SUBSTANCES
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| LabError::UnknownSubstance(name.to_string()))
}

/// Bench state for the pH lab.
#[derive(Debug, Clone, Default)]
pub struct PhLabState {
    pub substance: Option<&'static Substance>,
    pub indicator_added: bool,
    pub prediction: Option<PhCategory>,
}

impl PhLabState {
    pub fn select_substance(&mut self, name: &str) -> Result<(), LabError> {
        self.substance = Some(substance(name)?);
        self.indicator_added = false;
        self.prediction = None;
        Ok(())
    }

    pub fn add_indicator(&mut self) {
        self.indicator_added = true;
    }

    pub fn predict(&mut self, category: PhCategory) {
        self.prediction = Some(category);
    }

    /// Actual category of the selected substance.
    pub fn result(&self) -> Option<PhCategory> {
        self.substance.and_then(|s| describe_ph(s.ph).ok())
    }
}

/// Build the four-step pH testing lab.
pub fn ph_lab() -> GuidedSequence<PhLabState> {
    let steps = vec![
        Step::new(
            "Choose a substance",
            "Pick one of the substances on the bench.",
            |s: &PhLabState| s.substance.is_some(),
            |s: &PhLabState| match s.substance {
                Some(sub) => format!("You selected {}.", sub.name),
                None => "Select a substance to test.".to_string(),
            },
        ),
        Step::new(
            "Add universal indicator",
            "Add a few drops of universal indicator.",
            |s: &PhLabState| s.indicator_added,
            |s: &PhLabState| match (s.indicator_added, s.result()) {
                (true, Some(cat)) => format!("The solution turns {}.", cat.indicator_colour()),
                _ => "Add the indicator and watch the colour change.".to_string(),
            },
        ),
        Step::new(
            "Predict",
            "Predict whether the substance is acidic, neutral or basic.",
            |s: &PhLabState| s.prediction.is_some(),
            |s: &PhLabState| match (s.prediction, s.result()) {
                (Some(p), Some(actual)) if p == actual => {
                    format!("Correct! It is {actual}.")
                }
                (Some(p), Some(actual)) => {
                    format!("Not quite. You predicted {p} but it is {actual}.")
                }
                _ => "Make a prediction before reading the pH meter.".to_string(),
            },
        ),
        Step::new(
            "Read the pH",
            "Compare the colour with the pH chart.",
            |_: &PhLabState| true,
            |s: &PhLabState| match (s.substance, s.result()) {
                (Some(sub), Some(cat)) => format!("{} has a pH of {:.1}: {}.", sub.name, sub.ph, cat),
                _ => "No substance tested.".to_string(),
            },
        ),
    ];

    GuidedSequence::new("pH testing", PhLabState::default(), steps).expect("pH lab has steps")
}
