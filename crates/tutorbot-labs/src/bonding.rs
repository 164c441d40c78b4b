//! Atomic bonding lab.
//!
//! Bonds are classified from the electronegativity difference of the two
//! atoms: above 1.7 ionic, above 0.4 polar covalent, otherwise nonpolar
//! covalent. Both thresholds are exclusive.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::LabError;
use crate::sequence::{GuidedSequence, Step};

pub const IONIC_THRESHOLD: f64 = 1.7;
pub const POLAR_THRESHOLD: f64 = 0.4;

/// A bondable element with its Pauling electronegativity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    pub electronegativity: f64,
    pub valence_electrons: u8,
}

pub const ELEMENTS: &[Element] = &[
    Element { symbol: "H", name: "Hydrogen", electronegativity: 2.1, valence_electrons: 1 },
    Element { symbol: "Li", name: "Lithium", electronegativity: 1.0, valence_electrons: 1 },
    Element { symbol: "C", name: "Carbon", electronegativity: 2.5, valence_electrons: 4 },
    Element { symbol: "N", name: "Nitrogen", electronegativity: 3.0, valence_electrons: 5 },
    Element { symbol: "O", name: "Oxygen", electronegativity: 3.5, valence_electrons: 6 },
    Element { symbol: "F", name: "Fluorine", electronegativity: 4.0, valence_electrons: 7 },
    Element { symbol: "Na", name: "Sodium", electronegativity: 0.9, valence_electrons: 1 },
    Element { symbol: "Mg", name: "Magnesium", electronegativity: 1.2, valence_electrons: 2 },
    Element { symbol: "S", name: "Sulfur", electronegativity: 2.5, valence_electrons: 6 },
    Element { symbol: "Cl", name: "Chlorine", electronegativity: 3.0, valence_electrons: 7 },
    Element { symbol: "K", name: "Potassium", electronegativity: 0.8, valence_electrons: 1 },
    Element { symbol: "Ca", name: "Calcium", electronegativity: 1.0, valence_electrons: 2 },
];

/// Look up an element by symbol (case-sensitive, as written in chemistry)
/// or by name (case-insensitive).
pub fn element(key: &str) -> Result<&'static Element, LabError> {
    let key = key.trim();
    ELEMENTS
        .iter()
        .find(|e| e.symbol == key || e.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| LabError::UnknownElement(key.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BondType {
    Ionic,
    PolarCovalent,
    NonpolarCovalent,
}

impl BondType {
    pub fn explanation(self) -> &'static str {
        match self {
            BondType::Ionic => {
                "One atom pulls the electrons so strongly that they transfer completely, forming ions."
            }
            BondType::PolarCovalent => {
                "The electrons are shared unequally, giving each end a partial charge."
            }
            BondType::NonpolarCovalent => "The electrons are shared almost equally.",
        }
    }
}

impl FromStr for BondType {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match key.as_str() {
            "ionic" => Ok(BondType::Ionic),
            "polar" | "polarcovalent" => Ok(BondType::PolarCovalent),
            "nonpolar" | "nonpolarcovalent" | "covalent" => Ok(BondType::NonpolarCovalent),
            _ => Err(LabError::InvalidInput(format!("unknown bond type: {s}"))),
        }
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondType::Ionic => f.write_str("ionic"),
            BondType::PolarCovalent => f.write_str("polar covalent"),
            BondType::NonpolarCovalent => f.write_str("nonpolar covalent"),
        }
    }
}

/// Electronegativity difference rounded to two decimals.
///
/// Rounding keeps tabulated one-decimal values on the exact boundaries
/// (e.g. 2.5 - 0.8 is exactly 1.7, not 1.7000000000000002).
pub fn electronegativity_difference(a: f64, b: f64) -> f64 {
    ((a - b).abs() * 100.0).round() / 100.0
}

/// Classify a bond from an already computed absolute difference.
pub fn classify_difference(diff: f64) -> BondType {
    if diff > IONIC_THRESHOLD {
        BondType::Ionic
    } else if diff > POLAR_THRESHOLD {
        BondType::PolarCovalent
    } else {
        BondType::NonpolarCovalent
    }
}

/// Classify the bond between two atoms with electronegativities `a` and `b`.
pub fn classify_bond(a: f64, b: f64) -> BondType {
    classify_difference(electronegativity_difference(a, b))
}

/// Atoms chosen on the bonding bench.
#[derive(Debug, Clone, Default)]
pub struct BondingState {
    pub first: Option<&'static Element>,
    pub second: Option<&'static Element>,
    pub prediction: Option<BondType>,
}

impl BondingState {
    /// Place the next atom: fills the first slot, then the second.
    pub fn select(&mut self, key: &str) -> Result<&'static Element, LabError> {
        let e = element(key)?;
        match (self.first, self.second) {
            (None, _) => self.first = Some(e),
            (Some(_), None) => self.second = Some(e),
            (Some(_), Some(_)) => return Err(LabError::AtomsAlreadySelected),
        }
        Ok(e)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn predict(&mut self, bond: BondType) {
        self.prediction = Some(bond);
    }

    pub fn pair(&self) -> Option<(&'static Element, &'static Element)> {
        self.first.zip(self.second)
    }

    pub fn bond(&self) -> Option<BondType> {
        self.pair()
            .map(|(a, b)| classify_bond(a.electronegativity, b.electronegativity))
    }
}

/// Build the bonding lab: choose two atoms, predict, observe.
pub fn bonding_lab() -> GuidedSequence<BondingState> {
    let steps = vec![
        Step::new(
            "Choose the first atom",
            "Drag an element onto the bench.",
            |s: &BondingState| s.first.is_some(),
            |s: &BondingState| match s.first {
                Some(e) => format!(
                    "{} has an electronegativity of {:.1}.",
                    e.name, e.electronegativity
                ),
                None => "Pick the first atom.".to_string(),
            },
        ),
        Step::new(
            "Choose the second atom",
            "Drag a second element next to the first.",
            |s: &BondingState| s.second.is_some(),
            |s: &BondingState| match s.pair() {
                Some((a, b)) => format!(
                    "The electronegativity difference between {} and {} is {:.1}.",
                    a.symbol,
                    b.symbol,
                    electronegativity_difference(a.electronegativity, b.electronegativity)
                ),
                None => "Pick the second atom.".to_string(),
            },
        ),
        Step::new(
            "Predict the bond",
            "Will the bond be ionic, polar covalent or nonpolar covalent?",
            |s: &BondingState| s.prediction.is_some(),
            |s: &BondingState| match (s.prediction, s.bond()) {
                (Some(p), Some(actual)) if p == actual => format!("Correct, the bond is {actual}."),
                (Some(_), Some(actual)) => format!("Not quite, the bond is {actual}."),
                _ => "Make a prediction first.".to_string(),
            },
        ),
        Step::new(
            "Observe the bond",
            "Watch how the electrons behave.",
            |_: &BondingState| true,
            |s: &BondingState| match s.bond() {
                Some(bond) => format!("{}: {}", bond, bond.explanation()),
                None => "No bond formed.".to_string(),
            },
        ),
    ];

    GuidedSequence::new("atomic bonding", BondingState::default(), steps)
        .expect("bonding lab has steps")
}
