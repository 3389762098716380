//! Tabular views over roll histories and analyzer outputs.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::error::DiceError;

/// Outcomes of one round, stored inline for typical dice counts.
pub type Outcomes<F> = SmallVec<[F; 6]>;

/// One round of a game: every die rolled once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round<F> {
    /// 1-based round counter.
    pub roll_number: u64,
    /// One outcome per die, in die order.
    pub outcomes: Outcomes<F>,
}

/// Layout requested from [`crate::Game::show_results`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultForm {
    /// One row per round, one column per die.
    #[default]
    Wide,
    /// One row per `(roll_number, die_index)` pair.
    Narrow,
}

impl FromStr for ResultForm {
    type Err = DiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "wide" => Ok(Self::Wide),
            "narrow" => Ok(Self::Narrow),
            other => Err(DiceError::UnknownForm {
                form: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ResultForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wide => f.write_str("wide"),
            Self::Narrow => f.write_str("narrow"),
        }
    }
}

/// Rounds indexed by roll number with one outcome column per die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WideTable<F> {
    pub die_count: usize,
    pub rounds: Vec<Round<F>>,
}

impl<F> WideTable<F> {
    #[must_use]
    pub const fn new(die_count: usize) -> Self {
        Self {
            die_count,
            rounds: Vec::new(),
        }
    }

    /// Number of rounds recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Outcome of die `die_index` in round `roll_number`.
    #[must_use]
    pub fn outcome(&self, roll_number: u64, die_index: usize) -> Option<&F> {
        self.rounds
            .iter()
            .find(|round| round.roll_number == roll_number)
            .and_then(|round| round.outcomes.get(die_index))
    }
}

impl<F: Clone> WideTable<F> {
    /// Melt into one row per die per round.
    #[must_use]
    pub fn to_narrow(&self) -> NarrowTable<F> {
        let rows = self
            .rounds
            .iter()
            .flat_map(|round| {
                round
                    .outcomes
                    .iter()
                    .enumerate()
                    .map(|(die_index, outcome)| NarrowRow {
                        roll_number: round.roll_number,
                        die_index,
                        outcome: outcome.clone(),
                    })
            })
            .collect();
        NarrowTable { rows }
    }
}

/// Single outcome for one die in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrowRow<F> {
    pub roll_number: u64,
    pub die_index: usize,
    pub outcome: F,
}

/// History in long form, ordered by `(roll_number, die_index)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrowTable<F> {
    pub rows: Vec<NarrowRow<F>>,
}

/// Either history layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum ResultTable<F> {
    Wide(WideTable<F>),
    Narrow(NarrowTable<F>),
}

impl<F> ResultTable<F> {
    #[must_use]
    pub const fn form(&self) -> ResultForm {
        match self {
            Self::Wide(_) => ResultForm::Wide,
            Self::Narrow(_) => ResultForm::Narrow,
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        match self {
            Self::Wide(table) => table.rounds.len(),
            Self::Narrow(table) => table.rows.len(),
        }
    }

    /// Number of outcome cells, identical for both layouts of one history.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        match self {
            Self::Wide(table) => table.rounds.iter().map(|round| round.outcomes.len()).sum(),
            Self::Narrow(table) => table.rows.len(),
        }
    }

    #[must_use]
    pub const fn as_wide(&self) -> Option<&WideTable<F>> {
        match self {
            Self::Wide(table) => Some(table),
            Self::Narrow(_) => None,
        }
    }

    #[must_use]
    pub const fn as_narrow(&self) -> Option<&NarrowTable<F>> {
        match self {
            Self::Narrow(table) => Some(table),
            Self::Wide(_) => None,
        }
    }
}

/// A distinct outcome group and how many rounds produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboCount<F> {
    pub combination: Vec<F>,
    pub count: usize,
}

/// Occurrence counts of distinct outcome groups, ascending by group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTable<F> {
    pub rows: Vec<ComboCount<F>>,
}

impl<F: PartialEq> ComboTable<F> {
    /// Sum of all counts; equals the number of rounds analysed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }

    /// Count recorded for `combination`, or 0 when never observed.
    #[must_use]
    pub fn count_of(&self, combination: &[F]) -> usize {
        self.rows
            .iter()
            .find(|row| row.combination == combination)
            .map_or(0, |row| row.count)
    }
}

/// Per-round tally of each face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceCountRow {
    pub roll_number: u64,
    /// Counts aligned with [`FaceCountTable::faces`].
    pub counts: Vec<usize>,
}

/// One row per round, one column per possible face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceCountTable<F> {
    pub faces: Vec<F>,
    pub rows: Vec<FaceCountRow>,
}

impl<F: PartialEq> FaceCountTable<F> {
    /// Count of `face` in round `roll_number`.
    #[must_use]
    pub fn count(&self, roll_number: u64, face: &F) -> Option<usize> {
        let column = self.faces.iter().position(|candidate| candidate == face)?;
        self.rows
            .iter()
            .find(|row| row.roll_number == roll_number)
            .and_then(|row| row.counts.get(column).copied())
    }
}
