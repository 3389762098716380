//! Statistics over a recorded roll history.
//!
//! An [`Analyzer`] borrows its source, so the history it reports on cannot
//! change underneath it.
use std::collections::{BTreeMap, BTreeSet};

use crate::RollHistory;
use crate::die::Face;
use crate::error::DiceError;
use crate::table::{ComboCount, ComboTable, FaceCountRow, FaceCountTable, Round};

/// Read-only statistics over the rounds of a [`RollHistory`].
#[derive(Debug, Clone)]
pub struct Analyzer<'a, F> {
    rounds: &'a [Round<F>],
    die_count: usize,
    faces: Vec<F>,
}

impl<'a, F: Face> Analyzer<'a, F> {
    /// Capture `source`'s history as it is now.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::MalformedHistory`] when the source reports no
    /// dice, a round's outcome count differs from the die count, or roll
    /// numbers are not strictly increasing.
    pub fn new<H>(source: &'a H) -> Result<Self, DiceError>
    where
        H: RollHistory<F> + ?Sized,
    {
        let die_count = source.die_count();
        if die_count == 0 {
            return Err(DiceError::malformed("history reports zero dice"));
        }
        let rounds = source.rounds();
        let mut previous = 0;
        for round in rounds {
            if round.outcomes.len() != die_count {
                return Err(DiceError::malformed(format!(
                    "round {} has {} outcomes for {die_count} dice",
                    round.roll_number,
                    round.outcomes.len()
                )));
            }
            if round.roll_number <= previous {
                return Err(DiceError::malformed(format!(
                    "roll number {} follows {previous}",
                    round.roll_number
                )));
            }
            previous = round.roll_number;
        }

        let mut faces: BTreeSet<F> = source.face_set().into_iter().collect();
        faces.extend(
            rounds
                .iter()
                .flat_map(|round| round.outcomes.iter().cloned()),
        );
        Ok(Self {
            rounds,
            die_count,
            faces: faces.into_iter().collect(),
        })
    }

    /// Rounds in which every die shows the same face.
    #[must_use]
    pub fn jackpot(&self) -> usize {
        self.rounds
            .iter()
            .filter(|round| round.outcomes.windows(2).all(|pair| pair[0] == pair[1]))
            .count()
    }

    /// Occurrences of each order-independent outcome multiset, ascending by
    /// the sorted faces.
    #[must_use]
    pub fn combo(&self) -> ComboTable<F> {
        self.tally(|round| {
            let mut combination = round.outcomes.to_vec();
            combination.sort();
            combination
        })
    }

    /// Occurrences of each ordered outcome tuple, die order preserved.
    #[must_use]
    pub fn permutation_count(&self) -> ComboTable<F> {
        self.tally(|round| round.outcomes.to_vec())
    }

    /// How often each face shows up in each round. Columns cover every
    /// possible face in ascending order.
    #[must_use]
    pub fn face_counts_per_roll(&self) -> FaceCountTable<F> {
        let columns: BTreeMap<&F, usize> = self
            .faces
            .iter()
            .enumerate()
            .map(|(column, face)| (face, column))
            .collect();
        let rows = self
            .rounds
            .iter()
            .map(|round| {
                let mut counts = vec![0; self.faces.len()];
                for outcome in &round.outcomes {
                    if let Some(column) = columns.get(outcome) {
                        counts[*column] += 1;
                    }
                }
                FaceCountRow {
                    roll_number: round.roll_number,
                    counts,
                }
            })
            .collect();
        FaceCountTable {
            faces: self.faces.clone(),
            rows,
        }
    }

    #[must_use]
    pub const fn rounds(&self) -> &'a [Round<F>] {
        self.rounds
    }

    #[must_use]
    pub const fn die_count(&self) -> usize {
        self.die_count
    }

    /// Every face the analyzer knows about, ascending.
    #[must_use]
    pub fn faces(&self) -> &[F] {
        &self.faces
    }

    fn tally(&self, key: impl Fn(&Round<F>) -> Vec<F>) -> ComboTable<F> {
        let mut counts: BTreeMap<Vec<F>, usize> = BTreeMap::new();
        for round in self.rounds {
            *counts.entry(key(round)).or_default() += 1;
        }
        ComboTable {
            rows: counts
                .into_iter()
                .map(|(combination, count)| ComboCount { combination, count })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::table::WideTable;
    use smallvec::smallvec;

    fn history(rows: &[[u8; 3]]) -> WideTable<u8> {
        WideTable {
            die_count: 3,
            rounds: rows
                .iter()
                .zip(1..)
                .map(|(row, roll_number)| Round {
                    roll_number,
                    outcomes: row.iter().copied().collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn jackpot_counts_uniform_rounds() {
        let table = history(&[[1, 1, 1], [1, 2, 1], [4, 4, 4], [2, 2, 3]]);
        let analyzer = Analyzer::new(&table).unwrap();
        assert_eq!(analyzer.jackpot(), 2);
    }

    #[test]
    fn empty_history_has_no_jackpots() {
        let table = WideTable::<u8>::new(2);
        let analyzer = Analyzer::new(&table).unwrap();
        assert_eq!(analyzer.jackpot(), 0);
        assert!(analyzer.combo().rows.is_empty());
        assert!(analyzer.face_counts_per_roll().rows.is_empty());
    }

    #[test]
    fn combo_groups_multisets_in_sorted_order() {
        let table = history(&[[3, 1, 2], [2, 3, 1], [1, 1, 2], [2, 1, 1], [3, 3, 3]]);
        let combos = Analyzer::new(&table).unwrap().combo();
        let keys: Vec<Vec<u8>> = combos.rows.iter().map(|row| row.combination.clone()).collect();
        assert_eq!(keys, vec![vec![1, 1, 2], vec![1, 2, 3], vec![3, 3, 3]]);
        assert_eq!(combos.count_of(&[1, 2, 3]), 2);
        assert_eq!(combos.count_of(&[1, 1, 2]), 2);
        assert_eq!(combos.total(), 5);
    }

    #[test]
    fn permutations_keep_die_order() {
        let table = history(&[[3, 1, 2], [2, 3, 1], [3, 1, 2]]);
        let perms = Analyzer::new(&table).unwrap().permutation_count();
        assert_eq!(perms.rows.len(), 2);
        assert_eq!(perms.count_of(&[3, 1, 2]), 2);
        assert_eq!(perms.count_of(&[2, 3, 1]), 1);
        assert_eq!(perms.count_of(&[1, 2, 3]), 0);
    }

    #[test]
    fn face_counts_fill_missing_faces_with_zero() {
        let table = history(&[[5, 5, 2], [1, 2, 3]]);
        let counts = Analyzer::new(&table).unwrap().face_counts_per_roll();
        assert_eq!(counts.faces, vec![1, 2, 3, 5]);
        assert_eq!(counts.rows[0].counts, vec![0, 1, 0, 2]);
        assert_eq!(counts.count(2, &5), Some(0));
        assert_eq!(counts.count(2, &9), None);
        assert!(counts.rows.iter().all(|row| row.counts.iter().sum::<usize>() == 3));
    }

    #[test]
    fn malformed_sources_are_rejected() {
        let ragged = WideTable {
            die_count: 2,
            rounds: vec![Round {
                roll_number: 1,
                outcomes: smallvec![1_u8],
            }],
        };
        let err = Analyzer::new(&ragged).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        let mut unordered = history(&[[1, 1, 1], [2, 2, 2]]);
        unordered.rounds[1].roll_number = 1;
        assert!(matches!(
            Analyzer::new(&unordered),
            Err(DiceError::MalformedHistory { .. })
        ));

        let mut later_window = history(&[[1, 2, 3], [3, 2, 1]]);
        later_window.rounds[0].roll_number = 40;
        later_window.rounds[1].roll_number = 41;
        assert_eq!(Analyzer::new(&later_window).unwrap().combo().total(), 2);

        let no_dice = WideTable::<u8>::new(0);
        assert!(Analyzer::new(&no_dice).is_err());
    }
}
