//! Games: several dice rolled in lockstep with an append-only history.
use std::collections::BTreeSet;

use crate::RollHistory;
use crate::die::{Die, Face};
use crate::error::DiceError;
use crate::rng::DiceStreams;
use crate::table::{ResultForm, ResultTable, Round, WideTable};

/// A set of dice and every round rolled with them so far.
#[derive(Debug, Clone)]
pub struct Game<F> {
    dice: Vec<Die<F>>,
    streams: DiceStreams,
    history: WideTable<F>,
}

impl<F: Face> Game<F> {
    /// Create a game seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::NoDice`] when `dice` is empty.
    pub fn new(dice: Vec<Die<F>>) -> Result<Self, DiceError> {
        let streams = DiceStreams::from_entropy(dice.len());
        Self::with_streams(dice, streams)
    }

    /// Create a game whose rolls are fully determined by `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::NoDice`] when `dice` is empty.
    pub fn with_seed(dice: Vec<Die<F>>, seed: u64) -> Result<Self, DiceError> {
        let streams = DiceStreams::from_user_seed(seed, dice.len());
        Self::with_streams(dice, streams)
    }

    fn with_streams(dice: Vec<Die<F>>, streams: DiceStreams) -> Result<Self, DiceError> {
        let Some(first) = dice.first() else {
            return Err(DiceError::NoDice);
        };
        let reference: BTreeSet<&F> = first.faces().iter().collect();
        let mixed = dice
            .iter()
            .skip(1)
            .any(|die| die.faces().iter().collect::<BTreeSet<_>>() != reference);
        if mixed {
            log::debug!("game mixes dice with different face sets");
        }
        let history = WideTable::new(dice.len());
        Ok(Self {
            dice,
            streams,
            history,
        })
    }

    /// Roll every die once per round for `num_rolls` rounds, appending to the
    /// history.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::NonPositiveRolls`] when `num_rolls` is zero; the
    /// history is unchanged in that case.
    pub fn play(&mut self, num_rolls: usize) -> Result<(), DiceError> {
        if num_rolls == 0 {
            return Err(DiceError::NonPositiveRolls {
                requested: num_rolls,
            });
        }
        let samplers: Vec<_> = self.dice.iter().map(Die::sampler).collect();
        let streams = self.streams.streams_mut();
        let mut roll_number = self
            .history
            .rounds
            .last()
            .map_or(0, |round| round.roll_number);

        self.history.rounds.reserve(num_rolls);
        for _ in 0..num_rolls {
            roll_number += 1;
            let outcomes = samplers
                .iter()
                .zip(streams.iter_mut())
                .map(|(sampler, rng)| sampler.sample(rng).clone())
                .collect();
            self.history.rounds.push(Round {
                roll_number,
                outcomes,
            });
        }
        log::debug!(
            "played {num_rolls} rounds with {} dice ({} rounds total)",
            self.dice.len(),
            self.history.rounds.len()
        );
        Ok(())
    }

    /// The history in the requested layout. Empty before the first `play`.
    #[must_use]
    pub fn show_results(&self, form: ResultForm) -> ResultTable<F> {
        match form {
            ResultForm::Wide => ResultTable::Wide(self.history.clone()),
            ResultForm::Narrow => ResultTable::Narrow(self.history.to_narrow()),
        }
    }

    #[must_use]
    pub fn dice(&self) -> &[Die<F>] {
        &self.dice
    }

    #[must_use]
    pub fn die_count(&self) -> usize {
        self.dice.len()
    }

    #[must_use]
    pub fn rounds_played(&self) -> usize {
        self.history.rounds.len()
    }

    /// Seed the per-die streams were derived from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.streams.seed()
    }

    /// RNG draws consumed so far by each die's stream.
    #[must_use]
    pub fn stream_draws(&self) -> Vec<u64> {
        self.streams.draws()
    }
}

impl<F: Face> RollHistory<F> for Game<F> {
    fn die_count(&self) -> usize {
        self.dice.len()
    }

    fn rounds(&self) -> &[Round<F>] {
        &self.history.rounds
    }

    fn face_set(&self) -> Vec<F> {
        let faces: BTreeSet<&F> = self.dice.iter().flat_map(Die::faces).collect();
        faces.into_iter().cloned().collect()
    }
}
