//! Serde-described game setup.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::die::{Die, Face, FaceWeight};
use crate::error::DiceError;
use crate::game::Game;

/// One kind of die and how many copies of it to put in the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "F: Deserialize<'de>"))]
pub struct DieConfig<F> {
    pub faces: Vec<F>,
    /// Weight overrides; faces not listed keep the default weight.
    #[serde(default)]
    pub weights: Vec<FaceWeight<F>>,
    #[serde(default = "default_copies")]
    pub copies: usize,
}

const fn default_copies() -> usize {
    1
}

impl<F: Face> DieConfig<F> {
    /// Build one die from this entry.
    ///
    /// # Errors
    ///
    /// Returns any face or weight validation error from [`Die::with_weights`].
    pub fn build_die(&self) -> Result<Die<F>, DiceError> {
        Die::with_weights(self.faces.iter().cloned(), self.weights.iter().cloned())
    }
}

/// Dice and optional seed for a [`Game`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "F: Deserialize<'de>"))]
pub struct GameConfig<F> {
    #[serde(default)]
    pub seed: Option<u64>,
    pub dice: Vec<DieConfig<F>>,
}

impl<F: Face + DeserializeOwned> GameConfig<F> {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::Config`] when the JSON does not describe a game.
    pub fn from_json(json: &str) -> Result<Self, DiceError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<F: Face> GameConfig<F> {
    /// Validate the configuration and create the game it describes.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::ZeroCopies`] for an entry with `copies == 0`,
    /// [`DiceError::NoDice`] when no dice result, and any die validation
    /// error.
    pub fn build(&self) -> Result<Game<F>, DiceError> {
        let mut dice = Vec::new();
        for entry in &self.dice {
            if entry.copies == 0 {
                return Err(DiceError::ZeroCopies);
            }
            let die = entry.build_die()?;
            dice.extend(std::iter::repeat_n(die, entry.copies));
        }
        match self.seed {
            Some(seed) => Game::with_seed(dice, seed),
            None => Game::new(dice),
        }
    }
}
