//! Monte Carlo dice
//!
//! Weighted dice with arbitrary faces, games that roll several dice in
//! lockstep while keeping an append-only history, and an analyzer that
//! derives jackpot, combination and face-count statistics from that history.
//!
//! ```
//! use montecarlo_game::{Analyzer, Die, Game};
//!
//! let mut die = Die::new([1, 2, 3, 4, 5, 6])?;
//! die.change_weight(&6, 3.0)?;
//! let mut game = Game::with_seed(vec![die.clone(), die], 7)?;
//! game.play(100)?;
//!
//! let analyzer = Analyzer::new(&game)?;
//! assert_eq!(analyzer.combo().total(), 100);
//! # Ok::<(), montecarlo_game::DiceError>(())
//! ```

pub mod analyzer;
pub mod config;
pub mod die;
pub mod error;
pub mod game;
pub mod rng;
pub mod table;

// Re-export commonly used types
pub use analyzer::Analyzer;
pub use config::{DieConfig, GameConfig};
pub use die::{DEFAULT_WEIGHT, Die, Face, FaceWeight};
pub use error::{DiceError, ErrorKind};
pub use game::Game;
pub use rng::{CountingRng, DiceStreams};
pub use table::{
    ComboCount, ComboTable, FaceCountRow, FaceCountTable, NarrowRow, NarrowTable, Outcomes,
    ResultForm, ResultTable, Round, WideTable,
};

/// Source of recorded rounds an [`Analyzer`] can consume.
pub trait RollHistory<F> {
    /// Number of dice rolled per round.
    fn die_count(&self) -> usize;

    /// Recorded rounds, ordered by roll number.
    fn rounds(&self) -> &[Round<F>];

    /// Every face the dice could have shown, ascending and deduplicated.
    fn face_set(&self) -> Vec<F>;
}

impl<F: Face> RollHistory<F> for WideTable<F> {
    fn die_count(&self) -> usize {
        self.die_count
    }

    fn rounds(&self) -> &[Round<F>] {
        &self.rounds
    }

    fn face_set(&self) -> Vec<F> {
        let faces: std::collections::BTreeSet<&F> = self
            .rounds
            .iter()
            .flat_map(|round| round.outcomes.iter())
            .collect();
        faces.into_iter().cloned().collect()
    }
}
