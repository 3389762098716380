//! Weighted dice with arbitrary, caller-chosen faces.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::error::DiceError;

/// Default weight assigned to every face of a fresh die.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Values that can sit on a die face.
///
/// Ordering keeps combination tables and face-count columns deterministic.
pub trait Face: Clone + Ord + Debug {}

impl<T: Clone + Ord + Debug> Face for T {}

pub(crate) fn face_label<F: Debug>(face: &F) -> String {
    format!("{face:?}")
}

/// One `{face, weight}` row of a die's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceWeight<F> {
    pub face: F,
    pub weight: f64,
}

/// A single die whose faces are selected with probability proportional to
/// their weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Die<F> {
    faces: Vec<F>,
    weights: Vec<f64>,
}

impl<F: Face> Die<F> {
    /// Build a die with every weight set to [`DEFAULT_WEIGHT`].
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::EmptyFaces`] for an empty face list and
    /// [`DiceError::DuplicateFace`] when a face repeats.
    pub fn new(faces: impl IntoIterator<Item = F>) -> Result<Self, DiceError> {
        let faces: Vec<F> = faces.into_iter().collect();
        if faces.is_empty() {
            return Err(DiceError::EmptyFaces);
        }
        let mut seen = BTreeSet::new();
        for face in &faces {
            if !seen.insert(face) {
                return Err(DiceError::DuplicateFace {
                    face: face_label(face),
                });
            }
        }
        let weights = vec![DEFAULT_WEIGHT; faces.len()];
        Ok(Self { faces, weights })
    }

    /// Build a die and apply weight overrides in one validated step.
    ///
    /// # Errors
    ///
    /// Returns any error [`Die::new`] or [`Die::change_weight`] would.
    pub fn with_weights(
        faces: impl IntoIterator<Item = F>,
        overrides: impl IntoIterator<Item = FaceWeight<F>>,
    ) -> Result<Self, DiceError> {
        let mut die = Self::new(faces)?;
        for FaceWeight { face, weight } in overrides {
            die.change_weight(&face, weight)?;
        }
        Ok(die)
    }

    /// Replace the weight of a single face.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::UnknownFace`] when `face` is not on this die and
    /// [`DiceError::InvalidWeight`] when `new_weight` is not a positive
    /// finite number or would push the total weight past `f64::MAX`. The die
    /// is unchanged on error.
    pub fn change_weight(&mut self, face: &F, new_weight: f64) -> Result<(), DiceError> {
        let Some(index) = self.position(face) else {
            return Err(DiceError::UnknownFace {
                face: face_label(face),
            });
        };
        let others: f64 = self
            .weights
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(_, weight)| weight)
            .sum();
        if !new_weight.is_finite() || new_weight <= 0.0 || !(others + new_weight).is_finite() {
            return Err(DiceError::InvalidWeight {
                face: face_label(face),
                weight: new_weight,
            });
        }
        log::debug!(
            "face {face:?} weight {} -> {new_weight}",
            self.weights[index]
        );
        self.weights[index] = new_weight;
        Ok(())
    }

    /// Draw `times` independent weighted samples.
    pub fn roll<R: Rng + ?Sized>(&self, times: usize, rng: &mut R) -> Vec<F> {
        let sampler = self.sampler();
        (0..times).map(|_| sampler.sample(rng).clone()).collect()
    }

    /// Snapshot of the faces and their weights, in face order.
    #[must_use]
    pub fn show_state(&self) -> Vec<FaceWeight<F>> {
        self.faces
            .iter()
            .zip(&self.weights)
            .map(|(face, weight)| FaceWeight {
                face: face.clone(),
                weight: *weight,
            })
            .collect()
    }

    /// Selection probability of every face, in face order.
    #[must_use]
    pub fn probabilities(&self) -> Vec<(F, f64)> {
        let total: f64 = self.weights.iter().sum();
        self.faces
            .iter()
            .zip(&self.weights)
            .map(|(face, weight)| (face.clone(), weight / total))
            .collect()
    }

    /// Current weight of `face`, if it exists.
    #[must_use]
    pub fn weight(&self, face: &F) -> Option<f64> {
        self.position(face).map(|index| self.weights[index])
    }

    #[must_use]
    pub fn faces(&self) -> &[F] {
        &self.faces
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false; dice cannot be built without faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub(crate) fn sampler(&self) -> WeightedFaces<'_, F> {
        WeightedFaces::new(&self.faces, &self.weights)
    }

    fn position(&self, face: &F) -> Option<usize> {
        self.faces.iter().position(|candidate| candidate == face)
    }
}

/// Cumulative-weight table used to draw faces by binary search.
#[derive(Debug, Clone)]
pub(crate) struct WeightedFaces<'a, F> {
    faces: &'a [F],
    cumulative: Vec<f64>,
    total: f64,
}

impl<'a, F> WeightedFaces<'a, F> {
    fn new(faces: &'a [F], weights: &[f64]) -> Self {
        let mut running = 0.0;
        let cumulative: Vec<f64> = weights
            .iter()
            .map(|weight| {
                running += weight;
                running
            })
            .collect();
        Self {
            faces,
            cumulative,
            total: running,
        }
    }

    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a F {
        let point = rng.gen_range(0.0..self.total);
        let index = self
            .cumulative
            .partition_point(|edge| *edge <= point)
            .min(self.faces.len() - 1);
        &self.faces[index]
    }
}
