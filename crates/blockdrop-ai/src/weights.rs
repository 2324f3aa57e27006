//! Weights of the linear placement score.

use serde::{Deserialize, Serialize};

/// Multipliers for each board feature.
///
/// The score of a board is
///
/// ```text
/// aggregate_height·Σh + smoothness·Σ|hᵢ − hᵢ₊₁| + complete_lines·lines + holes·holes
/// ```
///
/// Weights are fixed for the lifetime of a search. They can be loaded from a
/// JSON object with the four field names as keys.
///
/// # Example
///
/// ```
/// use blockdrop_ai::weights::Weights;
///
/// let weights: Weights = serde_json::from_str(
///     r#"{"aggregate_height": -1.0, "smoothness": 0.0, "complete_lines": 1.0, "holes": -2.0}"#,
/// ).unwrap();
/// assert_eq!(weights.holes, -2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub aggregate_height: f64,
    pub smoothness: f64,
    pub complete_lines: f64,
    pub holes: f64,
}

impl Weights {
    /// Hand-tuned weights the player uses unless told otherwise.
    ///
    /// Holes are penalised marginally more than height.
    pub const DEFAULT: Self = Self {
        aggregate_height: -0.4,
        smoothness: -0.1,
        complete_lines: 0.5,
        holes: -0.400_000_01,
    };
}

impl Default for Weights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Weights of the extended evaluator, one per
/// [`ExtendedFeatureVector`](crate::board_feature::ExtendedFeatureVector) field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtendedWeights {
    pub aggregate_height: f64,
    pub bumpiness: f64,
    pub complete_lines: f64,
    pub holes: f64,
    pub hole_depth: f64,
    pub rows_with_holes: f64,
    pub row_transitions: f64,
    pub column_transitions: f64,
    pub cumulative_wells: f64,
    pub max_height: f64,
    /// Positive: deeper landings are preferred.
    pub landing_height: f64,
}

impl ExtendedWeights {
    pub const DEFAULT: Self = Self {
        aggregate_height: -0.5,
        bumpiness: -0.18,
        complete_lines: 0.8,
        holes: -0.6,
        hole_depth: -0.08,
        rows_with_holes: -0.25,
        row_transitions: -0.15,
        column_transitions: -0.15,
        cumulative_wells: -0.08,
        max_height: -0.02,
        landing_height: 0.2,
    };
}

impl Default for ExtendedWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}
