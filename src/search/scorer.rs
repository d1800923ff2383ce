//! Query-against-corpus scoring

use super::ScoreFunction;
use crate::matrix::CsrMatrix;
use crate::types::QueryRepresentation;
use crate::{Error, Result};

/// Score one query representation against every document row. The output is
/// a dense score vector index-aligned with the store's `doc_ids`.
///
/// The weighted/unweighted branch follows the representation itself:
/// `Weights` takes the matrix-vector dot product, `Terms` sums the selected
/// columns per row (coverage). `score_function` only selects the metric
/// inside the weighted branch.
pub fn score(
    matrix: &CsrMatrix,
    representation: &QueryRepresentation,
    score_function: ScoreFunction,
) -> Result<Vec<f32>> {
    match representation {
        QueryRepresentation::Weights(weights) => {
            if weights.len() != matrix.cols() {
                return Err(Error::DimensionMismatch {
                    query: weights.len(),
                    corpus: matrix.cols(),
                });
            }
            match score_function {
                ScoreFunction::Dot => Ok(matrix.dot(weights)),
            }
        }
        QueryRepresentation::Terms(indices) => {
            if let Some(&bad) = indices.iter().find(|&&i| i as usize >= matrix.cols()) {
                return Err(Error::DimensionMismatch {
                    query: bad as usize + 1,
                    corpus: matrix.cols(),
                });
            }
            Ok(matrix.sum_columns(indices))
        }
    }
}
