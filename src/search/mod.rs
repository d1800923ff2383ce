
pub mod scorer;
pub mod sparse;
pub mod top_k;

pub use sparse::SparseRetriever;

use crate::types::{Corpus, Queries, Results};
use crate::Result;
use async_trait::async_trait;

/// Similarity metric for weighted scoring. Dot product is the only metric
/// wired up today; the variant is threaded through the scorer so
/// alternatives (e.g. cosine) can be added without changing call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreFunction {
    #[default]
    Dot,
}

/// Per-call search knobs.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// How many documents to return per query.
    pub top_k: usize,
    pub score_function: ScoreFunction,
    /// When true the query is a dense weight vector; otherwise only the
    /// presence of its active features counts.
    pub query_weights: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_k: 100,
            score_function: ScoreFunction::Dot,
            query_weights: false,
        }
    }
}

#[async_trait]
pub trait Retriever: Send + Sync {
    /// Rank the corpus for every query. Returns one entry per query id; a
    /// document whose id equals the query id is never among its results.
    async fn search(&self, corpus: &Corpus, queries: &Queries, params: &SearchParams)
        -> Result<Results>;
}
