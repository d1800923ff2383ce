//! Sparse retrieval over an encoded corpus

use super::{scorer, top_k, Retriever, SearchParams};
use crate::encoders::SparseEncoder;
use crate::store::RepresentationStore;
use crate::types::{Corpus, Queries, Results};
use crate::{Error, Result};
use async_trait::async_trait;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Exact top-k retrieval against a sparse corpus matrix.
///
/// Each `search` call encodes the corpus and queries from scratch and owns
/// all intermediate state, so concurrent and repeated calls are safe.
pub struct SparseRetriever {
    encoder: Arc<dyn SparseEncoder>,
    batch_size: usize,
}

impl SparseRetriever {
    pub fn new(encoder: Arc<dyn SparseEncoder>, batch_size: usize) -> Self {
        Self { encoder, batch_size }
    }
}

#[async_trait]
impl Retriever for SparseRetriever {
    async fn search(
        &self,
        corpus: &Corpus,
        queries: &Queries,
        params: &SearchParams,
    ) -> Result<Results> {
        if params.top_k == 0 {
            return Err(Error::InvalidTopK(params.top_k));
        }
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        if queries.is_empty() {
            return Err(Error::EmptyQueries);
        }

        info!(
            "[SEARCH] Building corpus representations with {}",
            self.encoder.encoder_name()
        );
        let store = RepresentationStore::build(self.encoder.as_ref(), corpus, self.batch_size).await?;

        info!("[SEARCH] Encoding {} queries", queries.len());
        let mut encoded = Vec::with_capacity(queries.len());
        for (query_id, text) in queries {
            debug!("[SEARCH] Encoding query {query_id}");
            let representation = self.encoder.encode_query(text, params.query_weights).await?;
            encoded.push((query_id.clone(), representation));
        }

        info!(
            "[SEARCH] Scoring {} queries against {} documents",
            encoded.len(),
            store.len()
        );
        let top_k = params.top_k;
        let score_function = params.score_function;
        let per_query = tokio::task::spawn_blocking(move || {
            encoded
                .par_iter()
                .map(|(query_id, representation)| {
                    let scores = scorer::score(store.matrix(), representation, score_function)?;
                    let hits =
                        top_k::select_top_k(&scores, top_k, Some(query_id.as_str()), store.doc_ids())?;
                    Ok((query_id.clone(), hits))
                })
                .collect::<Result<Vec<_>>>()
        })
        .await??;

        Ok(per_query.into_iter().collect())
    }
}
