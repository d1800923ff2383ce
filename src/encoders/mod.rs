
pub mod http;

use crate::matrix::SparseVector;
use crate::types::{Document, QueryRepresentation};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SparseEncoder: Send + Sync {
    /// Encode a batch of documents into sparse term-weight vectors, one per
    /// document, in input order.
    async fn encode_documents(&self, documents: &[Document]) -> Result<Vec<SparseVector>>;

    /// Encode a query. `weighted` selects a dense weight vector over the
    /// full feature space; otherwise only the active feature indices.
    async fn encode_query(&self, text: &str, weighted: bool) -> Result<QueryRepresentation>;

    /// Size of the feature space (matrix column count).
    fn dimension(&self) -> usize;

    fn encoder_name(&self) -> &str;
}

pub use http::HttpEncoder;
