//! Corpus representation store

use crate::encoders::SparseEncoder;
use crate::matrix::{CsrMatrix, SparseVector};
use crate::types::Corpus;
use crate::{Error, Result};

/// The encoded corpus: a sparse matrix plus the document-id ordering its
/// rows follow. Built once per search call, read-only afterwards.
pub struct RepresentationStore {
    matrix: CsrMatrix,
    doc_ids: Vec<String>,
}

impl RepresentationStore {
    /// Encode the whole corpus in `batch_size` chunks. Aborts on the first
    /// encoder failure: a partial matrix would no longer align with
    /// `doc_ids` row for row.
    pub async fn build(
        encoder: &dyn SparseEncoder,
        corpus: &Corpus,
        batch_size: usize,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".to_string()));
        }

        let doc_ids: Vec<String> = corpus.keys().cloned().collect();
        let documents: Vec<_> = corpus.values().cloned().collect();

        let mut rows: Vec<SparseVector> = Vec::with_capacity(documents.len());
        for (i, batch) in documents.chunks(batch_size).enumerate() {
            tracing::info!("[STORE] Encoding batch {} ({} documents)", i + 1, batch.len());
            let encoded = encoder.encode_documents(batch).await?;

            if encoded.len() != batch.len() {
                return Err(Error::Encoding(format!(
                    "Encoder returned {} rows for a batch of {}",
                    encoded.len(),
                    batch.len()
                )));
            }
            rows.extend(encoded);
        }

        let matrix = CsrMatrix::from_rows(&rows, encoder.dimension())?;
        tracing::info!(
            "[STORE] Encoded {} documents into a {}x{} matrix ({} non-zero entries)",
            doc_ids.len(),
            matrix.rows(),
            matrix.cols(),
            matrix.nnz()
        );

        Ok(Self { matrix, doc_ids })
    }

    pub fn matrix(&self) -> &CsrMatrix {
        &self.matrix
    }

    /// Document ids in matrix row order: row `i` is `doc_ids()[i]`.
    pub fn doc_ids(&self) -> &[String] {
        &self.doc_ids
    }

    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Document, QueryRepresentation};
    use async_trait::async_trait;

    /// Encodes each document as a single feature whose index is the
    /// document's position in the corpus and whose weight is the text length.
    struct PositionEncoder {
        dimension: usize,
        calls: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl SparseEncoder for PositionEncoder {
        async fn encode_documents(&self, documents: &[Document]) -> Result<Vec<SparseVector>> {
            let start = self
                .calls
                .fetch_add(documents.len(), std::sync::atomic::Ordering::SeqCst);
            Ok(documents
                .iter()
                .enumerate()
                .map(|(i, doc)| {
                    SparseVector::new(vec![(start + i) as u32], vec![doc.text.len() as f32])
                })
                .collect())
        }

        async fn encode_query(&self, _text: &str, _weighted: bool) -> Result<QueryRepresentation> {
            Ok(QueryRepresentation::Terms(vec![]))
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn encoder_name(&self) -> &str {
            "position"
        }
    }

    struct TruncatingEncoder;

    #[async_trait]
    impl SparseEncoder for TruncatingEncoder {
        async fn encode_documents(&self, _documents: &[Document]) -> Result<Vec<SparseVector>> {
            Ok(vec![])
        }

        async fn encode_query(&self, _text: &str, _weighted: bool) -> Result<QueryRepresentation> {
            Ok(QueryRepresentation::Terms(vec![]))
        }

        fn dimension(&self) -> usize {
            4
        }

        fn encoder_name(&self) -> &str {
            "truncating"
        }
    }

    fn corpus_of(entries: &[(&str, &str)]) -> Corpus {
        entries
            .iter()
            .map(|(id, text)| (id.to_string(), Document::new("", *text)))
            .collect()
    }

    #[tokio::test]
    async fn test_build_preserves_row_alignment() {
        let encoder = PositionEncoder {
            dimension: 8,
            calls: std::sync::atomic::AtomicUsize::new(0),
        };
        let corpus = corpus_of(&[("d1", "a"), ("d2", "bb"), ("d3", "ccc")]);

        let store = RepresentationStore::build(&encoder, &corpus, 2).await.unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.doc_ids(), &["d1", "d2", "d3"]);
        // Row i carries exactly one entry of weight len(text), at feature i.
        let per_row = store.matrix().sum_columns(&[0, 1, 2]);
        assert_eq!(per_row, vec![1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_build_rejects_zero_batch_size() {
        let encoder = PositionEncoder {
            dimension: 8,
            calls: std::sync::atomic::AtomicUsize::new(0),
        };
        let corpus = corpus_of(&[("d1", "a")]);

        let result = RepresentationStore::build(&encoder, &corpus, 0).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_build_rejects_row_count_mismatch() {
        let corpus = corpus_of(&[("d1", "a"), ("d2", "b")]);

        let result = RepresentationStore::build(&TruncatingEncoder, &corpus, 16).await;
        assert!(matches!(result, Err(Error::Encoding(_))));
    }
}
