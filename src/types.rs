use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A corpus document. Fields are carried through to the encoder verbatim;
/// nothing in the scoring layer interprets them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub title: String,
    pub text: String,
}

impl Document {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// What the encoder produces for one query.
///
/// `Weights` is a dense vector over the full feature space (query term
/// weights are considered). `Terms` is the set of active feature indices
/// (binary relevance, only presence matters).
#[derive(Debug, Clone)]
pub enum QueryRepresentation {
    Weights(Vec<f32>),
    Terms(Vec<u32>),
}

/// Ordered document-id -> document mapping. Row order of the representation
/// matrix is derived from this map's key sequence at encode time.
pub type Corpus = BTreeMap<String, Document>;

/// Ordered query-id -> query-text mapping.
pub type Queries = BTreeMap<String, String>;

/// Per-query retrieval output: query id -> (document id -> score).
pub type Results = BTreeMap<String, HashMap<String, f32>>;
