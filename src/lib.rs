pub mod encoders;
pub mod matrix;
pub mod search;
pub mod store;

pub mod error;
pub mod types;
pub mod config;

pub use error::{Error, Result};
pub use search::{Retriever, ScoreFunction, SearchParams, SparseRetriever};
pub use types::*;
pub use config::Config;
