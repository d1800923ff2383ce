//! HTTP client for a sparse encoder service

use super::SparseEncoder;
use crate::matrix::SparseVector;
use crate::types::{Document, QueryRepresentation};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct HttpEncoder {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    dimension: usize,
}

#[derive(Debug, Serialize)]
struct EncodeRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EncodeResponse {
    dimension: usize,
    vectors: Vec<SparseEntries>,
}

#[derive(Debug, Deserialize)]
struct SparseEntries {
    indices: Vec<u32>,
    values: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct EncodeQueryRequest {
    model: String,
    input: String,
    weighted: bool,
}

#[derive(Debug, Deserialize)]
struct EncodeQueryResponse {
    dimension: usize,
    indices: Vec<u32>,
    #[serde(default)]
    values: Vec<f32>,
}

impl HttpEncoder {
    pub fn new(base_url: Option<String>, model: Option<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| "http://127.0.0.1:8080".to_string());
        let model = model.unwrap_or_else(|| "sparta-msmarco-distilbert".to_string());

        Self {
            client: Client::new(),
            base_url,
            model,
            api_key,
            dimension: 0,
        }
    }

    /// Probe the service once to learn the feature-space size.
    pub async fn initialize(&mut self) -> Result<()> {
        let response = self.post_query("test", false).await?;
        if response.dimension == 0 {
            return Err(Error::Encoding(format!(
                "Encoder '{}' reported a zero-sized feature space",
                self.model
            )));
        }
        self.dimension = response.dimension;
        Ok(())
    }

    fn document_input(doc: &Document) -> String {
        if doc.title.is_empty() {
            doc.text.clone()
        } else {
            format!("{} {}", doc.title, doc.text)
        }
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let builder = self.client.post(url);
        match &self.api_key {
            Some(key) => builder.header("Authorization", format!("Bearer {key}")),
            None => builder,
        }
    }

    async fn post_query(&self, text: &str, weighted: bool) -> Result<EncodeQueryResponse> {
        let request = EncodeQueryRequest {
            model: self.model.clone(),
            input: text.to_string(),
            weighted,
        };

        let url = format!("{}/encode-query", self.base_url);

        let response = self
            .request(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Encoding(format!("Encoder error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Encoding(format!("Encoder API error {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Encoding(format!("Encoder JSON parse error: {e}")))
    }
}

#[async_trait]
impl SparseEncoder for HttpEncoder {
    async fn encode_documents(&self, documents: &[Document]) -> Result<Vec<SparseVector>> {
        let request = EncodeRequest {
            model: self.model.clone(),
            input: documents.iter().map(Self::document_input).collect(),
        };

        let url = format!("{}/encode", self.base_url);

        let response = self
            .request(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Encoding(format!("Encoder error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Encoding(format!("Encoder API error {status}: {body}")));
        }

        let encode_response: EncodeResponse = response
            .json()
            .await
            .map_err(|e| Error::Encoding(format!("Encoder JSON parse error: {e}")))?;

        encode_response
            .vectors
            .into_iter()
            .map(|entries| {
                if entries.values.len() != entries.indices.len() {
                    return Err(Error::Encoding(format!(
                        "Encoder returned {} weights for {} active features",
                        entries.values.len(),
                        entries.indices.len()
                    )));
                }
                if let Some(&bad) = entries
                    .indices
                    .iter()
                    .find(|&&i| i as usize >= encode_response.dimension)
                {
                    return Err(Error::Encoding(format!(
                        "Encoder returned feature index {bad} outside its feature space of {}",
                        encode_response.dimension
                    )));
                }
                Ok(SparseVector::new(entries.indices, entries.values))
            })
            .collect()
    }

    async fn encode_query(&self, text: &str, weighted: bool) -> Result<QueryRepresentation> {
        let query_response = self.post_query(text, weighted).await?;

        if let Some(&bad) = query_response
            .indices
            .iter()
            .find(|&&i| i as usize >= query_response.dimension)
        {
            return Err(Error::Encoding(format!(
                "Encoder returned feature index {bad} outside its feature space of {}",
                query_response.dimension
            )));
        }

        if !weighted {
            return Ok(QueryRepresentation::Terms(query_response.indices));
        }

        if query_response.values.len() != query_response.indices.len() {
            return Err(Error::Encoding(format!(
                "Encoder returned {} weights for {} active features",
                query_response.values.len(),
                query_response.indices.len()
            )));
        }

        let mut weights = vec![0.0; query_response.dimension];
        for (&index, &value) in query_response.indices.iter().zip(&query_response.values) {
            weights[index as usize] = value;
        }
        Ok(QueryRepresentation::Weights(weights))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encoder_name(&self) -> &str {
        "http"
    }
}
