//! Similarity search results.
//!
//! Reads the response of the vector search endpoint. Only the fields the client displays are
//! extracted; everything else in the response is ignored.

use crate::constants::{DEFAULT_TOP_K, SIMILAR_QUERY_MAX_CHARS};
use crate::error::{CoreError, CoreResult};
use cc_types::Similarity;
use serde::{Deserialize, Serialize};

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Similarity between the query and this transcript
    pub similarity: Similarity,
    /// Short excerpt of the matching transcript
    pub preview: String,
    /// Storage key of the full transcript record
    pub s3_key: String,
    /// Business the transcript was generated for
    pub entity_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// Body of a search endpoint request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
}

impl SearchRequest {
    /// Request for the default number of hits.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponseWire {
    #[serde(default)]
    results: Vec<SearchResultWire>,
}

#[derive(Debug, Deserialize)]
struct SearchResultWire {
    similarity: f64,
    #[serde(default)]
    preview: String,
    #[serde(default)]
    s3_key: String,
    #[serde(default)]
    metadata: SearchMetadataWire,
}

#[derive(Debug, Default, Deserialize)]
struct SearchMetadataWire {
    #[serde(default)]
    entity_name: String,
}

impl From<SearchResultWire> for SearchResult {
    fn from(wire: SearchResultWire) -> Self {
        let similarity = Similarity::new(wire.similarity).unwrap_or_else(|_| {
            tracing::warn!(
                "similarity {} for {} outside [0, 1], clamping",
                wire.similarity,
                wire.s3_key
            );
            Similarity::clamped(wire.similarity)
        });

        Self {
            similarity,
            preview: wire.preview,
            s3_key: wire.s3_key,
            entity_name: wire.metadata.entity_name,
        }
    }
}

/// Parses a search endpoint response body.
///
/// # Errors
///
/// Returns `CoreError::Deserialization` if `json` is not a valid response object.
pub fn parse_search_response(json: &str) -> CoreResult<SearchResponse> {
    let wire: SearchResponseWire = serde_json::from_str(json).map_err(CoreError::Deserialization)?;
    Ok(SearchResponse {
        results: wire.results.into_iter().map(SearchResult::from).collect(),
    })
}

impl SearchResult {
    /// List view row, for example `Acme Bank - 87.3%`.
    ///
    /// Exact halves round up, so `0.0625` reads `6.3%`.
    pub fn list_row(&self) -> String {
        let percent = (self.similarity.percent() * 10.0).round() / 10.0;
        format!("{} - {:.1}%", self.entity_name, percent)
    }

    /// Query used to find transcripts similar to this one.
    pub fn similar_query(&self) -> String {
        self.preview.chars().take(SIMILAR_QUERY_MAX_CHARS).collect()
    }

    /// Follow-up request for transcripts similar to this one.
    pub fn similar_request(&self) -> SearchRequest {
        SearchRequest::new(self.similar_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "results": [
            {
                "similarity": 0.873,
                "preview": "Agent: Thank you for calling Acme Bank.",
                "s3_key": "transcripts/b1/b1-0.json",
                "metadata": { "entity_name": "Acme Bank", "scenario": "billing" },
                "distance": 0.127
            },
            {
                "similarity": 1.02,
                "preview": "Customer: hi",
                "s3_key": "transcripts/b1/b1-1.json",
                "metadata": { "entity_name": "Acme Bank" }
            }
        ],
        "query": "billing"
    }"#;

    #[test]
    fn test_parse_response() {
        let response = parse_search_response(RESPONSE).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].entity_name, "Acme Bank");
        assert_eq!(response.results[0].s3_key, "transcripts/b1/b1-0.json");
        assert_eq!(response.results[0].list_row(), "Acme Bank - 87.3%");
    }

    #[test]
    fn test_out_of_range_similarity_is_clamped() {
        let response = parse_search_response(RESPONSE).unwrap();
        assert_eq!(response.results[1].similarity.value(), 1.0);
    }

    #[test]
    fn test_missing_results_is_empty() {
        let response = parse_search_response(r#"{"message": "no index"}"#).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = parse_search_response("not json").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn test_list_row_rounds_exact_halves_up() {
        let row = |similarity: f64| SearchResult {
            similarity: Similarity::new(similarity).unwrap(),
            preview: String::new(),
            s3_key: String::new(),
            entity_name: "Acme".into(),
        };
        assert_eq!(row(0.0625).list_row(), "Acme - 6.3%");
        assert_eq!(row(0.125).list_row(), "Acme - 12.5%");
        assert_eq!(row(1.0).list_row(), "Acme - 100.0%");
    }

    #[test]
    fn test_similar_query_truncates_on_chars() {
        let result = SearchResult {
            similarity: Similarity::new(0.5).unwrap(),
            preview: "é".repeat(250),
            s3_key: String::new(),
            entity_name: String::new(),
        };
        let query = result.similar_query();
        assert_eq!(query.chars().count(), 200);

        let short = SearchResult {
            preview: "short".into(),
            ..result
        };
        assert_eq!(short.similar_query(), "short");
    }

    #[test]
    fn test_similar_request_uses_default_top_k() {
        let response = parse_search_response(RESPONSE).unwrap();
        let request = response.results[1].similar_request();
        assert_eq!(request, SearchRequest::new("Customer: hi"));
        assert_eq!(request.top_k, 10);
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"query":"Customer: hi","top_k":10}"#
        );
    }
}
