use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub title: String,
    pub url: String,
}

/// Body of `POST /search-images`. The query is optional here so a missing
/// field gets the same answer as a blank one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub search_query: Option<String>,
}

impl SearchRequest {
    pub fn query(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub images: Vec<ImageResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed_and_blank_is_missing() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"searchQuery": "  Apollo 11 launch "}"#).unwrap();
        assert_eq!(request.query(), Some("Apollo 11 launch"));

        let blank: SearchRequest = serde_json::from_str(r#"{"searchQuery": "   "}"#).unwrap();
        assert_eq!(blank.query(), None);

        let missing: SearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.query(), None);
    }
}
