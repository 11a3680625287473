use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{ImageResult, ProxyConfig, SearchError};

/// Somewhere to look up candidate images for a free-text query.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<ImageResult>, SearchError>;
}

/// File search against the Wikimedia Commons API.
#[derive(Debug, Clone)]
pub struct WikimediaSource {
    client: Client,
    endpoint: String,
    limit: u32,
}

impl WikimediaSource {
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.search_endpoint.clone(),
            limit: config.result_limit,
        }
    }
}

#[async_trait]
impl ImageSource for WikimediaSource {
    async fn search(&self, query: &str) -> Result<Vec<ImageResult>, SearchError> {
        let limit = self.limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("generator", "search"),
                ("gsrsearch", query),
                // namespace 6 holds File: pages
                ("gsrnamespace", "6"),
                ("gsrlimit", limit.as_str()),
                ("prop", "imageinfo"),
                ("iiprop", "url"),
                ("origin", "*"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UpstreamStatus(status.as_u16()));
        }

        let body: WikimediaResponse = response.json().await?;
        let images = body.into_images();
        tracing::debug!("{} images for {query:?}", images.len());
        Ok(images)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WikimediaResponse {
    #[serde(default)]
    query: Option<WikimediaQuery>,
}

#[derive(Debug, Deserialize)]
struct WikimediaQuery {
    #[serde(default)]
    pages: HashMap<String, WikimediaPage>,
}

#[derive(Debug, Deserialize)]
struct WikimediaPage {
    title: String,
    #[serde(default)]
    index: Option<u32>,
    #[serde(default)]
    imageinfo: Vec<WikimediaImageInfo>,
}

#[derive(Debug, Deserialize)]
struct WikimediaImageInfo {
    url: String,
}

impl WikimediaResponse {
    /// Pages come back keyed by page id; `index` holds the search rank.
    /// Pages without an image URL are dropped.
    pub fn into_images(self) -> Vec<ImageResult> {
        let Some(query) = self.query else {
            return vec![];
        };
        let mut pages: Vec<WikimediaPage> = query.pages.into_values().collect();
        pages.sort_by_key(|page| page.index.unwrap_or(u32::MAX));
        pages
            .into_iter()
            .filter_map(|page| {
                let url = page.imageinfo.into_iter().next()?.url;
                Some(ImageResult {
                    title: page.title,
                    url,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_follow_search_rank() {
        let body: WikimediaResponse = serde_json::from_str(
            r#"{
                "batchcomplete": "",
                "query": {
                    "pages": {
                        "901": {
                            "pageid": 901, "ns": 6, "title": "File:Second.jpg", "index": 2,
                            "imagetype": "uploaded",
                            "imageinfo": [{"url": "https://upload.wikimedia.org/second.jpg"}]
                        },
                        "17": {
                            "pageid": 17, "ns": 6, "title": "File:First.jpg", "index": 1,
                            "imageinfo": [{"url": "https://upload.wikimedia.org/first.jpg"}]
                        },
                        "42": {
                            "pageid": 42, "ns": 6, "title": "File:Missing.jpg", "index": 3
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let images = body.into_images();
        assert_eq!(
            images,
            vec![
                ImageResult {
                    title: "File:First.jpg".to_string(),
                    url: "https://upload.wikimedia.org/first.jpg".to_string(),
                },
                ImageResult {
                    title: "File:Second.jpg".to_string(),
                    url: "https://upload.wikimedia.org/second.jpg".to_string(),
                },
            ]
        );
    }

    #[test]
    fn no_hits_means_no_query_block() {
        let body: WikimediaResponse = serde_json::from_str(r#"{"batchcomplete": ""}"#).unwrap();
        assert!(body.into_images().is_empty());
    }
}
