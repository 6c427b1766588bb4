use crate::config::HttpConfig;
use crate::search::http::{build_client, fetch_body};
use crate::search::{SearchError, SearchOptions, SearchProvider, SearchResult, SearchResults};
use serde::Deserialize;
use std::collections::HashSet;

const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com/";

/// DuckDuckGo Instant Answer API provider
///
/// No API key required. The endpoint returns an abstract, a short list of
/// direct results, and a tree of related topics which is flattened here.
/// Documentation: https://duckduckgo.com/api
pub struct DuckDuckGoProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DdgResponse {
    #[serde(rename = "Abstract")]
    pub abstract_text: String,
    #[serde(rename = "AbstractURL")]
    pub abstract_url: String,
    #[serde(rename = "AbstractSource")]
    pub abstract_source: String,
    #[serde(rename = "Results")]
    pub results: Vec<DdgTopic>,
    #[serde(rename = "RelatedTopics")]
    pub related_topics: Vec<DdgTopic>,
}

/// A related topic node; category nodes carry children in `Topics`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DdgTopic {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "FirstURL")]
    pub first_url: String,
    #[serde(rename = "Topics")]
    pub topics: Vec<DdgTopic>,
}

impl DuckDuckGoProvider {
    pub fn new(http: &HttpConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: build_client(http)?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different endpoint (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Turn a decoded response into ordered, deduplicated results.
    ///
    /// Order: abstract, direct results, then the topic tree in pre-order.
    pub(crate) fn normalize(response: DdgResponse, options: &SearchOptions) -> SearchResults {
        let mut candidates = Vec::new();

        if !response.abstract_url.is_empty() {
            candidates.push(SearchResult::new(
                format!("{} (Summary)", response.abstract_source),
                response.abstract_url,
                response.abstract_text,
            ));
        }

        for direct in response.results {
            candidates.push(SearchResult::new(
                direct.text,
                direct.first_url,
                "Official/Direct Result",
            ));
        }

        flatten_topics(response.related_topics, &mut candidates);

        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for candidate in candidates {
            if candidate.url.is_empty() || seen.contains(&candidate.url) {
                continue;
            }
            if is_internal_link(&candidate.url) {
                tracing::trace!(url = %candidate.url, "skipping internal duckduckgo link");
                continue;
            }
            seen.insert(candidate.url.clone());
            items.push(candidate);
            if options.is_full(items.len()) {
                break;
            }
        }

        SearchResults { items }
    }
}

/// Depth-first, pre-order. Children are visited whether or not the parent has a link.
fn flatten_topics(topics: Vec<DdgTopic>, out: &mut Vec<SearchResult>) {
    for topic in topics {
        if !topic.first_url.is_empty() {
            out.push(SearchResult::new(
                topic.text.clone(),
                topic.first_url,
                topic.text,
            ));
        }
        if !topic.topics.is_empty() {
            flatten_topics(topic.topics, out);
        }
    }
}

/// Category and topic pages on duckduckgo.com itself are not real results.
fn is_internal_link(url: &str) -> bool {
    url.contains("duckduckgo.com/") && (url.contains("/c/") || url.ends_with("topic"))
}

#[async_trait::async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, options: &SearchOptions) -> Result<SearchResults, SearchError> {
        options.validate()?;

        tracing::debug!(
            query = %options.query,
            limit = options.limit,
            "performing duckduckgo search"
        );

        let request = self.client.get(&self.base_url).query(&[
            ("q", options.query.as_str()),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ]);

        let body = fetch_body(request, self.name()).await?;
        let response: DdgResponse = serde_json::from_str(&body)?;
        let results = Self::normalize(response, options);

        tracing::debug!(
            query = %options.query,
            result_count = results.len(),
            "duckduckgo search completed"
        );

        Ok(results)
    }

    fn name(&self) -> &str {
        "DuckDuckGo"
    }
}
