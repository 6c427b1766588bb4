use crate::config::HttpConfig;
use crate::search::http::{build_client, fetch_body};
use crate::search::{truncate_chars, SearchError, SearchOptions, SearchProvider, SearchResult, SearchResults};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://hn.algolia.com/api/v1/search";
const DISCUSSION_URL: &str = "https://news.ycombinator.com/item?id=";
const SNIPPET_CHARS: usize = 200;

/// Hacker News provider backed by the Algolia search API
///
/// Only stories are searched. Self posts without an external link point at
/// their discussion page instead.
pub struct HackerNewsProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct HnResponse {
    pub hits: Vec<HnHit>,
}

// Algolia sends explicit nulls for missing fields, hence the Options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct HnHit {
    pub title: Option<String>,
    pub url: Option<String>,
    pub story_text: Option<String>,
    pub author: Option<String>,
    pub points: Option<i64>,
    pub num_comments: Option<i64>,
    #[serde(rename = "objectID")]
    pub object_id: Option<String>,
}

impl HackerNewsProvider {
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

    pub(crate) fn normalize(response: HnResponse, options: &SearchOptions) -> SearchResults {
        let candidates = response.hits.into_iter().filter_map(|hit| {
            let title = hit.title.clone().unwrap_or_default();
            if title.is_empty() {
                return None;
            }
            let snippet = snippet_for(&hit);
            let url = match hit.url.filter(|url| !url.is_empty()) {
                Some(url) => url,
                None => format!("{DISCUSSION_URL}{}", hit.object_id.unwrap_or_default()),
            };
            Some(SearchResult::new(title, url, snippet))
        });

        SearchResults::from_candidates(candidates, options.limit)
    }
}

/// Story text when present (always ellipsized), otherwise a metadata line.
fn snippet_for(hit: &HnHit) -> String {
    match hit.story_text.as_deref().filter(|text| !text.is_empty()) {
        Some(text) => {
            let (head, _) = truncate_chars(text, SNIPPET_CHARS);
            format!("{head}...")
        }
        None => format!(
            "By {} | {} points | {} comments",
            hit.author.as_deref().unwrap_or_default(),
            hit.points.unwrap_or_default(),
            hit.num_comments.unwrap_or_default()
        ),
    }
}

#[async_trait::async_trait]
impl SearchProvider for HackerNewsProvider {
    async fn search(&self, options: &SearchOptions) -> Result<SearchResults, SearchError> {
        options.validate()?;

        tracing::debug!(
            query = %options.query,
            limit = options.limit,
            "performing hacker news search"
        );

        let mut params = vec![
            ("query", options.query.clone()),
            ("tags", "story".to_string()),
        ];
        if options.limit > 0 {
            params.push(("hitsPerPage", options.limit.to_string()));
        }

        let request = self.client.get(&self.base_url).query(&params);

        let body = fetch_body(request, self.name()).await?;
        let response: HnResponse = serde_json::from_str(&body)?;
        let results = Self::normalize(response, options);

        tracing::debug!(
            query = %options.query,
            result_count = results.len(),
            "hacker news search completed"
        );

        Ok(results)
    }

    fn name(&self) -> &str {
        "Hacker News"
    }
}
