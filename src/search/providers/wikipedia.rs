use crate::config::HttpConfig;
use crate::search::http::{build_client, fetch_body};
use crate::search::{SearchError, SearchOptions, SearchProvider, SearchResult, SearchResults};
use reqwest::header::USER_AGENT;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Wikipedia OpenSearch provider
///
/// The API answers with a positional array: `[query, [titles], [descriptions], [urls]]`.
/// Wikimedia asks clients to identify themselves, so the configured user agent is sent.
pub struct WikipediaProvider {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl WikipediaProvider {
    pub fn new(http: &HttpConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: build_client(http)?,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: http.user_agent.clone(),
        })
    }

    /// Point the provider at a different endpoint (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn normalize(raw: Vec<Value>, options: &SearchOptions) -> Result<SearchResults, SearchError> {
        if raw.len() < 4 {
            return Ok(SearchResults::default());
        }

        let titles = string_column(&raw[1], "titles")?;
        let descriptions = string_column(&raw[2], "descriptions")?;
        let urls = string_column(&raw[3], "urls")?;

        if titles.len() != descriptions.len() || titles.len() != urls.len() {
            tracing::warn!(
                titles = titles.len(),
                descriptions = descriptions.len(),
                urls = urls.len(),
                "opensearch columns differ in length"
            );
        }

        let candidates = titles
            .into_iter()
            .zip(descriptions)
            .zip(urls)
            .map(|((title, description), url)| SearchResult::new(title, url, description));

        Ok(SearchResults::from_candidates(candidates, options.limit))
    }
}

fn string_column<'a>(value: &'a Value, column: &str) -> Result<Vec<&'a str>, SearchError> {
    let entries = value
        .as_array()
        .ok_or_else(|| SearchError::Decode(format!("opensearch {column} is not an array")))?;

    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .ok_or_else(|| SearchError::Decode(format!("opensearch {column} entry is not a string")))
        })
        .collect()
}

#[async_trait::async_trait]
impl SearchProvider for WikipediaProvider {
    async fn search(&self, options: &SearchOptions) -> Result<SearchResults, SearchError> {
        options.validate()?;

        tracing::debug!(
            query = %options.query,
            limit = options.limit,
            "performing wikipedia search"
        );

        let mut params = vec![
            ("action", "opensearch".to_string()),
            ("search", options.query.clone()),
            ("namespace", "0".to_string()),
            ("format", "json".to_string()),
        ];
        if options.limit > 0 {
            params.push(("limit", options.limit.to_string()));
        }

        let request = self
            .client
            .get(&self.base_url)
            .header(USER_AGENT, &self.user_agent)
            .query(&params);

        let body = fetch_body(request, self.name()).await?;
        let raw: Vec<Value> = serde_json::from_str(&body)?;
        let results = Self::normalize(raw, options)?;

        tracing::debug!(
            query = %options.query,
            result_count = results.len(),
            "wikipedia search completed"
        );

        Ok(results)
    }

    fn name(&self) -> &str {
        "Wikipedia"
    }
}
