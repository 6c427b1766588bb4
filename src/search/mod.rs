pub mod http;
pub mod providers;

pub use providers::Engine;

/// Search provider abstraction - each engine is plugged in behind this trait
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a search query with given options
    async fn search(&self, options: &SearchOptions) -> Result<SearchResults, SearchError>;

    /// Human-readable engine name, used for display only
    fn name(&self) -> &str;
}

/// Search options for controlling results
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Free-text query (must not be blank)
    pub query: String,
    /// Maximum number of results to return (0 = unbounded)
    pub limit: usize,
    /// Result offset. No current engine pages, so this is carried but unused.
    pub offset: usize,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
            offset: 0,
        }
    }

    /// Reject blank queries before any request is built
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.query.trim().is_empty() {
            return Err(SearchError::InvalidInput("query must not be empty".to_string()));
        }
        Ok(())
    }

    /// Whether `count` results already satisfy the limit
    pub fn is_full(&self, count: usize) -> bool {
        self.limit > 0 && count >= self.limit
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new(String::new(), 10)
    }
}

/// Search results container, in the provider's relevance order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Individual search result items
    pub items: Vec<SearchResult>,
}

impl SearchResults {
    /// Build results from normalized candidates: drops entries without a URL
    /// and caps the count at `limit` (0 = no cap).
    pub fn from_candidates(candidates: impl IntoIterator<Item = SearchResult>, limit: usize) -> Self {
        let mut items = Vec::new();
        for candidate in candidates {
            if candidate.url.is_empty() {
                tracing::trace!(title = %candidate.title, "dropping result without url");
                continue;
            }
            items.push(candidate);
            if limit > 0 && items.len() >= limit {
                break;
            }
        }
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Individual search result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Page title
    pub title: String,
    /// Page URL, also the dedup key (compared as an opaque string)
    pub url: String,
    /// Snippet/description of the page content
    pub snippet: String,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, url: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// Search-related errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Decode(err.to_string())
    }
}

/// Keep at most `max_chars` characters of `text`, reporting whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}
