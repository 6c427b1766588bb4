use crate::config::HttpConfig;
use crate::search::http::{build_client, fetch_body};
use crate::search::{truncate_chars, SearchError, SearchOptions, SearchProvider, SearchResult, SearchResults};
use reqwest::header::USER_AGENT;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://www.reddit.com/search.json";
const ORIGIN: &str = "https://www.reddit.com";
const SNIPPET_CHARS: usize = 200;

/// Reddit search provider
///
/// Reddit rejects anonymous clients without a descriptive user agent, so the
/// header is always set. Non-2xx answers are reported as provider errors.
pub struct RedditProvider {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RedditResponse {
    pub data: RedditListing,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RedditListing {
    pub children: Vec<RedditChild>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RedditChild {
    pub data: RedditPost,
}

// Deleted authors and removed posts come back with explicit nulls.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RedditPost {
    pub title: Option<String>,
    pub url: Option<String>,
    pub selftext: Option<String>,
    pub subreddit: Option<String>,
    pub author: Option<String>,
    pub score: Option<i64>,
    pub num_comments: Option<i64>,
    pub permalink: Option<String>,
}

impl RedditProvider {
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

    pub(crate) fn normalize(response: RedditResponse, options: &SearchOptions) -> SearchResults {
        let candidates = response.data.children.into_iter().map(|child| {
            let post = child.data;
            let snippet = snippet_for(&post);
            let url = resolve_link(
                post.url.as_deref().unwrap_or_default(),
                post.permalink.as_deref().unwrap_or_default(),
            );
            SearchResult::new(post.title.unwrap_or_default(), url, snippet)
        });

        SearchResults::from_candidates(candidates, options.limit)
    }
}

fn snippet_for(post: &RedditPost) -> String {
    let meta = format!(
        "r/{} | By u/{} | {} pts | {} comments",
        post.subreddit.as_deref().unwrap_or_default(),
        post.author.as_deref().unwrap_or_default(),
        post.score.unwrap_or(0),
        post.num_comments.unwrap_or(0)
    );

    let selftext = post.selftext.as_deref().unwrap_or_default();
    if selftext.is_empty() {
        return meta;
    }

    let flattened = selftext.replace('\n', " ");
    let body = match truncate_chars(&flattened, SNIPPET_CHARS) {
        (head, true) => format!("{head}..."),
        (whole, false) => whole.to_string(),
    };
    format!("{body}\n{meta}")
}

/// Link posts keep their target; self posts resolve to the thread permalink.
fn resolve_link(url: &str, permalink: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{ORIGIN}{permalink}")
    }
}

#[async_trait::async_trait]
impl SearchProvider for RedditProvider {
    async fn search(&self, options: &SearchOptions) -> Result<SearchResults, SearchError> {
        options.validate()?;

        tracing::debug!(
            query = %options.query,
            limit = options.limit,
            "performing reddit search"
        );

        let mut params = vec![
            ("q", options.query.clone()),
            ("sort", "relevance".to_string()),
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
        let response: RedditResponse = serde_json::from_str(&body)?;
        let results = Self::normalize(response, options);

        tracing::debug!(
            query = %options.query,
            result_count = results.len(),
            "reddit search completed"
        );

        Ok(results)
    }

    fn name(&self) -> &str {
        "Reddit"
    }
}
