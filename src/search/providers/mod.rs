pub mod duckduckgo;
pub mod hackernews;
pub mod reddit;
pub mod wikipedia;

pub use duckduckgo::DuckDuckGoProvider;
pub use hackernews::HackerNewsProvider;
pub use reddit::RedditProvider;
pub use wikipedia::WikipediaProvider;

use crate::config::HttpConfig;
use crate::search::{SearchError, SearchProvider};

/// The closed set of supported search engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    /// General web results (DuckDuckGo instant answers)
    #[default]
    DuckDuckGo,
    /// Encyclopedia articles
    Wikipedia,
    /// Tech news stories
    HackerNews,
    /// Discussion board threads
    Reddit,
}

impl Engine {
    pub const ALL: [Engine; 4] = [
        Engine::DuckDuckGo,
        Engine::Wikipedia,
        Engine::HackerNews,
        Engine::Reddit,
    ];

    /// Parse a selector such as `ddg`, `wiki`, `hn` or `reddit`.
    ///
    /// Returns `None` for unknown selectors; see [`Engine::from_selector`].
    pub fn parse(selector: &str) -> Option<Engine> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "ddg" | "duckduckgo" | "general-web" | "web" => Some(Engine::DuckDuckGo),
            "wiki" | "wikipedia" | "encyclopedia" => Some(Engine::Wikipedia),
            "hn" | "hackernews" | "hacker-news" | "tech-news" => Some(Engine::HackerNews),
            "reddit" | "discussion-board" => Some(Engine::Reddit),
            _ => None,
        }
    }

    /// Like [`Engine::parse`], but unknown selectors fall back to the default engine.
    pub fn from_selector(selector: &str) -> Engine {
        Self::parse(selector).unwrap_or_else(|| {
            tracing::warn!(
                engine = %selector,
                "unknown search engine, defaulting to duckduckgo"
            );
            Engine::default()
        })
    }

    /// Short selector used in config files and on the command line
    pub fn selector(&self) -> &'static str {
        match self {
            Engine::DuckDuckGo => "ddg",
            Engine::Wikipedia => "wiki",
            Engine::HackerNews => "hn",
            Engine::Reddit => "reddit",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Engine::DuckDuckGo => "DuckDuckGo",
            Engine::Wikipedia => "Wikipedia",
            Engine::HackerNews => "Hacker News",
            Engine::Reddit => "Reddit",
        }
    }

    /// Construct the provider for this engine
    pub fn build(&self, http: &HttpConfig) -> Result<Box<dyn SearchProvider>, SearchError> {
        let provider: Box<dyn SearchProvider> = match self {
            Engine::DuckDuckGo => Box::new(DuckDuckGoProvider::new(http)?),
            Engine::Wikipedia => Box::new(WikipediaProvider::new(http)?),
            Engine::HackerNews => Box::new(HackerNewsProvider::new(http)?),
            Engine::Reddit => Box::new(RedditProvider::new(http)?),
        };

        tracing::info!(engine = %self.selector(), "search provider initialized");
        Ok(provider)
    }
}
