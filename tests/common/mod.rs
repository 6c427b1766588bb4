//! Common test utilities and fixtures

#![allow(dead_code)]

use atlas::config::HttpConfig;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for config files
pub struct TestFixture {
    /// Temporary directory that gets cleaned up automatically
    pub temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with a temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// Create a test file with given content
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let filepath = self.path().join(name);
        std::fs::write(&filepath, content).expect("Failed to write test file");
        filepath
    }
}

/// HTTP settings used by provider tests
pub fn test_http_config() -> HttpConfig {
    HttpConfig {
        timeout_secs: 5,
        user_agent: "atlas-test/1.0".to_string(),
    }
}

/// Query matcher requiring every `(name, value)` pair, in any order
pub fn query_params(pairs: &[(&str, &str)]) -> mockito::Matcher {
    mockito::Matcher::AllOf(
        pairs
            .iter()
            .map(|(name, value)| mockito::Matcher::UrlEncoded(name.to_string(), value.to_string()))
            .collect(),
    )
}

/// An endpoint that accepts one connection and never answers.
///
/// Returns its base URL; the connection is held open for `hold`.
pub async fn stalled_endpoint(hold: std::time::Duration) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stalled endpoint");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            tokio::time::sleep(hold).await;
            drop(socket);
        }
    });

    format!("http://{addr}")
}
