use crate::config::HttpConfig;
use crate::search::{truncate_chars, SearchError};
use std::time::Duration;

/// Build the HTTP client shared by one provider instance.
///
/// The timeout is always bounded; a stalled endpoint surfaces as a transport error.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, SearchError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs.max(1)))
        .build()?;
    Ok(client)
}

/// Send a request and return the body of a 2xx response.
///
/// Any other status becomes [`SearchError::Provider`] rather than a decode failure.
pub async fn fetch_body(request: reqwest::RequestBuilder, engine: &str) -> Result<String, SearchError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        let (body, _) = truncate_chars(&error_text, 200);

        tracing::warn!(
            engine = %engine,
            status = %status,
            error = %body,
            "search api error"
        );

        return Err(SearchError::Provider {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    Ok(response.text().await?)
}
