//! Post shortcode extraction from Instagram URLs.

use lensgram_http::error::AppError;

const POST_MARKER: &str = "/p/";

/// Extract the post shortcode: the path segment following `/p/`, up to the
/// next `/`. The URL is otherwise not normalized, so a query string glued to
/// the segment survives as-is.
pub fn shortcode(url: &str) -> Result<&str, AppError> {
    let (_, rest) = url.split_once(POST_MARKER).ok_or_else(invalid_url)?;

    let code = rest.split('/').next().unwrap_or_default();
    if code.is_empty() {
        return Err(invalid_url());
    }

    Ok(code)
}

fn invalid_url() -> AppError {
    AppError::bad_request("Invalid Instagram URL format")
}
