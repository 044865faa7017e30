mod basic;
mod bearer;
mod client;

pub use basic::BasicClient;
pub use bearer::Bearer;
pub use client::HttpClient;

use anyhow::{Result, anyhow};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::contract::ErrorBody;

/// Builds a request to `url`, with `body` encoded as JSON when given.
pub fn json_request<B: Serialize>(method: Method, url: &str, body: Option<&B>) -> Result<Request> {
    let mut req = Request::new(method, url.parse()?);
    if let Some(body) = body {
        *req.body_mut() = Some(serde_json::to_vec(body)?.into());
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    Ok(req)
}

/// Sends a JSON request and decodes a JSON response.
///
/// Non-2xx responses become errors carrying the service's `detail` message,
/// or `"{what}: {status}"` when the body has none.
pub async fn exchange_json<C, B, T>(
    client: &C,
    method: Method,
    url: &str,
    body: Option<&B>,
    what: &str,
) -> Result<T>
where
    C: HttpClient,
    B: Serialize + Sync,
    T: DeserializeOwned,
{
    let req = json_request(method, url, body)?;
    let resp = client.execute(req).await?;
    let resp = ensure_success(resp, what).await?;
    Ok(resp.json().await?)
}

/// Returns the response unchanged if it is 2xx; otherwise turns it into an error.
pub async fn ensure_success(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        debug!(status = status.as_u16(), "Request succeeded");
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message());

    warn!(status = status.as_u16(), detail = ?detail, "Request failed");

    Err(match detail {
        Some(detail) => anyhow!(detail),
        None => anyhow!(
            "{}: {}",
            what,
            status.canonical_reason().unwrap_or(status.as_str())
        ),
    })
}

/// `GET {url}` and report whether the answer was 2xx. Transport errors count
/// as unhealthy.
pub async fn probe<C: HttpClient>(client: &C, url: &str) -> bool {
    let req = match json_request::<()>(Method::GET, url, None) {
        Ok(req) => req,
        Err(e) => {
            warn!(url, error = %e, "Invalid health check URL");
            return false;
        }
    };

    match client.execute(req).await {
        Ok(resp) => resp.status().is_success(),
        Err(e) => {
            debug!(url, error = %e, "Health check failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_request_sets_body_and_content_type() {
        let req = json_request(Method::POST, "http://localhost:8002/calculate", Some(&[1, 2])).unwrap();
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        let body = req.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"[1,2]");
    }

    #[test]
    fn test_json_request_without_body() {
        let req = json_request::<()>(Method::GET, "http://localhost:8001/health", None).unwrap();
        assert!(req.body().is_none());
        assert!(req.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_json_request_rejects_bad_url() {
        assert!(json_request::<()>(Method::GET, "not a url", None).is_err());
    }
}
