//! The HTTP probe.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ProbeError;
use crate::response::ProbeResponse;

/// Issues single HTTP requests against the services under verification.
///
/// One call is one attempt: there is no retry logic at this layer, and a
/// non-2xx status is reported in the [`ProbeResponse`] rather than raised,
/// so callers decide what counts as a failure.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Creates a probe with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Issues a single request with an optional JSON body.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<ProbeResponse, ProbeError> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, url, "probe request");
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        tracing::debug!(%method, url, %status, "probe response");

        Ok(ProbeResponse { status, body })
    }

    /// Issues a single GET request.
    pub async fn get(&self, url: &str) -> Result<ProbeResponse, ProbeError> {
        self.send(Method::GET, url, None).await
    }

    /// Issues a single POST request with a JSON body.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<ProbeResponse, ProbeError> {
        tracing::debug!(url, "probe request");
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        tracing::debug!(url, %status, "probe response");

        Ok(ProbeResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use serde_json::json;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let app = Router::new().route(
            "/orders/1",
            get(|| async { axum::Json(json!({"state": "APPROVED", "orderTotal": "61.70"})) }),
        );
        let base = serve(app).await;

        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
        let resp = probe.get(&format!("{base}/orders/1")).await.unwrap();

        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.extract_str("state").unwrap(), "APPROVED");
        assert_eq!(resp.extract_str("orderTotal").unwrap(), "61.70");
    }

    #[tokio::test]
    async fn test_non_2xx_status_is_reported_not_raised() {
        let app = Router::new().route(
            "/accounts/9",
            get(|| async { (StatusCode::NOT_FOUND, axum::Json(json!({"error": "not found"}))) }),
        );
        let base = serve(app).await;

        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
        let resp = probe.get(&format!("{base}/accounts/9")).await.unwrap();

        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.extract_str("error").unwrap(), "not found");
    }

    #[tokio::test]
    async fn test_post_json_sends_body() {
        let app = Router::new().route(
            "/consumers",
            post(|axum::Json(body): axum::Json<Value>| async move {
                assert_eq!(body["name"]["first"], "John");
                axum::Json(json!({"consumerId": 1}))
            }),
        );
        let base = serve(app).await;

        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
        let resp = probe
            .post_json(
                &format!("{base}/consumers"),
                &json!({"name": {"first": "John", "last": "Doe"}}),
            )
            .await
            .unwrap();

        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.entity_ref("consumerId").unwrap(), 1i64.into());
    }

    #[tokio::test]
    async fn test_empty_body_decodes_to_null() {
        let app = Router::new().route("/orders/1/cancel", post(|| async { StatusCode::OK }));
        let base = serve(app).await;

        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
        let resp = probe
            .post_json(&format!("{base}/orders/1/cancel"), &json!({}))
            .await
            .unwrap();

        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body, Value::Null);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let probe = HttpProbe::new(Duration::from_secs(1)).unwrap();
        // Nothing listens on this port.
        let result = probe.get("http://127.0.0.1:1/orders/1").await;
        assert!(matches!(result, Err(ProbeError::Transport(_))));
    }
}
