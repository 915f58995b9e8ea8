/// HTTP client for forwarding requests to the content API.
use std::time::Duration;

use axum::http::StatusCode;

use crate::config::Config;
use crate::errors::AppError;
use crate::token::TokenManager;

pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
}

impl UpstreamClient {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        // One shared client: connection pooling across requests. No retry
        // middleware — upstream failures propagate immediately.
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
            client_id: cfg.client_id.clone(),
        })
    }

    /// GET `base_url + endpoint` with auth headers and the given query
    /// pairs, returning the parsed JSON body.
    ///
    /// Non-2xx responses surface as [`AppError::Upstream`] carrying the
    /// upstream status and body verbatim; transport failures surface as
    /// [`AppError::Connection`].
    #[tracing::instrument(skip(self, tokens, query), fields(endpoint = %endpoint))]
    pub async fn forward(
        &self,
        tokens: &TokenManager,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, AppError> {
        let token = tokens.get_valid_token(&self.client).await?;

        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self
            .client
            .get(&url)
            .header("x-auth-token", token)
            .header("x-client-id", &self.client_id)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Connection(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, "upstream returned an error");
            return Err(AppError::Upstream {
                status: StatusCode::from_u16(status.as_u16())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                body,
            });
        }

        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid JSON from upstream: {}", e)))
    }
}
