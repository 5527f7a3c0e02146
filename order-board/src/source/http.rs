//! HTTP order source for the remote restaurant API

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{ApiResponse, DiningTable, GetOrdersQuery, GuestId, Order, PayGuestOrdersBody};

use super::OrderSource;
use crate::config::BoardConfig;
use crate::error::{BoardError, BoardResult};

/// Order source talking to the REST API
///
/// Single attempt per call; a failed refresh is simply retried on the next
/// board tick.
#[derive(Debug, Clone)]
pub struct HttpOrderSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpOrderSource {
    /// Create a new source from configuration
    pub fn new(config: &BoardConfig) -> BoardResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            token: config.access_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> BoardResult<T> {
        let response = self.authorize(request).send().await?;
        Self::handle_response(response).await
    }

    /// Map error statuses and unwrap the `{ message, data }` envelope
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> BoardResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            tracing::warn!(status = %status, body = %text, "Order API request failed");
            return match status {
                StatusCode::UNAUTHORIZED => Err(BoardError::Unauthorized),
                StatusCode::FORBIDDEN => Err(BoardError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(BoardError::NotFound(text)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(BoardError::Validation(text))
                }
                _ => Err(BoardError::Internal(text)),
            };
        }

        let body = response.bytes().await?;
        let envelope: ApiResponse<T> = serde_json::from_slice(&body)?;
        envelope
            .data
            .ok_or_else(|| BoardError::InvalidResponse(format!("Missing data: {}", envelope.message)))
    }
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    async fn fetch_orders(&self, query: &GetOrdersQuery) -> BoardResult<Vec<Order>> {
        let request = self.client.get(self.url("orders")).query(query);
        let orders: Vec<Order> = self.send(request).await?;
        tracing::debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    async fn list_tables(&self) -> BoardResult<Vec<DiningTable>> {
        self.send(self.client.get(self.url("tables"))).await
    }

    async fn pay_guest_orders(&self, guest_id: GuestId) -> BoardResult<Vec<Order>> {
        let request = self
            .client
            .post(self.url("orders/pay"))
            .json(&PayGuestOrdersBody { guest_id });
        self.send(request).await
    }
}
