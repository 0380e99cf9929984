//! OrderStore client for a record store exposed over REST
//!
//! Talks to the routes mounted by [`crate::server::ServerBuilder`], so an intake
//! form or review board can run in a different process than the store.

use crate::config::DashboardCredentials;
use crate::core::error::ErrorResponse;
use crate::core::{NewOrder, OrderRecord, OrderStatus, OrderStore, StoreError, StoreReceipt};
use crate::server::gate::{DASHBOARD_PASSWORD_HEADER, DASHBOARD_USER_HEADER};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::json;
use uuid::Uuid;

/// Remote order store speaking the `/pre_orders` REST protocol
#[derive(Clone)]
pub struct HttpOrderStore {
    client: Client,
    base_url: String,
    credentials: Option<DashboardCredentials>,
}

impl HttpOrderStore {
    /// Create a client for the store at `base_url` (e.g. `http://127.0.0.1:3000`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: None,
        }
    }

    /// Send dashboard credentials with list and update requests
    pub fn with_credentials(mut self, credentials: DashboardCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(creds) => request
                .header(DASHBOARD_USER_HEADER, &creds.user)
                .header(DASHBOARD_PASSWORD_HEADER, &creds.password),
            None => request,
        }
    }

    async fn send(operation: &str, request: RequestBuilder) -> Result<Response, StoreError> {
        request
            .send()
            .await
            .map_err(|e| StoreError::unreachable(format!("{} request failed: {}", operation, e)))
    }

    /// Turn a non-success response into a rejection carrying the server's message
    async fn rejection(operation: &str, response: Response) -> StoreError {
        let status = response.status();
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };
        StoreError::rejected(operation, message)
    }
}

#[async_trait]
impl OrderStore for HttpOrderStore {
    async fn create(&self, order: NewOrder) -> Result<StoreReceipt, StoreError> {
        let request = self.client.post(self.url("/pre_orders")).json(&order);
        let response = Self::send("create", request).await?;

        if !response.status().is_success() {
            return Err(Self::rejection("create", response).await);
        }

        response
            .json::<StoreReceipt>()
            .await
            .map_err(|e| StoreError::rejected("create", format!("malformed response: {}", e)))
    }

    async fn list_all(&self) -> Result<Vec<OrderRecord>, StoreError> {
        let request = self.authorized(self.client.get(self.url("/pre_orders")));
        let response = Self::send("list_all", request).await?;

        if !response.status().is_success() {
            return Err(Self::rejection("list_all", response).await);
        }

        response
            .json::<Vec<OrderRecord>>()
            .await
            .map_err(|e| StoreError::rejected("list_all", format!("malformed response: {}", e)))
    }

    async fn update_status(&self, id: &Uuid, status: OrderStatus) -> Result<(), StoreError> {
        let request = self.authorized(
            self.client
                .patch(self.url(&format!("/pre_orders/{}/status", id)))
                .json(&json!({ "status": status })),
        );
        let response = Self::send("update_status", request).await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound { id: *id }),
            _ => Err(Self::rejection("update_status", response).await),
        }
    }
}
