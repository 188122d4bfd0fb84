//! HTTP adapter for the Strichliste ledger.
//!
//! Every request is bounded by the configured timeout. Nothing is retried;
//! the ledger itself is the only source of idempotency.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::foundation::LedgerAccountId;
use crate::ports::{
    Ledger, LedgerError, LedgerUser, TransactionReceipt, TransactionRequest, UserSearchResult,
};

use super::wire_types::{
    WireSearchResponse, WireTransactionRequest, WireTransactionResponse, WireUser,
};

/// Ledger adapter backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpLedger {
    client: Client,
    timeout: Duration,
}

impl HttpLedger {
    /// Creates an adapter whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Request(format!("Fehler beim Request erstellen: {}", e)))?;
        Ok(Self { client, timeout })
    }

    fn url(base_url: &str, path: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, LedgerError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                LedgerError::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                LedgerError::Request(e.to_string())
            }
        })
    }

    /// Checks the status and decodes the JSON body.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, LedgerError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| LedgerError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Ledger for HttpLedger {
    async fn search_users(
        &self,
        base_url: &str,
        query: &str,
    ) -> Result<UserSearchResult, LedgerError> {
        let request = self
            .client
            .get(Self::url(base_url, "/api/user/search"))
            .query(&[("query", query)]);
        let response = self.send(request).await?;
        let body: WireSearchResponse = Self::decode(response).await?;
        tracing::debug!(query, count = body.count, "ledger user search");
        Ok(body.into())
    }

    async fn get_user(
        &self,
        base_url: &str,
        id: LedgerAccountId,
    ) -> Result<LedgerUser, LedgerError> {
        let request = self
            .client
            .get(Self::url(base_url, &format!("/api/user/{}", id)));
        let response = self.send(request).await?;
        let user: WireUser = Self::decode(response).await?;
        Ok(user.into())
    }

    async fn create_transaction(
        &self,
        base_url: &str,
        account: LedgerAccountId,
        request: &TransactionRequest,
    ) -> Result<TransactionReceipt, LedgerError> {
        let body = WireTransactionRequest::from(request);
        let http_request = self
            .client
            .post(Self::url(base_url, &format!("/api/user/{}/transaction", account)))
            .json(&body);
        let response = self.send(http_request).await?;
        let receipt: WireTransactionResponse = Self::decode(response).await?;
        tracing::info!(
            account = account.value(),
            recipient = request.recipient.value(),
            amount = request.amount,
            transaction = receipt.id,
            "ledger transaction created"
        );
        Ok(receipt.into())
    }
}
