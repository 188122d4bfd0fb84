//! JSON shapes of the Strichliste REST API.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::LedgerAccountId;
use crate::ports::{LedgerUser, TransactionReceipt, TransactionRequest, UserSearchResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUser {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_disabled: bool,
}

impl From<WireUser> for LedgerUser {
    fn from(user: WireUser) -> Self {
        LedgerUser {
            id: LedgerAccountId::new(user.id),
            name: user.name,
            is_disabled: user.is_disabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSearchResponse {
    pub count: usize,
    #[serde(default)]
    pub users: Vec<WireUser>,
}

impl From<WireSearchResponse> for UserSearchResult {
    fn from(response: WireSearchResponse) -> Self {
        UserSearchResult {
            count: response.count,
            users: response.users.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransactionRequest {
    pub amount: i64,
    pub recipient_id: i64,
    pub comment: String,
}

impl From<&TransactionRequest> for WireTransactionRequest {
    fn from(request: &TransactionRequest) -> Self {
        WireTransactionRequest {
            amount: request.amount,
            recipient_id: request.recipient.value(),
            comment: request.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTransactionResponse {
    pub id: i64,
}

impl From<WireTransactionResponse> for TransactionReceipt {
    fn from(response: WireTransactionResponse) -> Self {
        TransactionReceipt { id: response.id }
    }
}
