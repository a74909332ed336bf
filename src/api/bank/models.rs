use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Staff role attached to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teller,
    /// Some backend route guards spell this role "custmor"
    #[serde(alias = "custmor")]
    Customer,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Roles an admin may assign when creating a user
    pub const ASSIGNABLE: [Role; 3] = [Role::Admin, Role::Teller, Role::Customer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teller => "teller",
            Role::Customer => "customer",
            Role::Unknown => "unknown",
        }
    }

    /// Case-insensitive parse of an assignable role name
    pub fn parse(input: &str) -> Option<Role> {
        let lowered = input.trim().to_lowercase();
        Self::ASSIGNABLE
            .into_iter()
            .find(|role| role.as_str() == lowered)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Teller
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body for POST /auth/create-user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub un: String,
    pub pas: String,
    pub vps: String,
    pub role: Role,
}

/// Body for POST /account/create
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub h: String,
    pub pin: String,
    pub vpin: String,
    pub mobileno: String,
    pub gmail: String,
}

/// Body for deposit and withdraw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub h: String,
    pub amount: i64,
    pub pin: String,
}

/// Body for POST /transaction/transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    pub h: String,
    pub pin: String,
    #[serde(rename = "toAccount")]
    pub to_account: String,
    pub amount: i64,
}

/// Account handle plus PIN, used by enquiry and history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRequest {
    pub h: String,
    pub pin: String,
}

/// Body for POST /account/change-pin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePinRequest {
    pub h: String,
    pub oldpin: String,
    pub newpin: String,
    pub vnewpin: String,
}

/// Body for POST /account/update-mobile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMobileRequest {
    pub h: String,
    pub pin: String,
    pub omobileno: String,
    pub nmobileno: String,
}

/// Body for POST /account/update-email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmailRequest {
    pub h: String,
    pub pin: String,
    pub oemail: String,
    pub nemail: String,
}

/// Generic `{ message }` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: String,
}

/// Response from POST /auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Response from GET /auth/check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub authenticated: Option<bool>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// Response from POST /auth/create-user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Response from POST /account/create
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub account_no: Option<String>,
}

/// Response from POST /transaction/transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub transfer_id: Option<Uuid>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Balance payload from POST /account/enquiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub balance: Option<i64>,
}

impl EnquiryResponse {
    /// Text shown to the operator; the backend usually phrases the balance itself
    pub fn summary(&self) -> String {
        match (&self.message, self.balance) {
            (Some(message), _) if !message.is_empty() => message.clone(),
            (_, Some(balance)) => format!("Current Balance: ₹{}", balance),
            _ => "Enquiry completed".to_string(),
        }
    }
}

/// One row of account history.
///
/// The backend sends each row as `[id, account_no, action, amount, created_at]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "HistoryTuple")]
pub struct HistoryEntry {
    pub id: i64,
    /// Second column; the client never interprets it
    pub account: serde_json::Value,
    pub action: String,
    pub amount: i64,
    pub timestamp: String,
}

#[derive(Deserialize)]
struct HistoryTuple(i64, serde_json::Value, String, i64, String);

impl From<HistoryTuple> for HistoryEntry {
    fn from(row: HistoryTuple) -> Self {
        let HistoryTuple(id, account, action, amount, timestamp) = row;
        Self {
            id,
            account,
            action,
            amount,
            timestamp,
        }
    }
}

/// Response from POST /account/history
#[derive(Debug, Clone)]
pub enum HistoryResponse {
    Entries {
        history: Vec<HistoryEntry>,
    },
    /// A 2xx body without a history list
    Notice {
        message: Option<String>,
        detail: Option<String>,
    },
}

#[derive(Deserialize)]
struct HistoryListing {
    history: Vec<HistoryEntry>,
}

impl<'de> Deserialize<'de> for HistoryResponse {
    /// A `history` array must decode row by row; only a body without one
    /// falls back to the notice shape.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let body = Value::deserialize(deserializer)?;

        if matches!(body.get("history"), Some(Value::Array(_))) {
            let listing: HistoryListing =
                serde_json::from_value(body).map_err(<D::Error as de::Error>::custom)?;
            return Ok(HistoryResponse::Entries {
                history: listing.history,
            });
        }

        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        Ok(HistoryResponse::Notice {
            message: text("message"),
            detail: text("detail"),
        })
    }
}

/// Error type shared by every client operation.
///
/// `Display` is the human-readable text shown to the operator as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Client-side field check blocked the submission
    #[error("{0}")]
    Validation(String),
    /// 401 on a session-bearing request
    #[error("Session expired, login again.")]
    SessionExpired,
    /// Non-2xx response carrying (or defaulting) a message
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// Transport-level failure
    #[error("Network error occurred")]
    Network(String),
    /// 2xx body that did not match the expected shape
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}
