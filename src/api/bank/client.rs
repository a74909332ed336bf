use super::models::{
    AccountRequest, ApiError, ChangePinRequest, CreateAccountRequest, CreateAccountResponse,
    CreateUserRequest, CreateUserResponse, EnquiryResponse, HistoryResponse, LoginResponse,
    MessageResponse, SessionInfo, TransactionRequest, TransferRequest, TransferResponse,
    UpdateEmailRequest, UpdateMobileRequest,
};
use super::transport::{ApiRequest, HttpTransport, Payload, Transport};
use crate::utils::extract_error_message;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

type SessionHook = Arc<dyn Fn() + Send + Sync>;

/// Client for the banking backend.
///
/// Constructed explicitly and handed to the views; swap the transport to test
/// without a network.
#[derive(Clone)]
pub struct BankClient {
    transport: Arc<dyn Transport>,
    on_session_expired: Option<SessionHook>,
}

impl BankClient {
    const DEFAULT_ERROR: &'static str = "API failed";

    /// Create a client over any transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            on_session_expired: None,
        }
    }

    /// Create a client talking HTTP to `base_url`
    pub fn http(base_url: &str) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(base_url).map_err(ApiError::Network)?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// Register the callback fired when a session-bearing call gets a 401
    pub fn on_session_expired<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }

    /// Send one request and normalize the outcome.
    ///
    /// `session_guard` turns a 401 into a session reset plus `SessionExpired`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
        session_guard: bool,
    ) -> Result<T, ApiError> {
        let path = request.path.clone();

        let response = self.transport.send(request).await.map_err(|e| {
            warn!("{} failed before a response: {}", path, e);
            ApiError::Network(e)
        })?;

        if session_guard && response.status == 401 {
            warn!("{} returned 401, resetting session", path);
            self.transport.clear_session();
            if let Some(hook) = &self.on_session_expired {
                hook();
            }
            return Err(ApiError::SessionExpired);
        }

        if !response.is_success() {
            let message =
                extract_error_message(&response.body).unwrap_or_else(|| fallback.to_string());
            if response.status >= 500 {
                warn!("Server error {} on {}: {}", response.status, path, message);
            } else {
                debug!("{} rejected with {}: {}", path, response.status, message);
            }
            return Err(ApiError::Rejected {
                status: response.status,
                message,
            });
        }

        serde_json::from_str::<T>(&response.body)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {}", e)))
    }

    /// POST a JSON body to a session-bearing endpoint
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let json = serde_json::to_value(body)
            .map_err(|e| ApiError::Decode(format!("Failed to encode request: {}", e)))?;
        self.execute(
            ApiRequest::post(path, Payload::Json(json)),
            Self::DEFAULT_ERROR,
            true,
        )
        .await
    }

    /// POST /auth/login
    ///
    /// Sends the credentials as multipart form fields. On success the session
    /// cookie is kept by the transport.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let form = vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        let response: LoginResponse = self
            .execute(
                ApiRequest::post("/auth/login", Payload::Form(form)),
                "Login failed",
                false,
            )
            .await?;

        info!("Logged in as {} ({})", username, response.role);
        Ok(response)
    }

    /// POST /auth/logout
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let response = self
            .execute(
                ApiRequest::post("/auth/logout", Payload::Empty),
                "Logout failed",
                true,
            )
            .await?;
        info!("Logged out");
        Ok(response)
    }

    /// GET /auth/check
    ///
    /// Any failure, including network errors, reads as "not authenticated".
    pub async fn check_session(&self) -> Option<SessionInfo> {
        match self
            .execute::<SessionInfo>(ApiRequest::get("/auth/check"), Self::DEFAULT_ERROR, false)
            .await
        {
            Ok(session) => Some(session),
            Err(e) => {
                debug!("No active session: {}", e);
                None
            }
        }
    }

    /// POST /auth/create-user
    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<CreateUserResponse, ApiError> {
        self.post_json("/auth/create-user", request).await
    }

    /// POST /account/create
    pub async fn create_account(
        &self,
        request: &CreateAccountRequest,
    ) -> Result<CreateAccountResponse, ApiError> {
        self.post_json("/account/create", request).await
    }

    /// POST /transaction/deposit
    pub async fn deposit(&self, request: &TransactionRequest) -> Result<MessageResponse, ApiError> {
        self.post_json("/transaction/deposit", request).await
    }

    /// POST /transaction/withdraw
    pub async fn withdraw(
        &self,
        request: &TransactionRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.post_json("/transaction/withdraw", request).await
    }

    /// POST /transaction/transfer
    ///
    /// The backend debits `h` and credits `toAccount`; atomicity is its concern.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<TransferResponse, ApiError> {
        self.post_json("/transaction/transfer", request).await
    }

    /// POST /account/enquiry
    pub async fn enquiry(&self, request: &AccountRequest) -> Result<EnquiryResponse, ApiError> {
        self.post_json("/account/enquiry", request).await
    }

    /// POST /account/history
    pub async fn history(&self, request: &AccountRequest) -> Result<HistoryResponse, ApiError> {
        self.post_json("/account/history", request).await
    }

    /// POST /account/change-pin
    pub async fn change_pin(&self, request: &ChangePinRequest) -> Result<MessageResponse, ApiError> {
        self.post_json("/account/change-pin", request).await
    }

    /// POST /account/update-mobile
    pub async fn update_mobile(
        &self,
        request: &UpdateMobileRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.post_json("/account/update-mobile", request).await
    }

    /// POST /account/update-email
    pub async fn update_email(
        &self,
        request: &UpdateEmailRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.post_json("/account/update-email", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::bank::models::Role;
    use crate::api::bank::transport::fake::FakeTransport;
    use crate::api::bank::transport::Method;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client_with(fake: &Arc<FakeTransport>) -> BankClient {
        BankClient::new(fake.clone())
    }

    fn deposit_request() -> TransactionRequest {
        TransactionRequest {
            h: "AC1001".into(),
            amount: 500,
            pin: "0420".into(),
        }
    }

    #[tokio::test]
    async fn test_deposit_sends_json_body() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(200, json!({"success": true, "message": "Deposit successful. New balance: 1500"}));

        let client = client_with(&fake);
        let resp = client.deposit(&deposit_request()).await.unwrap();
        assert_eq!(resp.message, "Deposit successful. New balance: 1500");

        let sent = fake.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.path, "/transaction/deposit");
        assert_eq!(
            sent.payload,
            Payload::Json(json!({"h": "AC1001", "amount": 500, "pin": "0420"}))
        );
    }

    #[tokio::test]
    async fn test_error_detail_becomes_message() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(400, json!({"detail": "Insufficient balance."}));

        let err = client_with(&fake)
            .withdraw(&deposit_request())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Insufficient balance.");
        assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_error_without_detail_uses_fallback() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond_raw(500, "Internal Server Error");
        fake.respond(403, json!({}));

        let client = client_with(&fake);
        let first = client.deposit(&deposit_request()).await.unwrap_err();
        let second = client.deposit(&deposit_request()).await.unwrap_err();

        assert_eq!(first.to_string(), "API failed");
        assert_eq!(second.to_string(), "API failed");
    }

    #[tokio::test]
    async fn test_create_user_error_reads_message_field() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(400, json!({"success": false, "message": "User already exists"}));

        let err = client_with(&fake)
            .create_user(&CreateUserRequest {
                un: "asha".into(),
                pas: "secret1".into(),
                vps: "secret1".into(),
                role: Role::Teller,
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "User already exists");
    }

    #[tokio::test]
    async fn test_unauthorized_resets_session_and_fails() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(401, json!({"detail": "Token expired"}));

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let client = client_with(&fake).on_session_expired(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let err = client.deposit(&deposit_request()).await.unwrap_err();

        assert_eq!(err, ApiError::SessionExpired);
        assert_eq!(err.to_string(), "Session expired, login again.");
        assert_eq!(fake.sessions_cleared(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_login_sends_form_and_keeps_401_message() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(200, json!({"success": true, "role": "admin", "user_name": "root"}));
        fake.respond(401, json!({"detail": "Invalid credentials"}));

        let client = client_with(&fake);
        let ok = client.login("root", "hunter22").await.unwrap();
        assert_eq!(ok.role, Role::Admin);

        let sent = fake.requests()[0].clone();
        assert_eq!(sent.path, "/auth/login");
        assert_eq!(
            sent.payload,
            Payload::Form(vec![
                ("username".to_string(), "root".to_string()),
                ("password".to_string(), "hunter22".to_string()),
            ])
        );

        let err = client.login("root", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(fake.sessions_cleared(), 0);
    }

    #[tokio::test]
    async fn test_login_failure_fallback() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(502, json!({}));

        let err = client_with(&fake).login("root", "x").await.unwrap_err();
        assert_eq!(err.to_string(), "Login failed");
    }

    #[tokio::test]
    async fn test_network_failure_is_generic() {
        let fake = Arc::new(FakeTransport::new());
        fake.fail("connection refused");

        let err = client_with(&fake)
            .enquiry(&AccountRequest {
                h: "AC1001".into(),
                pin: "0420".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.to_string(), "Network error occurred");
    }

    #[tokio::test]
    async fn test_check_session() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(200, json!({"authenticated": true, "user_id": "9", "role": "customer"}));
        fake.respond(401, json!({"detail": "Missing access token"}));
        fake.fail("dns failure");

        let client = client_with(&fake);
        let session = client.check_session().await.unwrap();
        assert_eq!(session.role, Role::Customer);

        assert!(client.check_session().await.is_none());
        assert!(client.check_session().await.is_none());
        assert_eq!(fake.requests()[0].method, Method::Get);
        // a failed probe is not a session expiry
        assert_eq!(fake.sessions_cleared(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond_raw(200, "<html>proxy page</html>");

        let err = client_with(&fake).logout().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_history_bad_row_is_a_decode_error() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(
            200,
            json!({"history": [[1, "AC1001", "Deposit", 100.5, "2026-10-19 14:30:00"]]}),
        );

        let request = AccountRequest {
            h: "AC1001".into(),
            pin: "1234".into(),
        };
        let err = client_with(&fake).history(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_transfer_parses_receipt() {
        let fake = Arc::new(FakeTransport::new());
        let id = uuid::Uuid::new_v4();
        fake.respond(
            200,
            json!({
                "success": true,
                "message": "Transfer successful",
                "transfer_id": id.to_string(),
                "timestamp": "2026-10-19T09:15:00+00:00"
            }),
        );

        let resp = client_with(&fake)
            .transfer(&TransferRequest {
                h: "AC1001".into(),
                pin: "0420".into(),
                to_account: "AC2002".into(),
                amount: 300,
            })
            .await
            .unwrap();

        assert_eq!(resp.transfer_id, Some(id));
        assert!(resp.timestamp.is_some());
    }
}
