use super::form::{Fields, FormState, TextField};
use super::{begin_submit, Screen, ViewKind};
use crate::api::bank::{ApiError, BankClient, Role};
use async_trait::async_trait;

/// Username/password login. A successful submit records the session role
/// for the shell to pick up.
pub struct LoginForm {
    fields: Fields,
    state: FormState,
    role: Option<Role>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            fields: Fields::new(vec![
                TextField::text("username", "Username"),
                TextField::secret("password", "Password"),
            ]),
            state: FormState::new(),
            role: None,
        }
    }

    /// Role granted by the last successful login
    pub fn authenticated_role(&self) -> Option<Role> {
        self.role
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Screen for LoginForm {
    fn kind(&self) -> ViewKind {
        ViewKind::Login
    }

    fn fields(&self) -> &Fields {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }

    fn state(&self) -> &FormState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    fn validate(&self) -> Result<(), String> {
        self.fields.require(&["username", "password"])
    }

    async fn submit(&mut self, client: &BankClient) -> Result<(), ApiError> {
        begin_submit(self)?;
        self.role = None;

        let username = self.fields.get("username").to_string();
        let password = self.fields.get("password").to_string();

        let outcome = client.login(&username, &password).await.map(|resp| {
            self.role = Some(resp.role);
            format!("Welcome, {} ({})", resp.user_name.unwrap_or(username), resp.role)
        });
        self.state.settle(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::bank::transport::fake::FakeTransport;
    use crate::views::FormStatus;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_login_records_role() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(200, json!({"success": true, "role": "admin", "user_name": "asha"}));
        let client = BankClient::new(fake.clone());

        let mut form = LoginForm::new();
        assert!(!form.can_submit());
        form.fill(&["asha", "s3cret"]).unwrap();
        assert!(form.can_submit());

        form.submit(&client).await.unwrap();
        assert_eq!(form.authenticated_role(), Some(Role::Admin));
        assert_eq!(
            form.state().status(),
            &FormStatus::Succeeded("Welcome, asha (admin)".into())
        );
    }

    #[tokio::test]
    async fn test_login_failure_shows_detail() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(401, json!({"detail": "Invalid credentials"}));
        let client = BankClient::new(fake.clone());

        let mut form = LoginForm::new();
        form.fill(&["asha", "nope"]).unwrap();

        assert!(form.submit(&client).await.is_err());
        assert_eq!(form.authenticated_role(), None);
        assert_eq!(
            form.state().status(),
            &FormStatus::Failed("Invalid credentials".into())
        );
    }

    #[tokio::test]
    async fn test_blank_login_never_reaches_network() {
        let fake = Arc::new(FakeTransport::new());
        let client = BankClient::new(fake.clone());

        let mut form = LoginForm::new();
        form.set_field("username", "asha").unwrap();

        let err = form.submit(&client).await.unwrap_err();
        assert_eq!(err, ApiError::Validation("Password is required".into()));
        assert_eq!(form.state().status(), &FormStatus::Idle);
        assert!(fake.requests().is_empty());
    }
}
