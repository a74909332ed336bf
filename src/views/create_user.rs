use super::form::{Fields, FormState, TextField};
use super::{begin_submit, Screen, ViewKind};
use crate::api::bank::models::CreateUserRequest;
use crate::api::bank::{ApiError, BankClient, Role};
use async_trait::async_trait;

const DEFAULT_ROLE: &str = "teller";

pub struct CreateUserForm {
    fields: Fields,
    state: FormState,
}

impl CreateUserForm {
    pub fn new() -> Self {
        Self {
            fields: Self::blank(),
            state: FormState::new(),
        }
    }

    fn blank() -> Fields {
        Fields::new(vec![
            TextField::text("un", "Username"),
            TextField::secret("pas", "Password"),
            TextField::secret("vps", "Verify Password"),
            TextField::text("role", "Role (admin/teller/customer)").with_value(DEFAULT_ROLE),
        ])
    }
}

impl Default for CreateUserForm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Screen for CreateUserForm {
    fn kind(&self) -> ViewKind {
        ViewKind::CreateUser
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
        self.fields.require(&["un", "pas", "vps"])?;
        Role::parse(self.fields.get("role"))
            .map(|_| ())
            .ok_or_else(|| "Role must be admin, teller or customer".to_string())
    }

    async fn submit(&mut self, client: &BankClient) -> Result<(), ApiError> {
        begin_submit(self)?;

        let request = CreateUserRequest {
            un: self.fields.get("un").to_string(),
            pas: self.fields.get("pas").to_string(),
            vps: self.fields.get("vps").to_string(),
            role: Role::parse(self.fields.get("role")).unwrap_or_default(),
        };

        let outcome = client.create_user(&request).await.map(|resp| {
            if resp.message.is_empty() {
                "User created".to_string()
            } else {
                resp.message
            }
        });
        self.state.settle(outcome)?;
        self.fields = Self::blank();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::bank::transport::fake::FakeTransport;
    use crate::api::bank::transport::Payload;
    use crate::views::FormStatus;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_user_resets_to_teller() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(200, json!({"success": true, "message": ""}));
        let client = BankClient::new(fake.clone());

        let mut form = CreateUserForm::new();
        form.fill(&["ravi", "pw1234", "pw1234", "Customer"]).unwrap();
        form.submit(&client).await.unwrap();

        assert_eq!(
            fake.last_request().unwrap().payload,
            Payload::Json(json!({"un": "ravi", "pas": "pw1234", "vps": "pw1234", "role": "customer"}))
        );
        assert_eq!(form.state().status(), &FormStatus::Succeeded("User created".into()));
        assert_eq!(form.fields().get("un"), "");
        assert_eq!(form.fields().get("role"), "teller");
    }

    #[test]
    fn test_unknown_role_blocks_submit() {
        let mut form = CreateUserForm::new();
        form.fill(&["ravi", "pw", "pw", "manager"]).unwrap();
        assert!(!form.can_submit());
        assert_eq!(
            form.validate().unwrap_err(),
            "Role must be admin, teller or customer"
        );
    }
}
