use super::form::{Fields, FormState, TextField};
use super::{begin_submit, Screen, ViewKind};
use crate::api::bank::models::CreateAccountRequest;
use crate::api::bank::{ApiError, BankClient};
use async_trait::async_trait;

pub struct CreateAccountForm {
    fields: Fields,
    state: FormState,
}

impl CreateAccountForm {
    pub fn new() -> Self {
        Self {
            fields: Fields::new(vec![
                TextField::text("h", "Account Holder"),
                TextField::pin("pin", "PIN"),
                TextField::pin("vpin", "Verify PIN"),
                TextField::text("mobileno", "Mobile").max_len(10),
                TextField::text("gmail", "Email"),
            ]),
            state: FormState::new(),
        }
    }
}

impl Default for CreateAccountForm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Screen for CreateAccountForm {
    fn kind(&self) -> ViewKind {
        ViewKind::CreateAccount
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
        self.fields.require(&["h", "pin", "vpin", "mobileno", "gmail"])?;
        self.fields.require_pin("pin")?;
        self.fields.require_pin("vpin")
    }

    async fn submit(&mut self, client: &BankClient) -> Result<(), ApiError> {
        begin_submit(self)?;

        let request = CreateAccountRequest {
            h: self.fields.get("h").trim().to_string(),
            pin: self.fields.get("pin").to_string(),
            vpin: self.fields.get("vpin").to_string(),
            mobileno: self.fields.get("mobileno").trim().to_string(),
            gmail: self.fields.get("gmail").trim().to_string(),
        };

        let outcome = client.create_account(&request).await.map(|resp| {
            match resp.account_no {
                Some(account_no) if !resp.message.contains(&account_no) => {
                    format!("{} (Account No: {})", resp.message, account_no)
                }
                _ => resp.message,
            }
        });
        self.state.settle(outcome)?;
        self.fields.clear_all();
        Ok(())
    }
}
