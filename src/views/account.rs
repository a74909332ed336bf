use super::form::{Fields, FormState, TextField};
use super::{begin_submit, Screen, ViewKind};
use crate::api::bank::models::{AccountRequest, ChangePinRequest};
use crate::api::bank::{ApiError, BankClient};
use async_trait::async_trait;

/// Balance enquiry; inputs stay filled so the operator can re-check
pub struct EnquiryForm {
    fields: Fields,
    state: FormState,
}

impl EnquiryForm {
    pub fn new() -> Self {
        Self {
            fields: Fields::new(vec![
                TextField::text("h", "Account Number"),
                TextField::pin("pin", "PIN"),
            ]),
            state: FormState::new(),
        }
    }
}

impl Default for EnquiryForm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Screen for EnquiryForm {
    fn kind(&self) -> ViewKind {
        ViewKind::Enquiry
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
        self.fields.require(&["h", "pin"])?;
        self.fields.require_pin("pin")
    }

    async fn submit(&mut self, client: &BankClient) -> Result<(), ApiError> {
        begin_submit(self)?;

        let request = AccountRequest {
            h: self.fields.get("h").trim().to_string(),
            pin: self.fields.get("pin").to_string(),
        };
        let outcome = client.enquiry(&request).await.map(|resp| resp.summary());
        self.state.settle(outcome)
    }
}

pub struct ChangePinForm {
    fields: Fields,
    state: FormState,
}

impl ChangePinForm {
    pub fn new() -> Self {
        Self {
            fields: Fields::new(vec![
                TextField::text("h", "Account Number"),
                TextField::pin("oldpin", "Current PIN"),
                TextField::pin("newpin", "New PIN"),
                TextField::pin("vnewpin", "Confirm New PIN"),
            ]),
            state: FormState::new(),
        }
    }
}

impl Default for ChangePinForm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Screen for ChangePinForm {
    fn kind(&self) -> ViewKind {
        ViewKind::ChangePin
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
        self.fields.require(&["h", "oldpin", "newpin", "vnewpin"])?;
        for name in ["oldpin", "newpin", "vnewpin"] {
            self.fields.require_pin(name)?;
        }
        Ok(())
    }

    async fn submit(&mut self, client: &BankClient) -> Result<(), ApiError> {
        begin_submit(self)?;

        // matching new PINs is the backend's call
        let request = ChangePinRequest {
            h: self.fields.get("h").trim().to_string(),
            oldpin: self.fields.get("oldpin").to_string(),
            newpin: self.fields.get("newpin").to_string(),
            vnewpin: self.fields.get("vnewpin").to_string(),
        };
        let outcome = client.change_pin(&request).await.map(|resp| resp.message);
        self.state.settle(outcome)?;
        self.fields.clear_all();
        Ok(())
    }
}
