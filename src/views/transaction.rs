use super::form::{Fields, FormState, TextField};
use super::{begin_submit, Screen, ViewKind};
use crate::api::bank::models::{TransactionRequest, TransferRequest};
use crate::api::bank::{ApiError, BankClient};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Deposit,
    Withdraw,
}

/// Deposit or withdraw against one account
pub struct TransactionForm {
    kind: TransactionType,
    fields: Fields,
    state: FormState,
}

impl TransactionForm {
    fn new(kind: TransactionType) -> Self {
        Self {
            kind,
            fields: Fields::new(vec![
                TextField::text("h", "Account Number"),
                TextField::text("amount", "Amount (₹)"),
                TextField::pin("pin", "PIN"),
            ]),
            state: FormState::new(),
        }
    }

    pub fn deposit() -> Self {
        Self::new(TransactionType::Deposit)
    }

    pub fn withdraw() -> Self {
        Self::new(TransactionType::Withdraw)
    }
}

#[async_trait]
impl Screen for TransactionForm {
    fn kind(&self) -> ViewKind {
        match self.kind {
            TransactionType::Deposit => ViewKind::Deposit,
            TransactionType::Withdraw => ViewKind::Withdraw,
        }
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
        self.fields.require(&["h", "amount", "pin"])?;
        self.fields.require_amount("amount")?;
        self.fields.require_pin("pin")
    }

    async fn submit(&mut self, client: &BankClient) -> Result<(), ApiError> {
        begin_submit(self)?;

        let request = TransactionRequest {
            h: self.fields.get("h").trim().to_string(),
            amount: self.fields.require_amount("amount").unwrap_or_default(),
            pin: self.fields.get("pin").to_string(),
        };

        let response = match self.kind {
            TransactionType::Deposit => client.deposit(&request).await,
            TransactionType::Withdraw => client.withdraw(&request).await,
        };
        self.state.settle(response.map(|resp| resp.message))?;
        self.fields.clear_all();
        Ok(())
    }
}

/// Move funds from one account to another
pub struct TransferForm {
    fields: Fields,
    state: FormState,
}

impl TransferForm {
    pub fn new() -> Self {
        Self {
            fields: Fields::new(vec![
                TextField::text("h", "From Account"),
                TextField::text("to", "To Account"),
                TextField::text("amount", "Amount (₹)"),
                TextField::pin("pin", "PIN"),
            ]),
            state: FormState::new(),
        }
    }
}

impl Default for TransferForm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Screen for TransferForm {
    fn kind(&self) -> ViewKind {
        ViewKind::Transfer
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
        self.fields.require(&["h", "to", "amount", "pin"])?;
        self.fields.require_amount("amount")?;
        self.fields.require_pin("pin")
    }

    async fn submit(&mut self, client: &BankClient) -> Result<(), ApiError> {
        begin_submit(self)?;

        let request = TransferRequest {
            h: self.fields.get("h").trim().to_string(),
            pin: self.fields.get("pin").to_string(),
            to_account: self.fields.get("to").trim().to_string(),
            amount: self.fields.require_amount("amount").unwrap_or_default(),
        };

        let outcome = client.transfer(&request).await.map(|resp| match resp.transfer_id {
            Some(id) => format!("{} (ref {})", resp.message, id),
            None => resp.message,
        });
        self.state.settle(outcome)?;
        self.fields.clear_all();
        Ok(())
    }
}
