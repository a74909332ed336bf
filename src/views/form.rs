//! Form state shared by every screen
//!
//! A form moves Idle → Submitting → Succeeded | Failed, and back to
//! Submitting on the next attempt. Messages from the previous attempt are
//! cleared when a new one starts.

use crate::api::bank::ApiError;
use crate::utils::{mask, AlertKind};

/// Notice recorded when an in-flight request is abandoned
pub const CANCELLED: &str = "Request cancelled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FormState {
    status: FormStatus,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            status: FormStatus::Idle,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Enter Submitting, dropping the previous attempt's messages
    pub fn begin(&mut self) -> Result<(), ApiError> {
        if self.is_loading() {
            return Err(ApiError::Validation(
                "A request is already in progress".to_string(),
            ));
        }
        self.status = FormStatus::Submitting;
        Ok(())
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.status = FormStatus::Succeeded(message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = FormStatus::Failed(message.into());
    }

    /// Record the outcome of a request: success message or error text
    pub fn settle(&mut self, outcome: Result<String, ApiError>) -> Result<(), ApiError> {
        match outcome {
            Ok(message) => {
                self.succeed(message);
                Ok(())
            }
            Err(e) => {
                self.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Abandon an in-flight request
    pub fn cancel(&mut self) {
        if self.is_loading() {
            self.status = FormStatus::Failed(CANCELLED.to_string());
        }
    }

    /// Alert line for the current status, if any
    pub fn alert(&self) -> Option<(AlertKind, String)> {
        match &self.status {
            FormStatus::Idle => None,
            FormStatus::Submitting => Some((AlertKind::Info, "Working...".to_string())),
            FormStatus::Succeeded(msg) => Some((AlertKind::Success, msg.clone())),
            FormStatus::Failed(msg) => Some((AlertKind::Error, msg.clone())),
        }
    }
}

/// A single text input
#[derive(Debug, Clone)]
pub struct TextField {
    pub name: &'static str,
    pub label: &'static str,
    value: String,
    secret: bool,
    max_len: Option<usize>,
}

impl TextField {
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: String::new(),
            secret: false,
            max_len: None,
        }
    }

    /// Masked input (passwords, PINs)
    pub fn secret(name: &'static str, label: &'static str) -> Self {
        Self {
            secret: true,
            ..Self::text(name, label)
        }
    }

    /// Masked input limited to four characters
    pub fn pin(name: &'static str, label: &'static str) -> Self {
        Self::secret(name, label).max_len(4)
    }

    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn set(&mut self, value: &str) -> Result<(), String> {
        if let Some(max) = self.max_len {
            if value.chars().count() > max {
                return Err(format!("{} accepts at most {} characters", self.label, max));
            }
        }
        self.value = value.to_string();
        Ok(())
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn display(&self) -> String {
        if self.secret {
            mask(&self.value)
        } else {
            self.value.clone()
        }
    }
}

/// Ordered set of inputs addressed by name
#[derive(Debug, Clone)]
pub struct Fields(Vec<TextField>);

impl Fields {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self(fields)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextField> {
        self.0.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|f| f.name).collect()
    }

    fn find(&self, name: &str) -> Option<&TextField> {
        self.0.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Value of a field; unknown names read as empty
    pub fn get(&self, name: &str) -> &str {
        self.find(name).map(|f| f.value()).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), String> {
        let names = self.names().join(", ");
        match self.0.iter_mut().find(|f| f.name.eq_ignore_ascii_case(name)) {
            Some(field) => field.set(value),
            None => Err(format!("Unknown field '{}'. Fields: {}", name, names)),
        }
    }

    /// Assign values in field order
    pub fn fill(&mut self, values: &[&str]) -> Result<(), String> {
        if values.len() > self.0.len() {
            return Err(format!(
                "Expected at most {} values: {}",
                self.0.len(),
                self.names().join(", ")
            ));
        }
        for (field, value) in self.0.iter_mut().zip(values) {
            field.set(value)?;
        }
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.0.iter_mut().for_each(TextField::clear);
    }

    /// Every named field must be non-blank
    pub fn require(&self, names: &[&str]) -> Result<(), String> {
        for name in names {
            if let Some(field) = self.find(name) {
                if field.is_blank() {
                    return Err(format!("{} is required", field.label));
                }
            }
        }
        Ok(())
    }

    /// The named field must be exactly four ASCII digits (after trimming)
    pub fn require_pin(&self, name: &str) -> Result<(), String> {
        let is_pin = |value: &str| value.len() == 4 && value.chars().all(|c| c.is_ascii_digit());
        match self.find(name) {
            Some(field) if is_pin(field.value().trim()) => Ok(()),
            Some(field) => Err(format!("{} must be exactly 4 digits", field.label)),
            None => Ok(()),
        }
    }

    /// The named field must parse as a whole number
    pub fn require_amount(&self, name: &str) -> Result<i64, String> {
        let field = self
            .find(name)
            .ok_or_else(|| format!("Unknown field '{}'", name))?;
        field
            .value()
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("{} must be a whole number", field.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fields {
        Fields::new(vec![
            TextField::text("h", "Account Number"),
            TextField::pin("pin", "PIN"),
            TextField::text("amount", "Amount"),
        ])
    }

    #[test]
    fn test_state_transitions() {
        let mut state = FormState::new();
        assert_eq!(state.status(), &FormStatus::Idle);

        state.begin().unwrap();
        assert!(state.is_loading());
        assert!(state.begin().is_err());

        let err = state
            .settle(Err(ApiError::Rejected {
                status: 400,
                message: "Wrong PIN".into(),
            }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Wrong PIN");
        assert_eq!(state.status(), &FormStatus::Failed("Wrong PIN".into()));

        // a new attempt clears the old error
        state.begin().unwrap();
        assert_eq!(state.status(), &FormStatus::Submitting);
        state.settle(Ok("Done".into())).unwrap();
        assert_eq!(state.status(), &FormStatus::Succeeded("Done".into()));
    }

    #[test]
    fn test_cancel_only_affects_inflight() {
        let mut state = FormState::new();
        state.cancel();
        assert_eq!(state.status(), &FormStatus::Idle);

        state.begin().unwrap();
        state.cancel();
        assert_eq!(state.status(), &FormStatus::Failed(CANCELLED.into()));
    }

    #[test]
    fn test_pin_field_limits_and_masks() {
        let mut fields = sample();
        assert!(fields.set("pin", "12345").is_err());
        fields.set("PIN", "1234").unwrap();

        let pin = fields.iter().find(|f| f.name == "pin").unwrap();
        assert_eq!(pin.display(), "••••");
        assert_eq!(fields.get("pin"), "1234");
    }

    #[test]
    fn test_fill_and_validation() {
        let mut fields = sample();
        fields.fill(&["AC1001", "12"]).unwrap();

        assert!(fields.require(&["h", "pin"]).is_ok());
        assert_eq!(
            fields.require_pin("pin").unwrap_err(),
            "PIN must be exactly 4 digits"
        );
        assert_eq!(
            fields.require_amount("amount").unwrap_err(),
            "Amount must be a whole number"
        );
        assert!(fields.fill(&["a", "b", "c", "d"]).is_err());

        fields.set("amount", " 250 ").unwrap();
        assert_eq!(fields.require_amount("amount"), Ok(250));

        fields.clear_all();
        assert_eq!(fields.require(&["h"]).unwrap_err(), "Account Number is required");
    }

    #[test]
    fn test_pin_must_be_digits() {
        let mut fields = sample();
        fields.set("pin", "abcd").unwrap();
        assert_eq!(
            fields.require_pin("pin").unwrap_err(),
            "PIN must be exactly 4 digits"
        );

        fields.set("pin", "12a4").unwrap();
        assert!(fields.require_pin("pin").is_err());

        fields.set("pin", "0420").unwrap();
        assert!(fields.require_pin("pin").is_ok());
    }

    #[test]
    fn test_unknown_field_lists_names() {
        let mut fields = sample();
        let err = fields.set("balance", "1").unwrap_err();
        assert_eq!(err, "Unknown field 'balance'. Fields: h, pin, amount");
    }
}
