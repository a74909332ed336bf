//! Screens of the console
//!
//! Each screen owns its inputs and a `FormState`. `submit` borrows the screen
//! mutably for the whole request, so a screen that has been closed can never
//! be written to by a late response.

pub mod account;
pub mod create_account;
pub mod create_user;
pub mod dashboard;
pub mod form;
pub mod history;
pub mod login;
pub mod shell;
pub mod transaction;
pub mod update_info;

pub use dashboard::Dashboard;
pub use form::FormStatus;
pub use shell::Shell;

use crate::api::bank::{ApiError, BankClient, Role};
use crate::utils::Card;
use async_trait::async_trait;
use form::{Fields, FormState};

/// Every screen the console can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    CreateUser,
    CreateAccount,
    Deposit,
    Withdraw,
    Transfer,
    Enquiry,
    ChangePin,
    UpdateInfo,
    History,
}

impl ViewKind {
    /// Screens reachable from the dashboard menu, in menu order
    pub const MENU: [ViewKind; 9] = [
        ViewKind::CreateUser,
        ViewKind::CreateAccount,
        ViewKind::Deposit,
        ViewKind::Withdraw,
        ViewKind::Transfer,
        ViewKind::Enquiry,
        ViewKind::ChangePin,
        ViewKind::UpdateInfo,
        ViewKind::History,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::Login => "Staff Login",
            ViewKind::CreateUser => "Create User",
            ViewKind::CreateAccount => "Create Account",
            ViewKind::Deposit => "Deposit Money",
            ViewKind::Withdraw => "Withdraw Money",
            ViewKind::Transfer => "Transfer Money",
            ViewKind::Enquiry => "Balance Enquiry",
            ViewKind::ChangePin => "Change PIN",
            ViewKind::UpdateInfo => "Update Info",
            ViewKind::History => "Transaction History",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ViewKind::Login => "Enter your username and password to access banking operations",
            ViewKind::CreateUser => "Add a staff or customer login",
            ViewKind::CreateAccount => "Register new account holder",
            ViewKind::Deposit => "Add funds to account",
            ViewKind::Withdraw => "Withdraw funds from account",
            ViewKind::Transfer => "Move funds between accounts",
            ViewKind::Enquiry => "Check an account balance",
            ViewKind::ChangePin => "Set a new 4-digit PIN",
            ViewKind::UpdateInfo => "Update mobile or email",
            ViewKind::History => "View your account transaction history",
        }
    }

    /// Console name used by `open <name>`
    pub fn command(&self) -> &'static str {
        match self {
            ViewKind::Login => "login",
            ViewKind::CreateUser => "create-user",
            ViewKind::CreateAccount => "create-account",
            ViewKind::Deposit => "deposit",
            ViewKind::Withdraw => "withdraw",
            ViewKind::Transfer => "transfer",
            ViewKind::Enquiry => "enquiry",
            ViewKind::ChangePin => "change-pin",
            ViewKind::UpdateInfo => "update",
            ViewKind::History => "history",
        }
    }

    /// Resolve a console name or alias to a menu screen
    pub fn from_command(input: &str) -> Option<ViewKind> {
        let lowered = input.trim().to_lowercase();
        let alias = match lowered.as_str() {
            "balance" | "bal" => Some(ViewKind::Enquiry),
            "pin" => Some(ViewKind::ChangePin),
            "update-info" | "info" => Some(ViewKind::UpdateInfo),
            "user" => Some(ViewKind::CreateUser),
            "account" | "create" => Some(ViewKind::CreateAccount),
            _ => None,
        };
        alias.or_else(|| {
            Self::MENU
                .into_iter()
                .find(|kind| kind.command() == lowered)
        })
    }

    /// Which roles may open this screen; mirrors the backend's route guards
    pub fn allowed_for(&self, role: Role) -> bool {
        match self {
            ViewKind::Login => true,
            ViewKind::CreateUser | ViewKind::CreateAccount => role == Role::Admin,
            ViewKind::Enquiry | ViewKind::ChangePin | ViewKind::UpdateInfo => {
                matches!(role, Role::Admin | Role::Teller)
            }
            ViewKind::Deposit | ViewKind::Withdraw | ViewKind::Transfer | ViewKind::History => {
                matches!(role, Role::Admin | Role::Teller | Role::Customer)
            }
        }
    }

    /// Build a fresh screen
    pub fn build(&self, history_page_size: usize) -> Box<dyn Screen> {
        match self {
            ViewKind::Login => Box::new(login::LoginForm::new()),
            ViewKind::CreateUser => Box::new(create_user::CreateUserForm::new()),
            ViewKind::CreateAccount => Box::new(create_account::CreateAccountForm::new()),
            ViewKind::Deposit => Box::new(transaction::TransactionForm::deposit()),
            ViewKind::Withdraw => Box::new(transaction::TransactionForm::withdraw()),
            ViewKind::Transfer => Box::new(transaction::TransferForm::new()),
            ViewKind::Enquiry => Box::new(account::EnquiryForm::new()),
            ViewKind::ChangePin => Box::new(account::ChangePinForm::new()),
            ViewKind::UpdateInfo => Box::new(update_info::UpdateInfo::new()),
            ViewKind::History => Box::new(history::HistoryView::new(history_page_size)),
        }
    }
}

/// A form-backed screen
#[async_trait]
pub trait Screen: Send {
    fn kind(&self) -> ViewKind;

    /// Inputs currently shown (the active tab's, for tabbed screens)
    fn fields(&self) -> &Fields;

    fn fields_mut(&mut self) -> &mut Fields;

    fn state(&self) -> &FormState;

    fn state_mut(&mut self) -> &mut FormState;

    /// Client-side checks that gate submission
    fn validate(&self) -> Result<(), String>;

    /// Send the form. Blocked submissions return `ApiError::Validation`
    /// without touching the form state.
    async fn submit(&mut self, client: &BankClient) -> Result<(), ApiError>;

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        self.fields_mut().set(name, value)
    }

    fn fill(&mut self, values: &[&str]) -> Result<(), String> {
        self.fields_mut().fill(values)
    }

    fn can_submit(&self) -> bool {
        !self.state().is_loading() && self.validate().is_ok()
    }

    fn cancel(&mut self) {
        self.state_mut().cancel();
    }

    /// Screen-specific actions such as `tab`, `next`, `prev`
    fn navigate(&mut self, action: &str, _arg: Option<&str>) -> Result<(), String> {
        Err(format!("'{}' is not available on this screen", action))
    }

    /// Whether `refresh` re-sends without clearing (history only)
    fn can_refresh(&self) -> bool {
        false
    }

    async fn refresh(&mut self, _client: &BankClient) -> Result<(), ApiError> {
        Err(ApiError::Validation(
            "Nothing to refresh on this screen".to_string(),
        ))
    }

    fn render(&self) -> Card {
        render_form(self.kind(), self.fields(), self.state(), self.can_submit())
    }
}

/// Standard layout: title, inputs, status alert, submit hint
pub fn render_form(kind: ViewKind, fields: &Fields, state: &FormState, can_submit: bool) -> Card {
    let mut card = Card::new(kind.title()).description(kind.description());

    for field in fields.iter() {
        card = card.field(format!("{} ({})", field.label, field.name), field.display());
    }

    if let Some((alert, text)) = state.alert() {
        card = card.alert(alert, text);
    }

    let hint = if state.is_loading() {
        "submitting... (Ctrl-C to cancel)"
    } else if can_submit {
        "submit: ready"
    } else {
        "submit: disabled until required fields are filled"
    };
    card.footer(hint)
}

/// Guard shared by every `submit`: reject when disabled, else enter Submitting
pub(crate) fn begin_submit<S: Screen + ?Sized>(screen: &mut S) -> Result<(), ApiError> {
    screen.validate().map_err(ApiError::Validation)?;
    screen.state_mut().begin()
}
