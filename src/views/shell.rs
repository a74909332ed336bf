//! Top-level session switch: login screen or dashboard

use super::login::LoginForm;
use super::{Dashboard, FormStatus, Screen};
use crate::api::bank::{ApiError, BankClient, Role};
use crate::utils::Card;
use tracing::{info, warn};

enum Mode {
    SignedOut(LoginForm),
    SignedIn(Dashboard),
}

pub struct Shell {
    mode: Mode,
    history_page_size: usize,
}

impl Shell {
    /// Start on the login screen
    pub fn new(history_page_size: usize) -> Self {
        Self {
            mode: Mode::SignedOut(LoginForm::new()),
            history_page_size,
        }
    }

    /// Resume an existing session if the backend still recognises it
    pub async fn start(client: &BankClient, history_page_size: usize) -> Self {
        let mut shell = Self::new(history_page_size);
        if let Some(session) = client.check_session().await {
            if session.authenticated != Some(false) {
                info!("Resuming session as {}", session.role);
                shell.sign_in(session.role);
            }
        }
        shell
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.mode, Mode::SignedIn(_))
    }

    pub fn role(&self) -> Option<Role> {
        match &self.mode {
            Mode::SignedIn(dashboard) => Some(dashboard.role()),
            Mode::SignedOut(_) => None,
        }
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.mode {
            Mode::SignedIn(dashboard) => Some(dashboard),
            Mode::SignedOut(_) => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut Dashboard> {
        match &mut self.mode {
            Mode::SignedIn(dashboard) => Some(dashboard),
            Mode::SignedOut(_) => None,
        }
    }

    /// The screen commands like `set` and `submit` act on
    pub fn screen(&self) -> Option<&dyn Screen> {
        match &self.mode {
            Mode::SignedOut(form) => Some(form),
            Mode::SignedIn(dashboard) => dashboard.active(),
        }
    }

    pub fn screen_mut(&mut self) -> Option<&mut dyn Screen> {
        match &mut self.mode {
            Mode::SignedOut(form) => Some(form),
            Mode::SignedIn(dashboard) => dashboard.active_mut(),
        }
    }

    fn sign_in(&mut self, role: Role) {
        self.mode = Mode::SignedIn(Dashboard::new(role, self.history_page_size));
    }

    /// Switch to the dashboard if the login screen just authenticated.
    /// Returns true when the switch happened.
    pub fn complete_login(&mut self) -> bool {
        let role = match &self.mode {
            Mode::SignedOut(form) => form.authenticated_role(),
            Mode::SignedIn(_) => None,
        };
        match role {
            Some(role) => {
                self.sign_in(role);
                true
            }
            None => false,
        }
    }

    /// Fill the login screen and submit it
    pub async fn login(
        &mut self,
        client: &BankClient,
        username: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let form = match &mut self.mode {
            Mode::SignedOut(form) => form,
            Mode::SignedIn(_) => {
                return Err(ApiError::Validation(
                    "Already logged in. Use `logout` first.".to_string(),
                ))
            }
        };
        form.fill(&[username, password])
            .map_err(ApiError::Validation)?;
        form.submit(client).await?;

        let welcome = match form.state().status() {
            FormStatus::Succeeded(message) => message.clone(),
            _ => String::new(),
        };
        self.complete_login();
        Ok(welcome)
    }

    /// Log out; the console returns to login even when the call fails
    pub async fn logout(&mut self, client: &BankClient) -> String {
        let message = match client.logout().await {
            Ok(resp) if !resp.message.is_empty() => resp.message,
            Ok(_) => "Logged out".to_string(),
            Err(e) => {
                warn!("Logout call failed: {}", e);
                format!("Logged out locally ({})", e)
            }
        };
        self.mode = Mode::SignedOut(LoginForm::new());
        message
    }

    /// Drop everything and show login with the expiry notice
    pub fn expire_session(&mut self) {
        let mut form = LoginForm::new();
        form.state_mut().fail(ApiError::SessionExpired.to_string());
        self.mode = Mode::SignedOut(form);
    }

    pub fn render(&self) -> Card {
        match &self.mode {
            Mode::SignedOut(form) => form.render(),
            Mode::SignedIn(dashboard) => dashboard.render(),
        }
    }
}
