pub mod form;
pub mod help;
pub mod navigation;
pub mod session;

use crate::api::bank::BankClient;
use crate::utils::{AlertKind, Card};
use crate::views::{Shell, ViewKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// What the input loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// Console state: the shell, the client, and the session-expired flag the
/// client raises on a 401.
pub struct Console {
    shell: Shell,
    client: BankClient,
    session_expired: Arc<AtomicBool>,
}

impl Console {
    /// Hook the client up to the expiry flag and restore any live session
    pub async fn start(client: BankClient, history_page_size: usize) -> Self {
        let session_expired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&session_expired);
        let client = client.on_session_expired(move || flag.store(true, Ordering::SeqCst));
        let shell = Shell::start(&client, history_page_size).await;

        Self {
            shell,
            client,
            session_expired,
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Render whatever is on screen
    pub fn render(&self) -> String {
        self.shell.render().render()
    }

    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let (command, args) = match parts.split_first() {
            Some((command, args)) => (command.to_lowercase(), args),
            None => return Reply::Output(String::new()),
        };
        debug!("Command `{}` with {} args", command, args.len());

        let shell = &mut self.shell;
        let client = &self.client;
        let result = match command.as_str() {
            "help" | "?" => help::execute(shell),
            "login" => session::login(shell, client, args).await,
            "logout" => session::logout(shell, client).await,
            "menu" | "back" => navigation::back(shell),
            "open" => navigation::open(shell, args),
            "show" => navigation::show(shell),
            "set" => form::set(shell, args),
            "fill" => form::fill(shell, args),
            "submit" => form::submit(shell, client, false, tokio::signal::ctrl_c()).await,
            "refresh" => form::submit(shell, client, true, tokio::signal::ctrl_c()).await,
            "tab" | "next" | "prev" => navigation::navigate(shell, &command, args),
            "quit" | "exit" => return Reply::Quit,
            other if ViewKind::from_command(other).is_some() => {
                navigation::open(shell, &[other])
            }
            other => Err(format!("Unknown command `{}`. Type `help` for commands.", other)),
        };

        // a 401 anywhere sends the operator back to login
        if self.session_expired.swap(false, Ordering::SeqCst) {
            warn!("Session expired, returning to login");
            self.shell.expire_session();
            return Reply::Output(self.render());
        }

        match result {
            Ok(output) => Reply::Output(output),
            Err(e) => {
                warn!("Command `{}` failed: {}", command, e);
                Reply::Output(
                    Card::new("Command Error")
                        .alert(AlertKind::Error, e)
                        .render(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::bank::transport::fake::FakeTransport;
    use crate::api::bank::Role;
    use serde_json::json;

    async fn console_with(fake: Arc<FakeTransport>) -> Console {
        Console::start(BankClient::new(fake), 10).await
    }

    fn output(reply: Reply) -> String {
        match reply {
            Reply::Output(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[tokio::test]
    async fn test_full_deposit_flow() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(401, json!({"detail": "Not authenticated"}));
        fake.respond(200, json!({"success": true, "role": "teller", "user_name": "kiran"}));
        fake.respond(200, json!({"success": true, "message": "Deposit successful"}));
        let mut console = console_with(fake.clone()).await;
        assert!(!console.shell().is_signed_in());

        output(console.handle_line("login kiran pw").await);
        assert_eq!(console.shell().role(), Some(Role::Teller));

        output(console.handle_line("deposit").await);
        output(console.handle_line("fill AC1001 500 1234").await);
        let text = output(console.handle_line("submit").await);

        assert!(text.contains("✅ Deposit successful"));
        assert_eq!(fake.last_request().unwrap().path, "/transaction/deposit");
    }

    #[tokio::test]
    async fn test_session_expiry_returns_to_login() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond(200, json!({"authenticated": true, "role": "admin"}));
        fake.respond(401, json!({"detail": "Not authenticated"}));
        let mut console = console_with(fake.clone()).await;
        assert!(console.shell().is_signed_in());

        console.handle_line("open enquiry").await;
        console.handle_line("fill AC1001 1234").await;
        let text = output(console.handle_line("submit").await);

        assert!(!console.shell().is_signed_in());
        assert!(text.contains("Staff Login"));
        assert!(text.contains("Session expired, login again."));
        assert_eq!(fake.sessions_cleared(), 1);
    }

    #[tokio::test]
    async fn test_errors_render_as_cards() {
        let fake = Arc::new(FakeTransport::new());
        let mut console = console_with(fake).await;

        let text = output(console.handle_line("withdraw").await);
        assert!(text.contains("Command Error"));
        assert!(text.contains("Log in first"));

        let text = output(console.handle_line("teleport").await);
        assert!(text.contains("Unknown command `teleport`"));

        assert_eq!(console.handle_line("   ").await, Reply::Output(String::new()));
        assert_eq!(console.handle_line("EXIT").await, Reply::Quit);
    }
}
