use crate::api::bank::{ApiError, BankClient};
use crate::views::Shell;
use std::future::Future;
use tracing::{info, warn};

const NO_SCREEN: &str = "Open a screen first. Type `menu` to list screens.";

/// `set <field> <value...>`
pub fn set(shell: &mut Shell, args: &[&str]) -> Result<String, String> {
    let (name, value) = match args {
        [name, rest @ ..] => (*name, rest.join(" ")),
        [] => return Err("Usage: set <field> <value>".to_string()),
    };
    let screen = shell.screen_mut().ok_or_else(|| NO_SCREEN.to_string())?;
    screen.set_field(name, &value)?;
    Ok(screen.render().render())
}

/// `fill <values...>` assigns values in field order
pub fn fill(shell: &mut Shell, args: &[&str]) -> Result<String, String> {
    if args.is_empty() {
        return Err("Usage: fill <value> [value...]".to_string());
    }
    let screen = shell.screen_mut().ok_or_else(|| NO_SCREEN.to_string())?;
    screen.fill(args)?;
    Ok(screen.render().render())
}

/// Run `work` unless `interrupt` fires first; `None` means interrupted
async fn until_interrupted<W, I>(work: W, interrupt: I) -> Option<W::Output>
where
    W: Future,
    I: Future,
{
    tokio::select! {
        biased;
        output = work => Some(output),
        _ = interrupt => None,
    }
}

/// `submit` (or `refresh` when `refresh` is set) on the open screen.
///
/// Dropping the request when `interrupt` fires leaves the form failed with
/// the cancellation notice.
pub async fn submit<I>(
    shell: &mut Shell,
    client: &BankClient,
    refresh: bool,
    interrupt: I,
) -> Result<String, String>
where
    I: Future,
{
    let screen = shell.screen_mut().ok_or_else(|| NO_SCREEN.to_string())?;
    let kind = screen.kind();

    let outcome = if refresh {
        until_interrupted(screen.refresh(client), interrupt).await
    } else {
        until_interrupted(screen.submit(client), interrupt).await
    };

    match outcome {
        None => {
            warn!("{:?} request cancelled", kind);
            screen.cancel();
        }
        // blocked before anything was sent
        Some(Err(ApiError::Validation(message))) => return Err(message),
        Some(Err(e)) => info!("{:?} failed: {}", kind, e),
        Some(Ok(())) => {}
    }

    if shell.complete_login() {
        let welcome = shell
            .dashboard()
            .map(|dashboard| format!("Logged in as {}", dashboard.role()))
            .unwrap_or_default();
        return Ok(format!("{}\n{}", welcome, shell.render().render()));
    }
    Ok(shell.render().render())
}
