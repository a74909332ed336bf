use crate::api::bank::BankClient;
use crate::views::Shell;

/// `login <username> <password>`; with no arguments, shows the login screen
pub async fn login(shell: &mut Shell, client: &BankClient, args: &[&str]) -> Result<String, String> {
    if shell.is_signed_in() {
        return Err("Already logged in. Use `logout` first.".to_string());
    }

    let (username, password) = match args {
        [] => return Ok(shell.render().render()),
        [username, password] => (*username, *password),
        _ => return Err("Usage: login <username> <password>".to_string()),
    };

    let welcome = shell
        .login(client, username, password)
        .await
        .map_err(|e| e.to_string())?;
    Ok(format!("{}\n{}", welcome, shell.render().render()))
}

pub async fn logout(shell: &mut Shell, client: &BankClient) -> Result<String, String> {
    if !shell.is_signed_in() {
        return Err("Not logged in".to_string());
    }
    let message = shell.logout(client).await;
    Ok(format!("{}\n{}", message, shell.render().render()))
}
