use crate::views::{Shell, ViewKind};

const LOGIN_FIRST: &str = "Log in first: `login <username> <password>`";

/// `open <screen>`, or a bare screen name
pub fn open(shell: &mut Shell, args: &[&str]) -> Result<String, String> {
    let name = args
        .first()
        .ok_or_else(|| "Usage: open <screen>. Type `menu` to list screens.".to_string())?;
    let kind = ViewKind::from_command(name)
        .ok_or_else(|| format!("Unknown screen `{}`. Type `menu` to list screens.", name))?;

    let dashboard = shell.dashboard_mut().ok_or_else(|| LOGIN_FIRST.to_string())?;
    dashboard.open(kind)?;
    Ok(dashboard.render().render())
}

/// `menu` / `back`: close the open screen and show the overview
pub fn back(shell: &mut Shell) -> Result<String, String> {
    let dashboard = shell.dashboard_mut().ok_or_else(|| LOGIN_FIRST.to_string())?;
    dashboard.back();
    Ok(dashboard.render_overview().render())
}

pub fn show(shell: &Shell) -> Result<String, String> {
    Ok(shell.render().render())
}

/// `tab`, `next`, `prev` on the open screen
pub fn navigate(shell: &mut Shell, action: &str, args: &[&str]) -> Result<String, String> {
    let screen = shell
        .screen_mut()
        .ok_or_else(|| "Open a screen first. Type `menu` to list screens.".to_string())?;
    screen.navigate(action, args.first().copied())?;
    Ok(screen.render().render())
}
