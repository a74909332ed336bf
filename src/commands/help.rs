use crate::utils::Card;
use crate::views::Shell;

pub fn execute(shell: &Shell) -> Result<String, String> {
    let mut card = Card::new("📖 ATM Console Help")
        .description("Banking operations console. One command per line.")
        .field(
            "Session",
            "login <username> <password> · logout · quit",
        )
        .field(
            "Screens",
            "menu (or back) · open <screen> · show",
        )
        .field(
            "Forms",
            "set <field> <value> · fill <values...> · submit (Ctrl-C cancels)",
        )
        .field(
            "Screen actions",
            "tab <mobile|email> · next · prev · refresh",
        );

    if let Some(dashboard) = shell.dashboard() {
        let screens = dashboard
            .menu_items()
            .iter()
            .map(|kind| kind.command())
            .collect::<Vec<_>>()
            .join(", ");
        card = card.field("Your screens", screens);
    }

    if let Some(screen) = shell.screen() {
        card = card.footer(format!(
            "{} fields: {}",
            screen.kind().title(),
            screen.fields().names().join(", ")
        ));
    }

    Ok(card.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_current_fields() {
        let shell = Shell::new(10);
        let help = execute(&shell).unwrap();
        assert!(help.contains("login <username> <password>"));
        assert!(help.contains("Staff Login fields: username, password"));
        assert!(!help.contains("Your screens"));
    }
}
