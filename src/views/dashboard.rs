use super::{Screen, ViewKind};
use crate::api::bank::Role;
use crate::utils::{Card, Table};
use tracing::debug;

/// Menu overview plus at most one open screen.
///
/// Nothing about the open screen survives `back`; reopening builds it fresh.
pub struct Dashboard {
    role: Role,
    active: Option<Box<dyn Screen>>,
    history_page_size: usize,
}

impl Dashboard {
    pub fn new(role: Role, history_page_size: usize) -> Self {
        Self {
            role,
            active: None,
            history_page_size,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Menu entries this role may open, in menu order
    pub fn menu_items(&self) -> Vec<ViewKind> {
        ViewKind::MENU
            .into_iter()
            .filter(|kind| kind.allowed_for(self.role))
            .collect()
    }

    /// Replace whatever is open with a fresh `kind` screen
    pub fn open(&mut self, kind: ViewKind) -> Result<(), String> {
        if kind == ViewKind::Login {
            return Err("Already logged in. Use `logout` first.".to_string());
        }
        if !kind.allowed_for(self.role) {
            return Err(format!(
                "{} is not available to the {} role",
                kind.title(),
                self.role
            ));
        }
        debug!("Opening {:?}", kind);
        self.active = Some(kind.build(self.history_page_size));
        Ok(())
    }

    /// Close the open screen; returns false when already on the overview
    pub fn back(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn active(&self) -> Option<&dyn Screen> {
        self.active.as_deref()
    }

    pub fn active_mut(&mut self) -> Option<&mut dyn Screen> {
        match &mut self.active {
            Some(screen) => Some(screen.as_mut()),
            None => None,
        }
    }

    pub fn render_overview(&self) -> Card {
        let mut table = Table::new(&["Open with", "Screen", "What it does"]);
        for kind in self.menu_items() {
            table.add_row(&[kind.command(), kind.title(), kind.description()]);
        }

        Card::new("Banking Dashboard")
            .description(format!("Signed in as {}", self.role))
            .body(table.render())
            .footer("open <screen> · logout · help")
    }

    /// The open screen, or the overview
    pub fn render(&self) -> Card {
        match &self.active {
            Some(screen) => screen.render(),
            None => self.render_overview(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_follows_role() {
        let admin = Dashboard::new(Role::Admin, 10);
        assert_eq!(admin.menu_items().len(), 9);

        let teller = Dashboard::new(Role::Teller, 10);
        assert!(!teller.menu_items().contains(&ViewKind::CreateUser));
        assert!(!teller.menu_items().contains(&ViewKind::CreateAccount));
        assert_eq!(teller.menu_items().len(), 7);

        let customer = Dashboard::new(Role::Customer, 10);
        assert_eq!(
            customer.menu_items(),
            vec![
                ViewKind::Deposit,
                ViewKind::Withdraw,
                ViewKind::Transfer,
                ViewKind::History
            ]
        );
    }

    #[test]
    fn test_open_and_back_discard_state() {
        let mut dashboard = Dashboard::new(Role::Teller, 10);
        assert!(!dashboard.back());

        dashboard.open(ViewKind::Deposit).unwrap();
        dashboard
            .active_mut()
            .unwrap()
            .set_field("h", "AC1001")
            .unwrap();
        assert!(dashboard.back());
        assert!(dashboard.active().is_none());

        dashboard.open(ViewKind::Deposit).unwrap();
        assert_eq!(dashboard.active().unwrap().fields().get("h"), "");
    }

    #[test]
    fn test_guarded_screens_refused() {
        let mut dashboard = Dashboard::new(Role::Customer, 10);
        let err = dashboard.open(ViewKind::Enquiry).unwrap_err();
        assert_eq!(err, "Balance Enquiry is not available to the customer role");
        assert!(dashboard.open(ViewKind::Login).is_err());
        assert!(dashboard.active().is_none());
    }

    #[test]
    fn test_overview_lists_menu() {
        let dashboard = Dashboard::new(Role::Customer, 10);
        let rendered = dashboard.render().render();
        assert!(rendered.contains("Signed in as customer"));
        assert!(rendered.contains("transfer"));
        assert!(!rendered.contains("create-user"));
    }
}
