use super::form::{Fields, FormState, TextField};
use super::{begin_submit, render_form, Screen, ViewKind};
use crate::api::bank::models::{UpdateEmailRequest, UpdateMobileRequest};
use crate::api::bank::{ApiError, BankClient};
use crate::utils::Card;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTab {
    Mobile,
    Email,
}

impl InfoTab {
    fn name(&self) -> &'static str {
        match self {
            InfoTab::Mobile => "mobile",
            InfoTab::Email => "email",
        }
    }
}

/// One tab's inputs and status; tabs do not share state
struct TabForm {
    fields: Fields,
    state: FormState,
}

/// Mobile number and email updates, one tab each
pub struct UpdateInfo {
    tab: InfoTab,
    mobile: TabForm,
    email: TabForm,
}

impl UpdateInfo {
    pub fn new() -> Self {
        Self {
            tab: InfoTab::Mobile,
            mobile: TabForm {
                fields: Fields::new(vec![
                    TextField::text("h", "Account Number"),
                    TextField::pin("pin", "PIN"),
                    TextField::text("omobileno", "Current Mobile").max_len(10),
                    TextField::text("nmobileno", "New Mobile").max_len(10),
                ]),
                state: FormState::new(),
            },
            email: TabForm {
                fields: Fields::new(vec![
                    TextField::text("h", "Account Number"),
                    TextField::pin("pin", "PIN"),
                    TextField::text("oemail", "Current Email"),
                    TextField::text("nemail", "New Email"),
                ]),
                state: FormState::new(),
            },
        }
    }

    pub fn tab(&self) -> InfoTab {
        self.tab
    }

    fn active(&self) -> &TabForm {
        match self.tab {
            InfoTab::Mobile => &self.mobile,
            InfoTab::Email => &self.email,
        }
    }

    fn active_mut(&mut self) -> &mut TabForm {
        match self.tab {
            InfoTab::Mobile => &mut self.mobile,
            InfoTab::Email => &mut self.email,
        }
    }
}

impl Default for UpdateInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Screen for UpdateInfo {
    fn kind(&self) -> ViewKind {
        ViewKind::UpdateInfo
    }

    fn fields(&self) -> &Fields {
        &self.active().fields
    }

    fn fields_mut(&mut self) -> &mut Fields {
        &mut self.active_mut().fields
    }

    fn state(&self) -> &FormState {
        &self.active().state
    }

    fn state_mut(&mut self) -> &mut FormState {
        &mut self.active_mut().state
    }

    fn validate(&self) -> Result<(), String> {
        let fields = self.fields();
        fields.require(&fields.names())?;
        fields.require_pin("pin")
    }

    async fn submit(&mut self, client: &BankClient) -> Result<(), ApiError> {
        begin_submit(self)?;

        let fields = &self.active().fields;
        let h = fields.get("h").trim().to_string();
        let pin = fields.get("pin").to_string();

        let outcome = match self.tab {
            InfoTab::Mobile => {
                let request = UpdateMobileRequest {
                    h,
                    pin,
                    omobileno: fields.get("omobileno").trim().to_string(),
                    nmobileno: fields.get("nmobileno").trim().to_string(),
                };
                client.update_mobile(&request).await
            }
            InfoTab::Email => {
                let request = UpdateEmailRequest {
                    h,
                    pin,
                    oemail: fields.get("oemail").trim().to_string(),
                    nemail: fields.get("nemail").trim().to_string(),
                };
                client.update_email(&request).await
            }
        };

        let tab = self.active_mut();
        tab.state.settle(outcome.map(|resp| resp.message))?;
        tab.fields.clear_all();
        Ok(())
    }

    fn navigate(&mut self, action: &str, arg: Option<&str>) -> Result<(), String> {
        if action != "tab" {
            return Err(format!("'{}' is not available on this screen", action));
        }
        self.tab = match arg.map(|a| a.to_lowercase()).as_deref() {
            Some("mobile") => InfoTab::Mobile,
            Some("email") => InfoTab::Email,
            _ => return Err("Usage: tab <mobile|email>".to_string()),
        };
        Ok(())
    }

    fn render(&self) -> Card {
        let tabs = [InfoTab::Mobile, InfoTab::Email]
            .iter()
            .map(|tab| {
                if *tab == self.tab {
                    format!("[{}]", tab.name())
                } else {
                    tab.name().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        render_form(self.kind(), self.fields(), self.state(), self.can_submit())
            .body(format!("Tabs: {}   (tab <mobile|email>)", tabs))
    }
}
