use super::form::{Fields, FormState, TextField};
use super::{begin_submit, render_form, Screen, ViewKind};
use crate::api::bank::models::{AccountRequest, HistoryResponse};
use crate::api::bank::{ApiError, BankClient};
use crate::models::HistoryRow;
use crate::utils::{Card, Page, Table};
use async_trait::async_trait;
use tracing::debug;

const NO_HISTORY: &str = "No transaction history found for this account.";
const FETCH_FAILED: &str = "Failed to fetch transaction history.";
const RESET: &str = "\x1b[0m";

/// Paginated transaction history for one account
pub struct HistoryView {
    fields: Fields,
    state: FormState,
    entries: Page<HistoryRow>,
    page_size: usize,
    /// Account number the listed entries belong to
    account: Option<String>,
}

impl HistoryView {
    pub fn new(page_size: usize) -> Self {
        Self {
            fields: Fields::new(vec![
                TextField::text("h", "Account Number"),
                TextField::pin("pin", "PIN"),
            ]),
            state: FormState::new(),
            entries: Page::new(Vec::new(), page_size),
            page_size,
            account: None,
        }
    }

    pub fn entries(&self) -> &Page<HistoryRow> {
        &self.entries
    }

    fn clear_entries(&mut self) {
        self.entries = Page::new(Vec::new(), self.page_size);
        self.account = None;
    }

    /// Fetch and list entries; shared by submit and refresh
    async fn fetch(&mut self, client: &BankClient) -> Result<(), ApiError> {
        let request = AccountRequest {
            h: self.fields.get("h").trim().to_string(),
            pin: self.fields.get("pin").trim().to_string(),
        };

        let outcome = match client.history(&request).await {
            Ok(HistoryResponse::Entries { history }) if history.is_empty() => {
                self.clear_entries();
                Err(ApiError::Rejected {
                    status: 200,
                    message: NO_HISTORY.to_string(),
                })
            }
            Ok(HistoryResponse::Entries { history }) => {
                debug!("Fetched {} history entries", history.len());
                let rows: Vec<HistoryRow> = history.iter().map(HistoryRow::from).collect();
                let count = rows.len();
                self.entries = Page::new(rows, self.page_size);
                self.account = Some(request.h);
                Ok(format!("{} transactions found", count))
            }
            // 2xx body carrying only a notice
            Ok(HistoryResponse::Notice { message, detail }) => Err(ApiError::Rejected {
                status: 200,
                message: message
                    .filter(|text| !text.is_empty())
                    .or(detail.filter(|text| !text.is_empty()))
                    .unwrap_or_else(|| FETCH_FAILED.to_string()),
            }),
            Err(e) => Err(e),
        };
        self.state.settle(outcome)
    }

    fn render_entries(&self) -> Option<String> {
        let account = self.account.as_ref()?;
        if self.entries.is_empty() {
            return None;
        }

        let mut table = Table::new(&["#", "Action", "When", "Amount"]);
        for row in self.entries.current() {
            let tone = row.tone();
            table.add_row(&[
                row.id.to_string(),
                format!("{} {}", row.kind.symbol(), row.label),
                row.when.clone(),
                format!("{}{}{}", tone.color(), row.amount, RESET),
            ]);
        }

        Some(format!(
            "Transaction History for {}\n{}\n{} · {} entries",
            account,
            table.render(),
            self.entries.label(),
            self.entries.total_items()
        ))
    }
}

#[async_trait]
impl Screen for HistoryView {
    fn kind(&self) -> ViewKind {
        ViewKind::History
    }

    fn fields(&self) -> &Fields {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }

    fn state(&self) -> &FormState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    fn validate(&self) -> Result<(), String> {
        self.fields.require(&["h", "pin"])?;
        self.fields.require_pin("pin")
    }

    async fn submit(&mut self, client: &BankClient) -> Result<(), ApiError> {
        begin_submit(self)?;
        self.clear_entries();
        self.fetch(client).await
    }

    fn navigate(&mut self, action: &str, _arg: Option<&str>) -> Result<(), String> {
        let moved = match action {
            "next" => self.entries.next(),
            "prev" => self.entries.previous(),
            _ => return Err(format!("'{}' is not available on this screen", action)),
        };
        if self.entries.is_empty() {
            return Err("No entries listed yet".to_string());
        }
        if !moved {
            return Err(format!("Already on {}", self.entries.label()));
        }
        Ok(())
    }

    fn can_refresh(&self) -> bool {
        !self.entries.is_empty() && !self.state.is_loading()
    }

    async fn refresh(&mut self, client: &BankClient) -> Result<(), ApiError> {
        if !self.can_refresh() {
            return Err(ApiError::Validation(
                "Nothing to refresh on this screen".to_string(),
            ));
        }
        begin_submit(self)?;
        self.fetch(client).await
    }

    fn render(&self) -> Card {
        let card = render_form(self.kind(), self.fields(), self.state(), self.can_submit());
        match self.render_entries() {
            Some(listing) => card.body(listing),
            None => card,
        }
    }
}
