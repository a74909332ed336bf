//! Transaction history display models
//!
//! Classification here is a display heuristic over the free-text action
//! label. It never feeds back into balances.

use crate::api::bank::HistoryEntry;
use chrono::{DateTime, NaiveDateTime};

/// What an action label looks like it describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Deposit,
    Withdraw,
    TransferIn,
    TransferOut,
    Other,
}

/// Credit/debit direction derived from an `ActionKind`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Credit,
    Debit,
    Neutral,
}

impl ActionKind {
    /// Case-insensitive substring match; order matters ("Transfer received"
    /// is incoming, any other "transfer" outgoing)
    pub fn classify(action: &str) -> Self {
        let lowered = action.to_lowercase();
        if lowered.contains("deposit") {
            ActionKind::Deposit
        } else if lowered.contains("withdraw") {
            ActionKind::Withdraw
        } else if lowered.contains("received") {
            ActionKind::TransferIn
        } else if lowered.contains("transfer") {
            ActionKind::TransferOut
        } else {
            ActionKind::Other
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            ActionKind::Deposit | ActionKind::TransferIn => Tone::Credit,
            ActionKind::Withdraw | ActionKind::TransferOut => Tone::Debit,
            ActionKind::Other => Tone::Neutral,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ActionKind::Deposit => "⬇",
            ActionKind::Withdraw => "⬆",
            ActionKind::TransferIn | ActionKind::TransferOut => "⇄",
            ActionKind::Other => "₹",
        }
    }
}

impl Tone {
    pub fn sign(&self) -> &'static str {
        match self {
            Tone::Credit => "+",
            Tone::Debit => "-",
            Tone::Neutral => "",
        }
    }

    /// ANSI foreground colour
    pub fn color(&self) -> &'static str {
        match self {
            Tone::Credit => "\x1b[32m",
            Tone::Debit => "\x1b[31m",
            Tone::Neutral => "\x1b[90m",
        }
    }
}

/// Group digits the Indian way: last three, then pairs (12,34,567)
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Signed rupee amount for a history row
pub fn format_amount(amount: i64, kind: ActionKind) -> String {
    format!("{}₹{}", kind.tone().sign(), group_indian(amount.unsigned_abs()))
}

/// Render `2026-10-19 14:30:00` (or RFC 3339) as `19 Oct 2026, 02:30 PM`.
/// Unparseable input comes back unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%d %b %Y, %I:%M %p";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format(DISPLAY).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// A history entry ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub id: i64,
    pub kind: ActionKind,
    pub label: String,
    pub when: String,
    pub amount: String,
}

impl HistoryRow {
    pub fn tone(&self) -> Tone {
        self.kind.tone()
    }
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        let kind = ActionKind::classify(&entry.action);
        Self {
            id: entry.id,
            kind,
            label: entry.action.clone(),
            when: format_timestamp(&entry.timestamp),
            amount: format_amount(entry.amount, kind),
        }
    }
}
