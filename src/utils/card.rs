/// Alert tone for the single status line under a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Error,
}

impl AlertKind {
    fn prefix(&self) -> &'static str {
        match self {
            AlertKind::Info => "ℹ",
            AlertKind::Success => "✅",
            AlertKind::Error => "❌",
        }
    }
}

/// A titled block of text printed to the console
#[derive(Debug, Clone, Default)]
pub struct Card {
    title: String,
    description: Option<String>,
    fields: Vec<(String, String)>,
    body: Vec<String>,
    alert: Option<(AlertKind, String)>,
    footer: Option<String>,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((label.into(), value.into()));
        self
    }

    /// Free-form lines (tables, lists) printed after the fields
    pub fn body(mut self, text: impl Into<String>) -> Self {
        self.body.push(text.into());
        self
    }

    pub fn alert(mut self, kind: AlertKind, text: impl Into<String>) -> Self {
        self.alert = Some((kind, text.into()));
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn render(&self) -> String {
        let width = self.title.chars().count().max(24);
        let mut output = String::new();

        output.push_str(&format!("┌ {}\n", self.title));
        if let Some(description) = &self.description {
            output.push_str(&format!("│ {}\n", description));
        }
        output.push_str(&format!("├{}\n", "─".repeat(width + 1)));

        let label_width = self
            .fields
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        for (label, value) in &self.fields {
            output.push_str(&format!("│ {:<width$} : {}\n", label, value, width = label_width));
        }

        for block in &self.body {
            for line in block.lines() {
                output.push_str(&format!("│ {}\n", line));
            }
        }

        if let Some((kind, text)) = &self.alert {
            output.push_str(&format!("│ {} {}\n", kind.prefix(), text));
        }

        if let Some(footer) = &self.footer {
            output.push_str(&format!("└ {}\n", footer));
        } else {
            output.push_str(&format!("└{}\n", "─".repeat(width + 1)));
        }

        output
    }
}
