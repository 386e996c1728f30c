use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Accepts the usual spellings a user types on the command line.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" | "inc" | "in" | "+" => Some(Self::Income),
            "expense" | "exp" | "out" | "-" => Some(Self::Expense),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [TransactionKind] {
        &[Self::Income, Self::Expense]
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub(crate) id: String,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionKind,
    pub(crate) amount: Decimal,
    pub(crate) category: String,
    pub(crate) description: String,
    /// Format: "YYYY-MM-DD"
    pub(crate) date: String,
}

impl Transaction {
    pub(crate) fn from_new(id: String, new: NewTransaction) -> Self {
        Self {
            id,
            kind: new.kind,
            amount: new.amount,
            category: new.category,
            description: new.description,
            date: new.date,
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// True when the date falls in `month` ("YYYY-MM"), by prefix.
    pub(crate) fn in_month(&self, month: &str) -> bool {
        self.date.starts_with(month)
    }

    /// Amount with the sign implied by the kind (expenses negative).
    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub(crate) fn apply(&mut self, patch: TransactionPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

/// A transaction as entered, before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewTransaction {
    pub(crate) kind: TransactionKind,
    pub(crate) amount: Decimal,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) date: String,
}

impl NewTransaction {
    pub(crate) fn new(
        kind: TransactionKind,
        amount: Decimal,
        category: String,
        description: String,
        date: String,
    ) -> Self {
        Self {
            kind,
            amount,
            category,
            description,
            date,
        }
    }
}

/// Fields to merge into an existing transaction. The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TransactionPatch {
    pub(crate) kind: Option<TransactionKind>,
    pub(crate) amount: Option<Decimal>,
    pub(crate) category: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) date: Option<String>,
}

impl TransactionPatch {
    pub(crate) fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }
}
