//! Account model
//!
//! Represents balance-holding accounts (cash, card, deposit, savings). The
//! first cash and first card account are seeded on first run and protected
//! from hard deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::{Money, DEFAULT_CURRENCY};

/// Kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Physical cash
    #[default]
    Cash,
    /// Debit/credit card
    Card,
    /// Bank deposit
    Deposit,
    /// Savings account
    Savings,
}

impl AccountKind {
    /// Parse an account kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "card" => Some(Self::Card),
            "deposit" => Some(Self::Deposit),
            "savings" => Some(Self::Savings),
            _ => None,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Card => write!(f, "Card"),
            Self::Deposit => write!(f, "Deposit"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

/// A balance-holding account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Наличные")
    pub name: String,

    /// Kind of account
    #[serde(rename = "type")]
    pub kind: AccountKind,

    /// Running balance, updated only through transaction application or
    /// explicit edit
    pub balance: Money,

    /// Currency symbol
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Display color (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Display icon (emoji)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Whether this account is archived (soft-deleted)
    #[serde(default)]
    pub is_archived: bool,

    /// Whether this is a seeded default account (protected from deletion)
    #[serde(default)]
    pub is_default: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Input for creating a new account
#[derive(Debug, Clone, Default)]
pub struct AccountForm {
    pub name: String,
    pub kind: AccountKind,
    /// Starting balance; zero when unset
    pub balance: Option<Money>,
    pub currency: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Partial update for an account; unset fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub kind: Option<AccountKind>,
    pub balance: Option<Money>,
    pub currency: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_archived: Option<bool>,
}

impl AccountPatch {
    /// A patch that only replaces the balance
    pub fn balance(balance: Money) -> Self {
        Self {
            balance: Some(balance),
            ..Self::default()
        }
    }

    /// A patch that archives the account
    pub fn archived() -> Self {
        Self {
            is_archived: Some(true),
            ..Self::default()
        }
    }
}

impl Account {
    /// Create a new account from form data
    pub fn new(form: AccountForm) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name: form.name,
            kind: form.kind,
            balance: form.balance.unwrap_or_default(),
            currency: form.currency.unwrap_or_else(default_currency),
            color: form.color,
            icon: form.icon,
            is_archived: false,
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The two accounts seeded on first run: cash and card, zero balance
    pub fn default_pair() -> Vec<Account> {
        let cash = AccountForm {
            name: "Наличные".to_string(),
            kind: AccountKind::Cash,
            balance: None,
            currency: Some(default_currency()),
            color: Some("#22C55E".to_string()),
            icon: Some("💵".to_string()),
        };
        let card = AccountForm {
            name: "Карта".to_string(),
            kind: AccountKind::Card,
            balance: None,
            currency: Some(default_currency()),
            color: Some("#3B82F6".to_string()),
            icon: Some("💳".to_string()),
        };

        vec![cash, card]
            .into_iter()
            .map(|form| {
                let mut account = Account::new(form);
                account.is_default = true;
                account
            })
            .collect()
    }

    /// Apply a partial update, bumping `updated_at`
    pub fn apply(&mut self, patch: AccountPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(balance) = patch.balance {
            self.balance = balance;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(color) = patch.color {
            self.color = Some(color);
        }
        if let Some(icon) = patch.icon {
            self.icon = Some(icon);
        }
        if let Some(is_archived) = patch.is_archived {
            self.is_archived = is_archived;
        }
        self.updated_at = Utc::now();
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.chars().count() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
