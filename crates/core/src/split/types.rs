//! Split data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a person, unique within one request.
pub type PersonId = i64;

/// A participant in the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Person ID.
    pub id: PersonId,
    /// Display name.
    pub name: String,
}

impl Person {
    /// Creates a new person.
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A shared expense paid by one person and split equally among participants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Bill ID.
    #[serde(default)]
    pub id: i64,
    /// Bill title.
    #[serde(default)]
    pub title: String,
    /// Amount in the bill's own currency.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Free-text category, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Currency code of `amount`; `None` or blank means the base currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Amount converted into the base currency.
    #[serde(
        default,
        with = "rust_decimal::serde::float",
        skip_serializing_if = "Decimal::is_zero"
    )]
    pub amount_base: Decimal,
    /// Person who paid.
    #[serde(default)]
    pub paid_by: PersonId,
    /// People sharing the bill. A repeated ID is charged once per occurrence.
    #[serde(default)]
    pub participants: Vec<PersonId>,
}

impl Bill {
    /// Creates a base-currency bill.
    pub fn new(id: i64, amount: Decimal, paid_by: PersonId, participants: Vec<PersonId>) -> Self {
        Self {
            id,
            amount,
            paid_by,
            participants,
            ..Self::default()
        }
    }

    /// Sets the bill's currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Sets the bill's title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Amount used for settlement: the converted amount when present,
    /// otherwise the original amount.
    #[must_use]
    pub fn settlement_amount(&self) -> Decimal {
        if self.amount_base.is_zero() {
            self.amount
        } else {
            self.amount_base
        }
    }
}

/// A recommended transfer from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Name of the person paying.
    pub from: String,
    /// Name of the person receiving.
    pub to: String,
    /// Amount in the base currency, always positive.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}
