use crate::error::Error;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three computed warranty states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyStatus {
    Active,
    ExpiringSoon,
    Expired,
}

impl WarrantyStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::ExpiringSoon => "expiring_soon",
            Self::Expired => "expired",
        }
    }
}

/// List filter selected by the user. Session state only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyFilter {
    #[default]
    All,
    Active,
    ExpiringSoon,
    Expired,
}

impl WarrantyFilter {
    const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::ExpiringSoon => "expiring_soon",
            Self::Expired => "expired",
        }
    }
}

/// A tracked purchase and its warranty terms.
///
/// `id` is assigned by the store on first save; `0` means "not yet
/// persisted". At least one of `expiration_date` / positive
/// `duration_months` must be present for the item to be savable — when both
/// are set, the explicit date wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyItem {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub store: Option<String>,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration_months: Option<u32>,
    #[serde(default = "default_true")]
    pub reminder_enabled: bool,
}

const fn default_true() -> bool {
    true
}

impl WarrantyItem {
    /// Minimal valid item; optional fields absent, reminders on.
    #[must_use]
    pub fn new(name: impl Into<String>, purchase_date: NaiveDate) -> Self {
        Self {
            id: 0,
            name: name.into(),
            category: None,
            price: None,
            store: None,
            purchase_date,
            expiration_date: None,
            duration_months: None,
            reminder_enabled: true,
        }
    }

    /// The effective expiration date used for all status math.
    ///
    /// The explicit `expiration_date` wins; otherwise the purchase date is
    /// advanced by `duration_months` calendar months, clamping to the last
    /// day of the target month when the same day-of-month does not exist
    /// (Jan 31 + 1 month = Feb 28/29). A zero duration counts as absent.
    #[must_use]
    pub fn resolved_expiration(&self) -> Option<NaiveDate> {
        self.expiration_date.or_else(|| {
            self.duration_months
                .filter(|months| *months > 0)
                .and_then(|months| self.purchase_date.checked_add_months(Months::new(months)))
        })
    }

    /// Check the save invariants without touching any store.
    ///
    /// # Errors
    ///
    /// [`Error::BlankName`] for an empty or whitespace-only name,
    /// [`Error::NoExpiration`] when neither an explicit expiration date nor
    /// a positive duration is present, [`Error::NegativePrice`] for a
    /// negative price.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::BlankName);
        }
        if self.expiration_date.is_none() && !self.duration_months.is_some_and(|m| m > 0) {
            return Err(Error::NoExpiration);
        }
        if self.price.is_some_and(|p| p < 0.0) {
            return Err(Error::NegativePrice);
        }
        Ok(())
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for WarrantyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WarrantyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase().replace('-', "_")
}

impl FromStr for WarrantyStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "active" => Ok(Self::Active),
            "expiring_soon" => Ok(Self::ExpiringSoon),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for WarrantyFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "expiring_soon" => Ok(Self::ExpiringSoon),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseEnumError {
                expected: "filter",
                got: s.to_string(),
            }),
        }
    }
}
