//! Transfer settings sent with every upload.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransferError};

/// When the statbank approves loaded data for publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approve {
    /// Someone approves the load by hand.
    Manual,
    /// Approved as soon as the load finishes.
    Automatic,
    /// Approved just in time, right before the publishing time.
    #[default]
    Jit,
}

impl Approve {
    /// Numeric code used in the upload parameters.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Manual => 0,
            Self::Automatic => 1,
            Self::Jit => 2,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
            Self::Jit => "jit",
        }
    }

    /// Accepts the numeric code or the name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "0" | "manual" | "manuell" => Some(Self::Manual),
            "1" | "automatic" | "automatisk" => Some(Self::Automatic),
            "2" | "jit" | "just-in-time" => Some(Self::Jit),
            _ => None,
        }
    }
}

impl FromStr for Approve {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            TransferError::InvalidSettings(format!(
                "approve must be 0 (manual), 1 (automatic) or 2 (jit), got '{s}'"
            ))
        })
    }
}

impl fmt::Display for Approve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-upload settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSettings {
    /// Date the data is published.
    #[serde(default = "tomorrow")]
    pub publish_date: NaiveDate,

    /// Initials of the person responsible for the load (three letters).
    pub shortuser: String,

    /// First responsible statistician. Defaults to `shortuser`.
    #[serde(default)]
    pub cc: String,

    /// Second responsible statistician. Defaults to `shortuser`.
    #[serde(default)]
    pub bcc: String,

    /// Replace data already loaded for the same period.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,

    #[serde(default)]
    pub approve: Approve,
}

fn tomorrow() -> NaiveDate {
    let today = Local::now().date_naive();
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

fn default_overwrite() -> bool {
    true
}

impl TransferSettings {
    /// Settings for `shortuser` with every other field at its default.
    pub fn new(shortuser: impl Into<String>) -> Self {
        let shortuser = shortuser.into();
        Self {
            publish_date: tomorrow(),
            cc: shortuser.clone(),
            bcc: shortuser.clone(),
            shortuser,
            overwrite: default_overwrite(),
            approve: Approve::default(),
        }
    }

    /// Reads `STATBANK_SHORTUSER`, `STATBANK_CC` and `STATBANK_BCC`.
    pub fn from_env() -> Result<Self> {
        let shortuser = std::env::var("STATBANK_SHORTUSER").map_err(|_| {
            TransferError::InvalidSettings("STATBANK_SHORTUSER is not set".to_string())
        })?;
        let mut settings = Self::new(shortuser);
        if let Ok(cc) = std::env::var("STATBANK_CC") {
            settings.cc = cc;
        }
        if let Ok(bcc) = std::env::var("STATBANK_BCC") {
            settings.bcc = bcc;
        }
        Ok(settings)
    }

    pub fn with_publish_date(mut self, date: NaiveDate) -> Self {
        self.publish_date = date;
        self
    }

    pub fn with_approve(mut self, approve: Approve) -> Self {
        self.approve = approve;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Fills empty cc/bcc from `shortuser` and checks all three.
    pub fn validate(&mut self) -> Result<()> {
        if self.cc.trim().is_empty() {
            self.cc = self.shortuser.clone();
        }
        if self.bcc.trim().is_empty() {
            self.bcc = self.shortuser.clone();
        }
        for (field, value) in [
            ("shortuser", &self.shortuser),
            ("cc", &self.cc),
            ("bcc", &self.bcc),
        ] {
            if !is_initials(value) {
                return Err(TransferError::InvalidSettings(format!(
                    "{field} must be three letters, got '{value}'"
                )));
            }
        }
        Ok(())
    }

    /// Query parameters for an upload of `table_id`, in the order sent.
    pub fn query_params(&self, table_id: &str) -> Vec<(&'static str, String)> {
        vec![
            ("initialier", self.shortuser.clone()),
            ("hovedtabell", table_id.to_string()),
            (
                "publiseringsdato",
                self.publish_date.format("%Y-%m-%d").to_string(),
            ),
            ("fagansvarlig1", self.cc.clone()),
            ("fagansvarlig2", self.bcc.clone()),
            (
                "auto_overskriv_data",
                u8::from(self.overwrite).to_string(),
            ),
            ("auto_godkjenn_data", self.approve.code().to_string()),
        ]
    }
}

fn is_initials(value: &str) -> bool {
    value.chars().count() == 3 && value.chars().all(char::is_alphabetic)
}

/// Table ids are digit strings.
pub fn check_table_id(table_id: &str) -> Result<()> {
    if !table_id.is_empty() && table_id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(TransferError::InvalidTableId(table_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_parses_codes_and_names() {
        assert_eq!(Approve::parse("0"), Some(Approve::Manual));
        assert_eq!(Approve::parse("Automatic"), Some(Approve::Automatic));
        assert_eq!(Approve::parse(" jit "), Some(Approve::Jit));
        assert_eq!(Approve::parse("3"), None);
        assert!("later".parse::<Approve>().is_err());
        assert_eq!(Approve::default(), Approve::Jit);
    }

    #[test]
    fn new_settings_default_cc_to_shortuser() {
        let settings = TransferSettings::new("tbf");
        assert_eq!(settings.cc, "tbf");
        assert_eq!(settings.bcc, "tbf");
        assert!(settings.overwrite);
        assert!(settings.publish_date > Local::now().date_naive());
    }

    #[test]
    fn validate_requires_three_letters() {
        assert!(TransferSettings::new("tbf").validate().is_ok());
        assert!(TransferSettings::new("tb").validate().is_err());
        assert!(TransferSettings::new("t1f").validate().is_err());

        let mut settings = TransferSettings::new("tbf");
        settings.cc = "abcd".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("cc"));
    }

    #[test]
    fn validate_fills_empty_cc() {
        let mut settings = TransferSettings::new("tbf");
        settings.bcc = String::new();
        settings.validate().expect("valid");
        assert_eq!(settings.bcc, "tbf");
    }

    #[test]
    fn query_params_are_ordered() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 7).expect("date");
        let settings = TransferSettings::new("tbf")
            .with_publish_date(date)
            .with_overwrite(false)
            .with_approve(Approve::Manual);
        let params = settings.query_params("10000");
        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "initialier",
                "hovedtabell",
                "publiseringsdato",
                "fagansvarlig1",
                "fagansvarlig2",
                "auto_overskriv_data",
                "auto_godkjenn_data",
            ]
        );
        assert_eq!(params[2].1, "2023-01-07");
        assert_eq!(params[5].1, "0");
        assert_eq!(params[6].1, "0");
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: TransferSettings =
            serde_json::from_str(r#"{"shortuser": "tbf"}"#).expect("deserialize");
        assert_eq!(settings.approve, Approve::Jit);
        assert!(settings.overwrite);
        assert!(settings.cc.is_empty());
    }

    #[test]
    fn table_ids_are_digits() {
        assert!(check_table_id("05300").is_ok());
        assert!(check_table_id("").is_err());
        assert!(check_table_id("HovedTabellNavn").is_err());
    }
}
