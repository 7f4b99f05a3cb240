//! Parsing of the loader's response message.
//!
//! A successful upload answers with a message like
//! `... Publiseringsdato '07.01.2023 00:00:00', Publiseringstid '08:00': ...
//! lasteoppdragsnummer:197885 => INFORMASJON ...`. The load-job number
//! identifies the upload for later polling.

use std::sync::LazyLock;

use chrono::{NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransferError};

static LOAD_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"lasteoppdragsnummer:(\d+)").expect("Invalid load number regex"));

static PUBLISH_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Publiseringsdato '(\d{2}\.\d{2}\.\d{4} \d{2}:\d{2}:\d{2})'")
        .expect("Invalid publish date regex")
});

static PUBLISH_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Publiseringstid '(\d{2}):(\d{2})'").expect("Invalid publish time regex")
});

/// What the loader confirmed about an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Load-job number assigned by the statbank.
    pub load_number: String,
    /// Scheduled publishing time, when the message states one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<NaiveDateTime>,
}

impl Receipt {
    pub fn parse(message: &str) -> Result<Self> {
        let load_number = LOAD_NUMBER_REGEX
            .captures(message)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                TransferError::Response(format!("no load-job number in message: {message}"))
            })?;

        let publish_date = PUBLISH_DATE_REGEX
            .captures(message)
            .and_then(|c| c.get(1))
            .and_then(|m| NaiveDateTime::parse_from_str(m.as_str(), "%d.%m.%Y %H:%M:%S").ok());
        let publish_time = PUBLISH_TIME_REGEX.captures(message).and_then(|c| {
            let hour = c.get(1)?.as_str().parse().ok()?;
            let minute = c.get(2)?.as_str().parse().ok()?;
            NaiveTime::from_hms_opt(hour, minute, 0)
        });
        let publish_at = match (publish_date, publish_time) {
            (Some(date), Some(time)) => Some(date.date().and_time(time)),
            (date, _) => date,
        };

        Ok(Self {
            load_number,
            publish_at,
        })
    }
}
