//! RFC 5545 RECUR rule-part validation.
//!
//! Events store their recurrence rule as the opaque text after `RRULE:`,
//! e.g. `FREQ=WEEKLY;BYDAY=MO,WE`. The rest of the system never interprets
//! the text; this module is the single place that checks it is syntactically
//! a RECUR value before it is persisted, and that can lift it into a
//! structured form for callers that need one.

use std::collections::BTreeMap;

use crate::error::CoreError;

/// Rule-part keys permitted by RFC 5545 §3.3.10.
const KNOWN_KEYS: &[&str] = &[
    "FREQ", "UNTIL", "COUNT", "INTERVAL", "BYSECOND", "BYMINUTE", "BYHOUR", "BYDAY", "BYMONTHDAY",
    "BYYEARDAY", "BYWEEKNO", "BYMONTH", "BYSETPOS", "WKST",
];

/// The mandatory FREQ rule part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl std::str::FromStr for Frequency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SECONDLY" => Ok(Frequency::Secondly),
            "MINUTELY" => Ok(Frequency::Minutely),
            "HOURLY" => Ok(Frequency::Hourly),
            "DAILY" => Ok(Frequency::Daily),
            "WEEKLY" => Ok(Frequency::Weekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "YEARLY" => Ok(Frequency::Yearly),
            _ => Err(()),
        }
    }
}

/// A structurally valid recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurRule {
    pub freq: Frequency,
    pub interval: Option<u32>,
    pub count: Option<u32>,
    /// All rule parts as written, keyed by uppercase name.
    pub parts: BTreeMap<String, String>,
}

/// Parse a RECUR value into its structured form.
pub fn parse(text: &str) -> Result<RecurRule, CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid recurrence rule: {text}"));

    if text.trim().is_empty() {
        return Err(invalid());
    }

    let mut parts = BTreeMap::new();
    for part in text.trim().split(';') {
        let (key, value) = part.split_once('=').ok_or_else(invalid)?;
        if value.is_empty() || !KNOWN_KEYS.contains(&key) {
            return Err(invalid());
        }
        // Duplicate rule parts are not allowed.
        if parts.insert(key.to_string(), value.to_string()).is_some() {
            return Err(invalid());
        }
    }

    let freq: Frequency = parts
        .get("FREQ")
        .and_then(|v| v.parse().ok())
        .ok_or_else(invalid)?;

    // COUNT and UNTIL are mutually exclusive.
    if parts.contains_key("COUNT") && parts.contains_key("UNTIL") {
        return Err(invalid());
    }

    let interval = parse_positive(&parts, "INTERVAL").map_err(|_| invalid())?;
    let count = parse_positive(&parts, "COUNT").map_err(|_| invalid())?;

    Ok(RecurRule {
        freq,
        interval,
        count,
        parts,
    })
}

/// `true` if the text is a syntactically valid RECUR value.
pub fn validate(text: &str) -> bool {
    parse(text).is_ok()
}

fn parse_positive(parts: &BTreeMap<String, String>, key: &str) -> Result<Option<u32>, ()> {
    match parts.get(key) {
        None => Ok(None),
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(()),
        },
    }
}
