use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TrackerError;
use crate::ladder::{ChargedRange, Rank, Step};

/// Stored credentials, `user:{username}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    // Plaintext, compared by equality. Kept for compatibility with existing data.
    pub password: String,
}

/// The signed-in user, handed explicitly to every workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub username: String,
}

impl AuthContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Per-user, per-game price for each step key.
///
/// Decoding repairs legacy data: tiered peak keys (`Legendary-*`) and values
/// that are not non-negative numbers are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, f64>")]
pub struct PriceTable {
    prices: BTreeMap<String, f64>,
}

impl PriceTable {
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        let mut table = Self::default();
        for (key, price) in pairs {
            table.insert(key, price);
        }
        table
    }

    /// Normalize text inputs, silently dropping entries that are not numbers
    pub fn from_inputs<K, V>(inputs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut table = Self::default();
        for (key, text) in inputs {
            if let Some(price) = parse_price(text.as_ref()) {
                table.insert(key, price);
            }
        }
        table
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.prices.get(key).copied()
    }

    pub fn price_of(&self, step: &Step) -> Option<f64> {
        self.get(&step.key())
    }

    /// Ignores tiered peak keys and invalid prices
    pub fn insert(&mut self, key: impl Into<String>, price: f64) {
        let key = key.into();
        if is_legacy_peak_key(&key) || !is_valid_price(price) {
            return;
        }
        self.prices.insert(key, price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(key, price)| (key.as_str(), *price))
    }

    /// Prices rendered back to editable text
    pub fn to_inputs(&self) -> BTreeMap<String, String> {
        self.prices
            .iter()
            .map(|(key, price)| (key.clone(), price.to_string()))
            .collect()
    }
}

impl From<BTreeMap<String, Value>> for PriceTable {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut table = Self::default();
        for (key, value) in raw {
            if is_legacy_peak_key(&key) {
                warn!("Dropping legacy price key {key}");
                continue;
            }
            match stored_price(&value) {
                Some(price) => table.insert(key, price),
                None => warn!("Dropping unreadable price for {key}: {value}"),
            }
        }
        table
    }
}

impl From<PriceTable> for BTreeMap<String, f64> {
    fn from(table: PriceTable) -> Self {
        table.prices
    }
}

fn is_legacy_peak_key(key: &str) -> bool {
    key.strip_prefix(Rank::PEAK.name())
        .is_some_and(|rest| rest.starts_with('-'))
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

fn stored_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|price| is_valid_price(*price)),
        Value::String(text) => parse_price(text),
        _ => None,
    }
}

pub fn parse_price(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| is_valid_price(*price))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Pending,
    Completed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(JobStatus::Pending),
            "completed" => Ok(JobStatus::Completed),
            other => Err(TrackerError::invalid(format!("unknown job status: {other}"))),
        }
    }
}

/// One boosting job, `pilots:{username}` holds the ordered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub client_name: String,
    pub date: NaiveDate,
    pub range: Vec<Step>,
    pub total: f64,
    #[serde(default)]
    pub status: JobStatus,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

impl JobRecord {
    pub fn pending(
        client_name: impl Into<String>,
        date: NaiveDate,
        range: ChargedRange,
        total: f64,
        created_at: i64,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            date,
            range: range.into_steps(),
            total,
            status: JobStatus::Pending,
            created_at,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }

    /// Shape checks serde cannot express
    pub fn is_well_formed(&self) -> bool {
        !self.client_name.trim().is_empty() && is_valid_price(self.total)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Earnings {
    pub completed_total: f64,
    pub completed_jobs: usize,
    pub pending_total: f64,
    pub pending_jobs: usize,
}

impl Earnings {
    pub fn from_jobs(jobs: &[JobRecord]) -> Self {
        jobs.iter().fold(Self::default(), |mut acc, job| {
            match job.status {
                JobStatus::Completed => {
                    acc.completed_total += job.total;
                    acc.completed_jobs += 1;
                }
                JobStatus::Pending => {
                    acc.pending_total += job.total;
                    acc.pending_jobs += 1;
                }
            }
            acc
        })
    }
}
