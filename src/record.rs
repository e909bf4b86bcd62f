use std::collections::HashMap;
use std::fmt::{self, Display};
use std::fs;
use std::path::Path;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::Deserialize;
use thiserror::Error;

/// Fields that must be present in an input document before it is decoded.
const REQUIRED_FIELDS: [&str; 5] = ["date", "application", "passed", "failed", "total"];

#[derive(Debug, Error)]
pub enum LoadRecordError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

#[derive(Debug, Error)]
pub enum ReadConversionError {
    #[error("Missing attribute: {0}")]
    NoSuchAttribute(String),
    #[error("Failed to convert attribute: {0}")]
    ConversionFailed(String),
}

/// One test-run result. Uniquely keyed by (date, application); the three
/// counters are the only mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestRun {
    pub date: String,
    pub application: String,
    pub passed: u32,
    pub failed: u32,
    pub total: u32,
}

/// The (date, application) composite key addressing a single [`TestRun`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunKey {
    pub date: String,
    pub application: String,
}

impl RunKey {
    pub fn new(date: impl Into<String>, application: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            application: application.into(),
        }
    }

    pub fn to_item(&self) -> HashMap<String, AttributeValue> {
        let mut key = HashMap::new();
        key.insert("date".to_string(), AttributeValue::S(self.date.clone()));
        key.insert(
            "application".to_string(),
            AttributeValue::S(self.application.clone()),
        );
        key
    }
}

impl TestRun {
    pub fn new(
        date: impl Into<String>,
        application: impl Into<String>,
        passed: u32,
        failed: u32,
        total: u32,
    ) -> Self {
        Self {
            date: date.into(),
            application: application.into(),
            passed,
            failed,
            total,
        }
    }

    pub fn key(&self) -> RunKey {
        RunKey::new(self.date.clone(), self.application.clone())
    }

    /// Reads a JSON document from `path` and decodes it into a `TestRun`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadRecordError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Decodes a JSON document, checking for all required fields up front so
    /// a single error names every missing field. Unknown fields are ignored.
    pub fn from_json_str(data: &str) -> Result<Self, LoadRecordError> {
        let value: serde_json::Value = serde_json::from_str(data)?;

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .filter(|field| value.get(**field).is_none())
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(LoadRecordError::MissingFields(missing));
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn to_item(&self) -> HashMap<String, AttributeValue> {
        let mut item = self.key().to_item();
        item.insert(
            "passed".to_string(),
            AttributeValue::N(self.passed.to_string()),
        );
        item.insert(
            "failed".to_string(),
            AttributeValue::N(self.failed.to_string()),
        );
        item.insert(
            "total".to_string(),
            AttributeValue::N(self.total.to_string()),
        );
        item
    }

    pub fn from_item(item: HashMap<String, AttributeValue>) -> Result<Self, ReadConversionError> {
        Ok(Self {
            date: take_string(&item, "date")?,
            application: take_string(&item, "application")?,
            passed: take_counter(&item, "passed")?,
            failed: take_counter(&item, "failed")?,
            total: take_counter(&item, "total")?,
        })
    }
}

impl Display for TestRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "date={} application={} passed={} failed={} total={}",
            self.date, self.application, self.passed, self.failed, self.total
        )
    }
}

fn take_string(
    item: &HashMap<String, AttributeValue>,
    name: &str,
) -> Result<String, ReadConversionError> {
    item.get(name)
        .ok_or_else(|| ReadConversionError::NoSuchAttribute(name.to_string()))?
        .as_s()
        .map(|s| s.to_string())
        .map_err(|_| ReadConversionError::ConversionFailed(name.to_string()))
}

fn take_counter(
    item: &HashMap<String, AttributeValue>,
    name: &str,
) -> Result<u32, ReadConversionError> {
    item.get(name)
        .ok_or_else(|| ReadConversionError::NoSuchAttribute(name.to_string()))?
        .as_n()
        .ok()
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| ReadConversionError::ConversionFailed(name.to_string()))
}
