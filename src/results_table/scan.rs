use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use itertools::Itertools;
use log::warn;

use super::{ResultsTable, StoreBackend};
use crate::errors::ScanError;
use crate::record::TestRun;

/// Builds the List read path: a full-table scan with zero, one, or two
/// equality filters combined with AND.
pub struct ScanBuilder<'t, B> {
    table: &'t ResultsTable<B>,
    date: Option<String>,
    application: Option<String>,
}

impl<'t, B: StoreBackend> ScanBuilder<'t, B> {
    pub(crate) fn new(table: &'t ResultsTable<B>) -> Self {
        Self {
            table,
            date: None,
            application: None,
        }
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    /// Issues the scan and decodes every matching record. Only the first
    /// page returned by the store is surfaced; a truncated result set is
    /// logged so the limitation is visible to the operator.
    pub async fn send(self) -> Result<Vec<TestRun>, ScanError> {
        let (filter, names, values) = build_filter(self.date.as_deref(), self.application.as_deref());

        let page = self
            .table
            .db
            .scan(&self.table.table_name, filter, names, values)
            .await
            .map_err(|e| ScanError::Aws(e.to_string()))?;

        if page.truncated {
            warn!("scan returned a truncated result set; further pages were not fetched");
        }

        page.items
            .into_iter()
            .map(TestRun::from_item)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ScanError::from)
    }
}

/// Assembles the filter expression with its name aliases and placeholder
/// values. `date` is a reserved word in DynamoDB expressions and goes
/// through the `#date` alias; `application` is used directly.
fn build_filter(
    date: Option<&str>,
    application: Option<&str>,
) -> (
    Option<String>,
    HashMap<String, String>,
    HashMap<String, AttributeValue>,
) {
    let mut parts = Vec::new();
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    if let Some(date) = date {
        parts.push("#date = :date");
        names.insert("#date".to_string(), "date".to_string());
        values.insert(":date".to_string(), AttributeValue::S(date.to_string()));
    }

    if let Some(application) = application {
        parts.push("application = :application");
        values.insert(
            ":application".to_string(),
            AttributeValue::S(application.to_string()),
        );
    }

    let filter = (!parts.is_empty()).then(|| parts.iter().join(" AND "));

    (filter, names, values)
}
