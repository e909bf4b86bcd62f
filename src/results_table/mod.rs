pub mod backend;
pub mod scan;

pub use self::backend::{ScanPage, StoreBackend, StoreError};
pub use self::scan::ScanBuilder;

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use log::debug;

use crate::errors::{CheckError, DeleteError, GetError, PutError, UpdateError};
use crate::record::{RunKey, TestRun};

/// A handle to the test-results table. Owns the store connection for the
/// lifetime of the process and is borrowed by every operation.
pub struct ResultsTable<B = aws_sdk_dynamodb::Client> {
    db: B,
    table_name: String,
}

impl<B: StoreBackend> ResultsTable<B> {
    pub fn new(db: B, table_name: impl Into<String>) -> Self {
        Self {
            db,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Writes `run` unconditionally: creates the record if absent,
    /// overwrites it if present.
    pub async fn put(&self, run: &TestRun) -> Result<(), PutError> {
        debug!("put {}/{}", run.date, run.application);

        self.db
            .put_item(&self.table_name, run.to_item())
            .await
            .map_err(|e| PutError::Aws(e.to_string()))
    }

    /// Point lookup by full key.
    pub async fn get(&self, key: &RunKey) -> Result<Option<TestRun>, GetError> {
        debug!("get {}/{}", key.date, key.application);

        let item = self
            .db
            .get_item(&self.table_name, key.to_item())
            .await
            .map_err(|e| GetError::Aws(e.to_string()))?;

        Ok(item.map(TestRun::from_item).transpose()?)
    }

    /// Rewrites the three counters of the record at `run`'s key, leaving the
    /// key fields untouched. Fails with [`UpdateError::NotFound`] when no
    /// record exists at that key; nothing is written in that case.
    pub async fn update(&self, run: &TestRun) -> Result<(), UpdateError> {
        debug!("update {}/{}", run.date, run.application);

        // `date` and `total` are reserved words in DynamoDB expressions and
        // must be referenced through name aliases.
        let names = HashMap::from([
            ("#date".to_string(), "date".to_string()),
            ("#total".to_string(), "total".to_string()),
        ]);
        let values = HashMap::from([
            (
                ":passed".to_string(),
                AttributeValue::N(run.passed.to_string()),
            ),
            (
                ":failed".to_string(),
                AttributeValue::N(run.failed.to_string()),
            ),
            (
                ":total".to_string(),
                AttributeValue::N(run.total.to_string()),
            ),
        ]);

        let result = self
            .db
            .update_item(
                &self.table_name,
                run.key().to_item(),
                "SET passed = :passed, failed = :failed, #total = :total",
                Some("attribute_exists(#date)"),
                names,
                values,
            )
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(StoreError::ConditionFailed) => Err(UpdateError::NotFound),
            Err(e) => Err(UpdateError::Aws(e.to_string())),
        }
    }

    /// Removes the record at `key`. Deleting an absent key is not an error.
    pub async fn delete(&self, key: &RunKey) -> Result<(), DeleteError> {
        debug!("delete {}/{}", key.date, key.application);

        self.db
            .delete_item(&self.table_name, key.to_item())
            .await
            .map_err(|e| DeleteError::Aws(e.to_string()))
    }

    /// Starts building a full-table scan with optional equality filters.
    pub fn scan(&self) -> ScanBuilder<'_, B> {
        ScanBuilder::new(self)
    }

    /// Liveness probe: describes the configured table and returns its status.
    pub async fn check(&self) -> Result<String, CheckError> {
        self.db
            .describe_table(&self.table_name)
            .await
            .map_err(|e| CheckError::Aws(e.to_string()))
    }
}
