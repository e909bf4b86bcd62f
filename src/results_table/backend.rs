use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use thiserror::Error;

/// Failure signaled by a [`StoreBackend`] operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request carried a condition expression that did not hold.
    #[error("condition check failed")]
    ConditionFailed,
    #[error("{0}")]
    Aws(String),
}

/// One page of scan results. `truncated` is set when the store reported
/// more data beyond this page.
#[derive(Debug, Default)]
pub struct ScanPage {
    pub items: Vec<HashMap<String, AttributeValue>>,
    pub truncated: bool,
}

/// The store operations this crate consumes, kept minimal and close to the
/// real `aws_sdk_dynamodb::Client` so it can be swapped with a mock backend
/// for testing.
#[async_trait]
pub trait StoreBackend {
    async fn put_item(
        &self,
        table_name: &str,
        item: HashMap<String, AttributeValue>,
    ) -> Result<(), StoreError>;

    async fn get_item(
        &self,
        table_name: &str,
        key: HashMap<String, AttributeValue>,
    ) -> Result<Option<HashMap<String, AttributeValue>>, StoreError>;

    async fn delete_item(
        &self,
        table_name: &str,
        key: HashMap<String, AttributeValue>,
    ) -> Result<(), StoreError>;

    async fn update_item(
        &self,
        table_name: &str,
        key: HashMap<String, AttributeValue>,
        update_expression: &str,
        condition_expression: Option<&str>,
        names: HashMap<String, String>,
        values: HashMap<String, AttributeValue>,
    ) -> Result<(), StoreError>;

    async fn scan(
        &self,
        table_name: &str,
        filter_expression: Option<String>,
        names: HashMap<String, String>,
        values: HashMap<String, AttributeValue>,
    ) -> Result<ScanPage, StoreError>;

    async fn describe_table(&self, table_name: &str) -> Result<String, StoreError>;
}

#[async_trait]
impl StoreBackend for Client {
    async fn put_item(
        &self,
        table_name: &str,
        item: HashMap<String, AttributeValue>,
    ) -> Result<(), StoreError> {
        self.put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::Aws(e.to_string()))?;

        Ok(())
    }

    async fn get_item(
        &self,
        table_name: &str,
        key: HashMap<String, AttributeValue>,
    ) -> Result<Option<HashMap<String, AttributeValue>>, StoreError> {
        let result = self
            .get_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| StoreError::Aws(e.to_string()))?;

        Ok(result.item)
    }

    async fn delete_item(
        &self,
        table_name: &str,
        key: HashMap<String, AttributeValue>,
    ) -> Result<(), StoreError> {
        self.delete_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| StoreError::Aws(e.to_string()))?;

        Ok(())
    }

    async fn update_item(
        &self,
        table_name: &str,
        key: HashMap<String, AttributeValue>,
        update_expression: &str,
        condition_expression: Option<&str>,
        names: HashMap<String, String>,
        values: HashMap<String, AttributeValue>,
    ) -> Result<(), StoreError> {
        let result = self
            .update_item()
            .table_name(table_name)
            .set_key(Some(key))
            .update_expression(update_expression)
            .set_condition_expression(condition_expression.map(String::from))
            .set_expression_attribute_names((!names.is_empty()).then_some(names))
            .set_expression_attribute_values((!values.is_empty()).then_some(values))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception()) =>
            {
                Err(StoreError::ConditionFailed)
            }
            Err(e) => Err(StoreError::Aws(e.to_string())),
        }
    }

    async fn scan(
        &self,
        table_name: &str,
        filter_expression: Option<String>,
        names: HashMap<String, String>,
        values: HashMap<String, AttributeValue>,
    ) -> Result<ScanPage, StoreError> {
        let result = self
            .scan()
            .table_name(table_name)
            .set_filter_expression(filter_expression)
            .set_expression_attribute_names((!names.is_empty()).then_some(names))
            .set_expression_attribute_values((!values.is_empty()).then_some(values))
            .send()
            .await
            .map_err(|e| StoreError::Aws(e.to_string()))?;

        Ok(ScanPage {
            truncated: result.last_evaluated_key.is_some(),
            items: result.items.unwrap_or_default(),
        })
    }

    async fn describe_table(&self, table_name: &str) -> Result<String, StoreError> {
        let result = self
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| StoreError::Aws(e.to_string()))?;

        let status = result
            .table
            .and_then(|table| table.table_status)
            .map(|status| status.as_str().to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string());

        Ok(status)
    }
}
