use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use results_shell::{ScanPage, StoreBackend, StoreError, TestRun};

/// Per-operation call counters: the spy that verifies invalid input never
/// reaches the store.
#[derive(Debug, Default, Clone)]
pub struct CallCounts {
    pub put: usize,
    pub get: usize,
    pub delete: usize,
    pub update: usize,
    pub scan: usize,
    pub describe: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.put + self.get + self.delete + self.update + self.scan + self.describe
    }
}

#[derive(Debug)]
struct State {
    items: BTreeMap<(String, String), HashMap<String, AttributeValue>>,
    calls: CallCounts,
    table_status: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            calls: CallCounts::default(),
            table_status: "ACTIVE".to_string(),
        }
    }
}

/// In-memory stand-in for the real store, keyed by (date, application) like
/// the table itself. Clones share state, so a test can keep one handle while
/// the table under test owns another.
#[derive(Debug, Default, Clone)]
pub struct MockBackend {
    state: Arc<Mutex<State>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> CallCounts {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn record_count(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    /// Inserts a record directly, bypassing the table API and its counters.
    pub fn seed(&self, run: &TestRun) {
        let mut state = self.state.lock().unwrap();
        state
            .items
            .insert((run.date.clone(), run.application.clone()), run.to_item());
    }

    /// Reads a record directly, bypassing the table API and its counters.
    pub fn stored(&self, date: &str, application: &str) -> Option<TestRun> {
        let state = self.state.lock().unwrap();
        state
            .items
            .get(&(date.to_string(), application.to_string()))
            .cloned()
            .map(|item| TestRun::from_item(item).expect("mock held an undecodable item"))
    }
}

fn string_attr(map: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    map.get(name).and_then(|v| v.as_s().ok()).cloned()
}

fn key_of(map: &HashMap<String, AttributeValue>) -> (String, String) {
    (
        string_attr(map, "date").unwrap_or_default(),
        string_attr(map, "application").unwrap_or_default(),
    )
}

#[async_trait]
impl StoreBackend for MockBackend {
    async fn put_item(
        &self,
        _table_name: &str,
        item: HashMap<String, AttributeValue>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.put += 1;
        state.items.insert(key_of(&item), item);
        Ok(())
    }

    async fn get_item(
        &self,
        _table_name: &str,
        key: HashMap<String, AttributeValue>,
    ) -> Result<Option<HashMap<String, AttributeValue>>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.get += 1;
        Ok(state.items.get(&key_of(&key)).cloned())
    }

    async fn delete_item(
        &self,
        _table_name: &str,
        key: HashMap<String, AttributeValue>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.delete += 1;
        state.items.remove(&key_of(&key));
        Ok(())
    }

    async fn update_item(
        &self,
        _table_name: &str,
        key: HashMap<String, AttributeValue>,
        _update_expression: &str,
        condition_expression: Option<&str>,
        _names: HashMap<String, String>,
        values: HashMap<String, AttributeValue>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.update += 1;

        let item_key = key_of(&key);
        if condition_expression.is_some() && !state.items.contains_key(&item_key) {
            return Err(StoreError::ConditionFailed);
        }

        let entry = state.items.entry(item_key).or_insert_with(|| key.clone());
        for (placeholder, attribute) in [(":passed", "passed"), (":failed", "failed"), (":total", "total")]
        {
            if let Some(value) = values.get(placeholder) {
                entry.insert(attribute.to_string(), value.clone());
            }
        }

        Ok(())
    }

    async fn scan(
        &self,
        _table_name: &str,
        _filter_expression: Option<String>,
        _names: HashMap<String, String>,
        values: HashMap<String, AttributeValue>,
    ) -> Result<ScanPage, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.scan += 1;

        let date = values.get(":date").and_then(|v| v.as_s().ok()).cloned();
        let application = values
            .get(":application")
            .and_then(|v| v.as_s().ok())
            .cloned();

        let items = state
            .items
            .values()
            .filter(|item| match &date {
                Some(date) => string_attr(item, "date").as_ref() == Some(date),
                None => true,
            })
            .filter(|item| match &application {
                Some(application) => string_attr(item, "application").as_ref() == Some(application),
                None => true,
            })
            .cloned()
            .collect();

        Ok(ScanPage {
            items,
            truncated: false,
        })
    }

    async fn describe_table(&self, _table_name: &str) -> Result<String, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.describe += 1;
        Ok(state.table_status.clone())
    }
}
