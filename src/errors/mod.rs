use thiserror::Error;

pub use crate::record::{LoadRecordError, ReadConversionError};
pub use crate::results_table::backend::StoreError;

/// Error returned by [`ResultsTable::put`](crate::ResultsTable::put) when
/// writing a record to DynamoDB
#[derive(Error, Debug)]
pub enum PutError {
    #[error("AwsError: {0}")]
    Aws(String),
}

/// Error returned by [`ResultsTable::get`](crate::ResultsTable::get) when
/// retrieving a record from DynamoDB
#[derive(Error, Debug)]
pub enum GetError {
    #[error("AwsError: {0}")]
    Aws(String),
    #[error("Read Conversion Error: {0}")]
    ReadConversion(#[from] ReadConversionError),
}

/// Error returned by [`ResultsTable::update`](crate::ResultsTable::update)
/// when rewriting the counters of an existing record
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("no record exists for that key")]
    NotFound,
    #[error("AwsError: {0}")]
    Aws(String),
}

/// Error returned by [`ResultsTable::delete`](crate::ResultsTable::delete)
/// when removing a record from DynamoDB
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("AwsError: {0}")]
    Aws(String),
}

/// Error returned by [`ScanBuilder::send`](crate::ScanBuilder::send) when
/// listing records from DynamoDB
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("AwsError: {0}")]
    Aws(String),
    #[error("Read Conversion Error: {0}")]
    ReadConversion(#[from] ReadConversionError),
}

/// Error returned by [`ResultsTable::check`](crate::ResultsTable::check)
/// when probing table availability
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("AwsError: {0}")]
    Aws(String),
}

/// Error abstracting all errors returned by `results-shell`.
///
/// If you use this error you can use `?` to convert from the other
/// `results-shell` errors to this one.
#[derive(Error, Debug)]
pub enum Error {
    #[error("LoadRecordError: {0}")]
    LoadRecord(#[from] LoadRecordError),
    #[error("PutError: {0}")]
    Put(#[from] PutError),
    #[error("GetError: {0}")]
    Get(#[from] GetError),
    #[error("UpdateError: {0}")]
    Update(#[from] UpdateError),
    #[error("DeleteError: {0}")]
    Delete(#[from] DeleteError),
    #[error("ScanError: {0}")]
    Scan(#[from] ScanError),
    #[error("CheckError: {0}")]
    Check(#[from] CheckError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_umbrella_conversion() {
        fn run() -> Result<(), Error> {
            Err(PutError::Aws("host unreachable".to_string()))?;
            Ok(())
        }

        assert_eq!(
            run().unwrap_err().to_string(),
            "PutError: AwsError: host unreachable"
        );
    }
}
