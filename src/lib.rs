pub mod errors;
pub mod record;
pub mod results_table;
pub mod session;

pub use errors::Error;
pub use record::{RunKey, TestRun};
pub use results_table::{ResultsTable, ScanBuilder, ScanPage, StoreBackend, StoreError};
pub use session::{Command, Session};
