use std::env;
use std::io;

use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::Client;
use log::info;

use results_shell::{ResultsTable, Session};

const DEFAULT_ENDPOINT_URL: &str = "http://localhost:4566";
const DEFAULT_TABLE_NAME: &str = "ApplicationTestResults";

// The store accepts any static credential pair when running locally; these
// placeholders apply when the standard AWS variables are unset.
const FALLBACK_ACCESS_KEY: &str = "accessKey";
const FALLBACK_SECRET_KEY: &str = "secretKey";

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let endpoint_url = env_or("RESULTS_ENDPOINT_URL", DEFAULT_ENDPOINT_URL);
    let table_name = env_or("RESULTS_TABLE_NAME", DEFAULT_TABLE_NAME);
    let access_key = env_or("AWS_ACCESS_KEY_ID", FALLBACK_ACCESS_KEY);
    let secret_key = env_or("AWS_SECRET_ACCESS_KEY", FALLBACK_SECRET_KEY);

    let config = aws_config::from_env()
        .endpoint_url(&endpoint_url)
        .region(aws_config::Region::new("us-east-1"))
        .credentials_provider(Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "results-shell",
        ))
        .load()
        .await;

    let client = Client::new(&config);
    let table = ResultsTable::new(client, table_name);
    info!(
        "using endpoint {endpoint_url}, table {}",
        table.table_name()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&table, stdin.lock(), stdout.lock());
    session.run().await
}
