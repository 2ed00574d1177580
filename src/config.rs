use std::env;

use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    /// Append-only CSV log of evaluated requests.
    pub dataset_path: String,
    /// Optional JSON holiday calendar; the built-in table is used when unset.
    pub holidays_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            dataset_path: env::var("DATASET_PATH")
                .unwrap_or_else(|_| "dataset/leave_requests.csv".to_string()),
            holidays_file: env::var("HOLIDAYS_FILE").ok(),
        }
    }
}
