//! Veritas Radix API server
//!
//! Starts the HTTP server for etymology analysis and search history.

use radix_api::{config::ApiConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        // Load from specified config file
        let config_path = &args[2];
        ApiConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        // Use default test configuration
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: radix-api --config <path-to-config.toml>");
        eprintln!();
        ApiConfig::default_test_config()
    };

    // Start the server
    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Veritas Radix API - Etymology Analysis Backend");
    println!();
    println!("USAGE:");
    println!("    radix-api --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    radix-api --config config/api.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8080)");
    println!("    - database_path: SQLite database path (e.g., 'radix.db')");
    println!("    - [gemini] api_key/model/endpoint: Generative API settings");
    println!("      (GEMINI_API_KEY in the environment overrides api_key)");
    println!("    - [analyzer] max_word_length, analysis_timeout_secs");
    println!();
}
