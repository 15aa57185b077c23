//! PayWallet - custodial wallet service
//!
//! Entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌───────────┐    ┌──────────┐
//! │ Gateway  │───▶│  Engine  │───▶│ Postgres  │    │   Bank   │
//! │ (axum)   │    │(FOR UPD.)│    │(bal+ledgr)│◀──▶│(sessions)│
//! └──────────┘    └──────────┘    └───────────┘    └──────────┘
//! ```
//!
//! Engine responsibilities:
//! - Row-locked balance mutations, smallest-account-id first
//! - Ledger append in the same transaction as the balance change
//! - Idempotent settlement keyed by the on-ramp token

use std::sync::Arc;

use paywallet::config::AppConfig;
use paywallet::db::{Database, schema};
use paywallet::gateway::{self, state::AppState};
use paywallet::onramp::{BankClient, HttpBankClient};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn build_bank_client(config: &AppConfig) -> Arc<dyn BankClient> {
    #[cfg(feature = "mock-bank")]
    if config.bank.use_mock {
        println!("🏦 Bank client: in-process mock");
        return Arc::new(paywallet::onramp::MockBankClient::new(&config.bank));
    }

    println!("🏦 Bank client: HTTP ({})", config.bank.base_url);
    match HttpBankClient::new(&config.bank) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("❌ FATAL: Failed to build bank client: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let env = get_env();
    let app_config = AppConfig::load(&env);
    let _log_guard = paywallet::logging::init_logging(&app_config);

    tracing::info!("Starting PayWallet in {} env", env);

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    let host = app_config.gateway.host.clone();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        println!("\n[1] Connecting to PostgreSQL...");
        let db = match Database::connect(&app_config.postgres_url).await {
            Ok(db) => {
                println!("✅ PostgreSQL connected");
                Arc::new(db)
            }
            Err(e) => {
                eprintln!("❌ FATAL: Failed to connect to PostgreSQL: {}", e);
                std::process::exit(1);
            }
        };

        println!("\n[2] Initializing schema...");
        if let Err(e) = schema::init_schema(db.pool()).await {
            eprintln!("❌ FATAL: Failed to initialize schema: {}", e);
            std::process::exit(1);
        }
        println!("✅ Schema ready");

        let bank = build_bank_client(&app_config);

        let state = Arc::new(AppState::new(db, Arc::new(app_config), bank));

        println!("\n[3] Starting gateway...");
        gateway::run_server(state, &host, port).await;
    });
}
