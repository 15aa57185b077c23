//! PostgreSQL schema bootstrap
//!
//! All amounts are BIGINT integer paise. Ledger rows are append-only;
//! there is deliberately no UPDATE path for `ledger_entries`.

use anyhow::Result;
use sqlx::PgPool;

const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    account_id   BIGSERIAL PRIMARY KEY,
    phone_number VARCHAR(15) NOT NULL UNIQUE,
    email        VARCHAR(255) NOT NULL UNIQUE,
    name         VARCHAR(255) NOT NULL DEFAULT '',
    status       SMALLINT NOT NULL DEFAULT 1,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_BALANCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS balances (
    account_id BIGINT PRIMARY KEY REFERENCES accounts(account_id),
    available  BIGINT NOT NULL DEFAULT 0 CHECK (available >= 0),
    locked     BIGINT NOT NULL DEFAULT 0 CHECK (locked >= 0),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_LEDGER_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ledger_entries (
    entry_id   BIGSERIAL PRIMARY KEY,
    account_id BIGINT NOT NULL REFERENCES accounts(account_id),
    amount     BIGINT NOT NULL CHECK (amount > 0),
    direction  VARCHAR(6) NOT NULL CHECK (direction IN ('CREDIT', 'DEBIT')),
    tx_type    VARCHAR(16) NOT NULL CHECK (tx_type IN ('ONRAMP', 'P2P_TRANSFER')),
    tx_ref     VARCHAR(32) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_LEDGER_ENTRIES_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_ledger_entries_account
    ON ledger_entries (account_id, created_at DESC)
"#;

const CREATE_P2P_TRANSFERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS p2p_transfers (
    transfer_id VARCHAR(32) PRIMARY KEY,
    sender_id   BIGINT NOT NULL REFERENCES accounts(account_id),
    receiver_id BIGINT NOT NULL REFERENCES accounts(account_id),
    amount      BIGINT NOT NULL CHECK (amount > 0),
    status      VARCHAR(10) NOT NULL CHECK (status IN ('PENDING', 'COMPLETED', 'FAILED', 'BLOCKED')),
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_ONRAMP_TRANSACTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS onramp_transactions (
    onramp_id  VARCHAR(32) PRIMARY KEY,
    account_id BIGINT NOT NULL REFERENCES accounts(account_id),
    amount     BIGINT NOT NULL CHECK (amount > 0),
    provider   VARCHAR(64) NOT NULL,
    token      VARCHAR(64) NOT NULL UNIQUE,
    status     VARCHAR(10) NOT NULL DEFAULT 'Processing'
               CHECK (status IN ('Processing', 'Success', 'Failed')),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_TRANSACTION_INTENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transaction_intents (
    intent_id   BIGSERIAL PRIMARY KEY,
    sender_id   BIGINT NOT NULL REFERENCES accounts(account_id),
    receiver_id BIGINT NOT NULL REFERENCES accounts(account_id),
    amount      BIGINT NOT NULL CHECK (amount > 0),
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_TRANSACTION_DECISIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transaction_decisions (
    decision_id BIGSERIAL PRIMARY KEY,
    intent_id   BIGINT NOT NULL REFERENCES transaction_intents(intent_id),
    decision    VARCHAR(10) NOT NULL CHECK (decision IN ('APPROVED', 'BLOCKED')),
    reason      VARCHAR(255) NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Create all wallet tables if they do not exist.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    tracing::info!("Initializing wallet schema...");

    for (name, ddl) in [
        ("accounts", CREATE_ACCOUNTS_TABLE),
        ("balances", CREATE_BALANCES_TABLE),
        ("ledger_entries", CREATE_LEDGER_ENTRIES_TABLE),
        ("ledger_entries index", CREATE_LEDGER_ENTRIES_INDEX),
        ("p2p_transfers", CREATE_P2P_TRANSFERS_TABLE),
        ("onramp_transactions", CREATE_ONRAMP_TRANSACTIONS_TABLE),
        ("transaction_intents", CREATE_TRANSACTION_INTENTS_TABLE),
        ("transaction_decisions", CREATE_TRANSACTION_DECISIONS_TABLE),
    ] {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", name, e))?;
    }

    tracing::info!("Wallet schema initialized successfully");
    Ok(())
}
