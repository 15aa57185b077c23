//! HTTP handlers, grouped by resource

pub mod balance;
pub mod health;
pub mod ledger;
pub mod onramp;
pub mod p2p;
pub mod webhook;

pub use balance::{BalanceResponse, get_balance};
pub use health::{HealthResponse, health_check};
pub use ledger::{
    LedgerEntryView, LedgerPageResponse, LedgerQuery, get_latest_entry, get_ledger,
};
pub use onramp::{
    OnRampRequest, OnRampResponse, OnRampStatusResponse, get_onramp, initiate_onramp,
};
pub use p2p::{P2pTransferRequest, P2pTransferResponse, create_p2p_transfer, get_p2p_transfer};
pub use webhook::{SettlementAck, SettlementCallback, settlement_callback};
