//! Peer-to-peer transfer protocol

pub mod models;
pub mod service;

pub use models::{P2pTransfer, TransferId, TransferStatus};
pub use service::P2pService;
