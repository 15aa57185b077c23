//! On-ramp (deposit) settlement protocol

pub mod bank_client;
pub mod models;
pub mod service;

pub use bank_client::{BankClient, BankError, CreateSessionRequest, HttpBankClient, PaymentSession};
#[cfg(feature = "mock-bank")]
pub use bank_client::MockBankClient;
pub use models::{CallbackOutcome, CallbackResolution, OnRampStatus, OnRampTransaction};
pub use service::{InitiatedOnRamp, OnRampService};
