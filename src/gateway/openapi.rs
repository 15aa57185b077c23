//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::{
    BalanceResponse, HealthResponse, LedgerEntryView, LedgerPageResponse, OnRampRequest,
    OnRampResponse, OnRampStatusResponse, P2pTransferRequest, P2pTransferResponse, SettlementAck,
    SettlementCallback,
};
use crate::ledger::{Direction, TxType};
use crate::onramp::{CallbackOutcome, OnRampStatus};

/// Trusted-header identity security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "account_header",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-Account-Id",
                    "Account id forwarded by the authenticating front door",
                ))),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PayWallet API",
        version = "1.0.0",
        description = "Custodial wallet: P2P transfers, bank on-ramp, append-only ledger.",
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::p2p::create_p2p_transfer,
        crate::gateway::handlers::p2p::get_p2p_transfer,
        crate::gateway::handlers::onramp::initiate_onramp,
        crate::gateway::handlers::onramp::get_onramp,
        crate::gateway::handlers::webhook::settlement_callback,
        crate::gateway::handlers::balance::get_balance,
        crate::gateway::handlers::ledger::get_ledger,
        crate::gateway::handlers::ledger::get_latest_entry,
    ),
    components(
        schemas(
            HealthResponse,
            BalanceResponse,
            P2pTransferRequest,
            P2pTransferResponse,
            OnRampRequest,
            OnRampResponse,
            OnRampStatusResponse,
            SettlementCallback,
            SettlementAck,
            LedgerEntryView,
            LedgerPageResponse,
            Direction,
            TxType,
            OnRampStatus,
            CallbackOutcome,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "Health and build info"),
        (name = "Transfers", description = "P2P transfers between wallets"),
        (name = "OnRamp", description = "Bank deposits and settlement callbacks"),
        (name = "Balance", description = "Balance queries"),
        (name = "Ledger", description = "Append-only transaction history"),
    )
)]
pub struct ApiDoc;
