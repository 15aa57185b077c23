//! Settlement callback handler (bank webhook)
//!
//! Untrusted, at-least-once input. A 2xx tells the bank to stop
//! redelivering; a 5xx tells it to retry the whole callback. Validation
//! failures are 4xx: redelivery cannot fix them.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::ApiResult;
use crate::error::WalletError;
use crate::money;
use crate::onramp::{CallbackOutcome, CallbackResolution, OnRampService};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SettlementCallback {
    /// Settlement token we issued at initiation
    pub token: String,
    /// Account the bank believes it collected for
    pub account_id: i64,
    /// Amount in integer paise
    pub amount: i64,
    /// "Success" or "Failed"
    pub outcome: CallbackOutcome,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettlementAck {
    pub processed: bool,
    pub duplicate: bool,
}

/// Bank settlement callback
///
/// POST /api/v1/onramp/callback
#[utoipa::path(
    post,
    path = "/api/v1/onramp/callback",
    request_body = SettlementCallback,
    responses(
        (status = 200, description = "Processed or duplicate, stop redelivering"),
        (status = 400, description = "Callback does not match the transaction, do not retry"),
        (status = 404, description = "Unknown token, do not retry"),
        (status = 500, description = "Transient failure, redeliver")
    ),
    tag = "OnRamp"
)]
pub async fn settlement_callback(
    State(state): State<Arc<AppState>>,
    Json(cb): Json<SettlementCallback>,
) -> ApiResult<SettlementAck> {
    money::validate_paise(cb.amount).map_err(WalletError::from)?;

    let max_retries = state.config.wallet.max_storage_retries;

    // Nothing partial survives an aborted unit of work, so the whole
    // callback is safe to retry internally on transient storage errors.
    let resolution = crate::error::retry_transient(max_retries.max(1), || {
        OnRampService::handle_callback(
            state.db.pool(),
            &cb.token,
            cb.account_id,
            cb.amount,
            cb.outcome,
        )
    })
    .await?;

    super::super::types::ok(SettlementAck {
        processed: matches!(
            resolution,
            CallbackResolution::Credited | CallbackResolution::MarkedFailed
        ),
        duplicate: resolution == CallbackResolution::Duplicate,
    })
}
