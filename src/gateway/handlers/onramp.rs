//! On-ramp initiation and status handlers

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::AuthenticatedAccount;
use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ok};
use crate::money;
use crate::onramp::OnRampService;

#[derive(Debug, Deserialize, ToSchema)]
pub struct OnRampRequest {
    /// Decimal amount string, e.g. "500.00"
    #[schema(example = "500.00")]
    pub amount: String,
    /// Bank provider, must be in the allowed set
    pub provider: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OnRampResponse {
    pub onramp_id: String,
    /// Where to redirect the end user to pay
    pub payment_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OnRampStatusResponse {
    pub onramp_id: String,
    pub status: String,
    pub amount: String,
    pub provider: String,
}

/// Initiate a deposit
///
/// POST /api/v1/onramp
#[utoipa::path(
    post,
    path = "/api/v1/onramp",
    request_body = OnRampRequest,
    responses(
        (status = 200, description = "Payment session created"),
        (status = 400, description = "Amount out of bounds or unknown provider"),
        (status = 401, description = "Missing account identity"),
        (status = 503, description = "Bank unreachable, retry later")
    ),
    tag = "OnRamp"
)]
pub async fn initiate_onramp(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<AuthenticatedAccount>,
    Json(req): Json<OnRampRequest>,
) -> ApiResult<OnRampResponse> {
    let amount = money::parse_amount(&req.amount).map_err(crate::error::WalletError::from)?;

    let initiated = OnRampService::initiate(
        state.db.pool(),
        &state.config.wallet,
        &state.config.bank,
        state.bank.as_ref(),
        account.account_id,
        amount,
        &req.provider,
    )
    .await?;

    ok(OnRampResponse {
        onramp_id: initiated.onramp_id,
        payment_url: initiated.payment_url,
    })
}

/// Get on-ramp transaction status
///
/// GET /api/v1/onramp/{onramp_id}
#[utoipa::path(
    get,
    path = "/api/v1/onramp/{onramp_id}",
    params(
        ("onramp_id" = String, Path, description = "On-ramp transaction ID (ULID format)")
    ),
    responses(
        (status = 200, description = "On-ramp transaction status"),
        (status = 404, description = "Transaction not found")
    ),
    tag = "OnRamp"
)]
pub async fn get_onramp(
    State(state): State<Arc<AppState>>,
    Path(onramp_id): Path<String>,
) -> ApiResult<OnRampStatusResponse> {
    match OnRampService::get(state.db.pool(), &onramp_id).await? {
        Some(tx) => ok(OnRampStatusResponse {
            onramp_id: tx.onramp_id,
            status: tx.status.as_str().to_string(),
            amount: money::format_amount(tx.amount as u64),
            provider: tx.provider,
        }),
        None => ApiError::not_found("onramp transaction not found").into_err(),
    }
}
