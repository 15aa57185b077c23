//! Balance query handler

use std::sync::Arc;

use axum::{Extension, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use super::super::AuthenticatedAccount;
use super::super::state::AppState;
use super::super::types::{ApiResult, ok};
use crate::engine::TransferEngine;
use crate::error::WalletError;
use crate::money;

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    /// Spendable, human readable ("150.50")
    pub available: String,
    /// Reserved by in-flight transfers
    pub locked: String,
    /// available + locked
    pub total: String,
}

/// Get current balance
///
/// GET /api/v1/balance
#[utoipa::path(
    get,
    path = "/api/v1/balance",
    responses(
        (status = 200, description = "Current available and locked balance"),
        (status = 401, description = "Missing account identity"),
        (status = 404, description = "No wallet for this account")
    ),
    tag = "Balance"
)]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<AuthenticatedAccount>,
) -> ApiResult<BalanceResponse> {
    let mut conn = state
        .db
        .pool()
        .acquire()
        .await
        .map_err(WalletError::from)?;
    let balance = TransferEngine::read_balance(&mut conn, account.account_id).await?;

    let total = balance
        .total()
        .ok_or_else(|| WalletError::invariant("balance total overflow"))?;

    ok(BalanceResponse {
        available: money::format_amount(balance.available()),
        locked: money::format_amount(balance.locked()),
        total: money::format_amount(total),
    })
}
