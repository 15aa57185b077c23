//! P2P transfer handlers

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
use crate::p2p::{P2pService, TransferId};

#[derive(Debug, Deserialize, ToSchema)]
pub struct P2pTransferRequest {
    /// Receiver's phone number
    pub receiver_phone: String,
    /// Decimal amount string, e.g. "150.50"
    #[schema(example = "150.50")]
    pub amount: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct P2pTransferResponse {
    pub transfer_id: String,
    pub status: String,
    /// Amount echoed back, human readable ("50.00")
    pub amount: String,
}

/// Create P2P transfer endpoint
///
/// POST /api/v1/transfers/p2p
#[utoipa::path(
    post,
    path = "/api/v1/transfers/p2p",
    request_body = P2pTransferRequest,
    responses(
        (status = 200, description = "Transfer completed"),
        (status = 400, description = "Invalid parameters or insufficient balance"),
        (status = 401, description = "Missing account identity"),
        (status = 404, description = "Receiver not found"),
        (status = 409, description = "Self-transfer or risk-blocked")
    ),
    tag = "Transfers"
)]
pub async fn create_p2p_transfer(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<AuthenticatedAccount>,
    Json(req): Json<P2pTransferRequest>,
) -> ApiResult<P2pTransferResponse> {
    let phone = req.receiver_phone.trim();
    if phone.is_empty() {
        return ApiError::bad_request("receiver_phone cannot be empty").into_err();
    }
    let amount = money::parse_amount(&req.amount).map_err(crate::error::WalletError::from)?;

    let transfer = P2pService::execute(
        state.db.pool(),
        &state.config.wallet,
        account.account_id,
        phone,
        amount,
    )
    .await?;

    ok(P2pTransferResponse {
        transfer_id: transfer.transfer_id,
        status: transfer.status.as_str().to_string(),
        amount: money::format_amount(transfer.amount as u64),
    })
}

/// Get transfer status endpoint
///
/// GET /api/v1/transfers/p2p/{transfer_id}
#[utoipa::path(
    get,
    path = "/api/v1/transfers/p2p/{transfer_id}",
    params(
        ("transfer_id" = String, Path, description = "Transfer ID (ULID format)")
    ),
    responses(
        (status = 200, description = "Transfer status"),
        (status = 400, description = "Invalid transfer ID format"),
        (status = 404, description = "Transfer not found")
    ),
    tag = "Transfers"
)]
pub async fn get_p2p_transfer(
    State(state): State<Arc<AppState>>,
    Path(transfer_id_str): Path<String>,
) -> ApiResult<P2pTransferResponse> {
    let transfer_id: TransferId = transfer_id_str
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid transfer ID format"))?;

    match P2pService::get(state.db.pool(), &transfer_id).await? {
        Some(transfer) => ok(P2pTransferResponse {
            transfer_id: transfer.transfer_id,
            status: transfer.status.as_str().to_string(),
            amount: money::format_amount(transfer.amount as u64),
        }),
        None => ApiError::not_found("transfer not found").into_err(),
    }
}
