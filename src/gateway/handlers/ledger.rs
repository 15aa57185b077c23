//! Ledger history handlers

use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::super::AuthenticatedAccount;
use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ok};
use crate::ledger::{LedgerEntry, LedgerStore};
use crate::money;

const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize, IntoParams)]
pub struct LedgerQuery {
    /// 1-based page number, default 1
    pub page: Option<u32>,
    /// Entries per page, default 20, max 100
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LedgerEntryView {
    pub entry_id: i64,
    pub amount: String,
    pub direction: String,
    pub tx_type: String,
    pub tx_ref: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LedgerPageResponse {
    pub entries: Vec<LedgerEntryView>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}

fn entry_view(e: LedgerEntry) -> LedgerEntryView {
    LedgerEntryView {
        entry_id: e.entry_id,
        amount: money::format_amount(e.amount as u64),
        direction: e.direction.as_str().to_string(),
        tx_type: e.tx_type.as_str().to_string(),
        tx_ref: e.tx_ref,
        created_at: e.created_at.to_rfc3339(),
    }
}

/// Paginated ledger history, newest first
///
/// GET /api/v1/ledger
#[utoipa::path(
    get,
    path = "/api/v1/ledger",
    params(LedgerQuery),
    responses(
        (status = 200, description = "One page of ledger entries"),
        (status = 400, description = "Bad page or limit"),
        (status = 401, description = "Missing account identity")
    ),
    tag = "Ledger"
)]
pub async fn get_ledger(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<AuthenticatedAccount>,
    Query(query): Query<LedgerQuery>,
) -> ApiResult<LedgerPageResponse> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(20);
    if page == 0 {
        return ApiError::bad_request("page starts at 1").into_err();
    }
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return ApiError::bad_request(format!("limit must be 1..={MAX_PAGE_SIZE}")).into_err();
    }

    let (entries, total) =
        LedgerStore::history(state.db.pool(), account.account_id, page, limit).await?;

    ok(LedgerPageResponse {
        entries: entries.into_iter().map(entry_view).collect(),
        page,
        limit,
        total,
    })
}

/// Most recent ledger entry
///
/// GET /api/v1/ledger/latest
#[utoipa::path(
    get,
    path = "/api/v1/ledger/latest",
    responses(
        (status = 200, description = "Most recent ledger entry"),
        (status = 401, description = "Missing account identity"),
        (status = 404, description = "Account has no ledger entries yet")
    ),
    tag = "Ledger"
)]
pub async fn get_latest_entry(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<AuthenticatedAccount>,
) -> ApiResult<LedgerEntryView> {
    match LedgerStore::latest(state.db.pool(), account.account_id).await? {
        Some(entry) => ok(entry_view(entry)),
        None => ApiError::not_found("ledger entry not found").into_err(),
    }
}
