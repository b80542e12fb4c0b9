//! Estimator routes
//!
//! Session-scoped line-item estimates with CSV export.

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Attachment, Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::estimates::export_csv;
use crate::domain::{CostEstimate, CostLineItem, EstimateError, EstimateTotals};
use crate::error::{ApiError, ApiResult};

const CSV_FILENAME: &str = "Iron_Estimate.csv";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateEstimateRequest {
    pub empty: bool,
}

#[derive(Debug, Serialize)]
pub struct LineItemView {
    pub index: usize,
    #[serde(flatten)]
    pub item: CostLineItem,
    pub labor_cost: Decimal,
    pub final_price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct EstimateView {
    pub id: Uuid,
    pub items: Vec<LineItemView>,
    pub totals: EstimateTotals,
}

impl EstimateView {
    fn new(id: Uuid, estimate: &CostEstimate) -> Result<Self, EstimateError> {
        let items = estimate
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Ok(LineItemView {
                    index,
                    item: *item,
                    labor_cost: item.labor_cost()?,
                    final_price: item.final_price()?,
                })
            })
            .collect::<Result<_, EstimateError>>()?;
        Ok(Self {
            id,
            items,
            totals: estimate.totals()?,
        })
    }
}

fn session_not_found(id: Uuid) -> ApiError {
    ApiError::not_found(format!("Estimate session {id} not found"))
}

/// Applies `f` to the session and returns the resulting view.
fn edit<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut CostEstimate) -> R,
) -> ApiResult<(R, EstimateView)> {
    let (result, view) = state
        .estimates
        .with_estimate_mut(id, |estimate| {
            let result = f(estimate);
            (result, EstimateView::new(id, estimate))
        })
        .ok_or_else(|| session_not_found(id))?;
    Ok((result, view?))
}

/// POST /estimates
pub async fn create_estimate(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CreateEstimateRequest>>,
) -> ApiResult<Created<DataResponse<EstimateView>>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let id = state.estimates.create(req.empty);
    tracing::info!(estimate_id = %id, empty = req.empty, "Created estimate session");

    let estimate = state.estimates.get(id).ok_or_else(|| session_not_found(id))?;
    Ok(Created(DataResponse::new(EstimateView::new(id, &estimate)?)))
}

/// GET /estimates/:id
pub async fn get_estimate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<DataResponse<EstimateView>> {
    let estimate = state.estimates.get(id).ok_or_else(|| session_not_found(id))?;
    Ok(DataResponse::new(EstimateView::new(id, &estimate)?))
}

/// DELETE /estimates/:id
pub async fn end_estimate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<NoContent> {
    if !state.estimates.end(id) {
        return Err(session_not_found(id));
    }
    tracing::info!(estimate_id = %id, "Ended estimate session");
    Ok(NoContent)
}

/// POST /estimates/:id/items
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Created<DataResponse<EstimateView>>> {
    let (index, view) = edit(&state, id, CostEstimate::add_item)?;
    tracing::debug!(estimate_id = %id, index, "Added line item");
    Ok(Created(DataResponse::new(view)))
}

/// DELETE /estimates/:id/items
pub async fn remove_all_items(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<DataResponse<EstimateView>> {
    let ((), view) = edit(&state, id, CostEstimate::remove_all)?;
    tracing::debug!(estimate_id = %id, "Cleared line items");
    Ok(DataResponse::new(view))
}

/// PUT /estimates/:id/items/:index
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(item): Json<CostLineItem>,
) -> ApiResult<DataResponse<EstimateView>> {
    let (result, view) = edit(&state, id, |estimate| estimate.update_item(index, item))?;
    let final_price = result?;
    tracing::debug!(estimate_id = %id, index, %final_price, "Updated line item");
    Ok(DataResponse::new(view))
}

/// DELETE /estimates/:id/items/:index
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> ApiResult<DataResponse<EstimateView>> {
    let (result, view) = edit(&state, id, |estimate| estimate.remove_item(index))?;
    result?;
    tracing::debug!(estimate_id = %id, index, "Removed line item");
    Ok(DataResponse::new(view))
}

/// GET /estimates/:id/csv
pub async fn export_estimate_csv(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Attachment> {
    let estimate = state.estimates.get(id).ok_or_else(|| session_not_found(id))?;
    let csv = export_csv(estimate.items()).map_err(|e| ApiError::Internal(e.into()))?;
    tracing::info!(estimate_id = %id, rows = estimate.len(), "Exported estimate CSV");
    Ok(Attachment::new(CSV_FILENAME, "text/csv; charset=utf-8", csv.into_bytes()))
}
