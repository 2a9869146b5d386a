//! Analytics API Handlers

use axum::{Json, extract::State};

use crate::AppError;
use crate::core::ServerState;
use shared::client::{AnalyticsResponse, SalesSummary};
use shared::models::OrderStatus;

/// How many best sellers the dashboard shows
const TOP_ITEMS_LIMIT: usize = 5;

/// GET /api/analytics/summary - sales dashboard figures
///
/// The router guards this with the admin middleware. Alongside the
/// aggregates, the body carries the completed and cancelled order lists so
/// the dashboard can render both partitions without extra round trips.
pub async fn summary(
    State(state): State<ServerState>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let repo = state.orders();
    let rows = repo.analytics_rows().await?;
    let summary = SalesSummary::compute(
        rows.iter()
            .map(|r| (r.status, r.payment_method, &r.total_amount)),
    );
    let completed = repo.find_views_by_status(OrderStatus::Completed).await?;
    let cancelled = repo.find_views_by_status(OrderStatus::Cancelled).await?;
    let top_items = repo.top_items(TOP_ITEMS_LIMIT).await?;

    Ok(Json(AnalyticsResponse {
        summary,
        completed,
        cancelled,
        top_items,
    }))
}
