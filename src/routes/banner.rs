use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::store::models::Banner;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct BannersResponse {
    pub success: bool,
    pub banners: Vec<Banner>,
}

/// GET /api/banner - Homepage banners
pub async fn list_banners(
    State(state): State<AppState>,
) -> Result<Json<BannersResponse>, AppError> {
    let snapshot = state.store.snapshot()?;
    Ok(Json(BannersResponse {
        success: true,
        banners: snapshot.banners.clone(),
    }))
}
