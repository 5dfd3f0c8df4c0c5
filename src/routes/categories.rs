use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::store::models::Category;
use crate::AppState;

/// Category with the number of articles filed under it
#[derive(Debug, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    pub blog_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<CategorySummary>,
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let snapshot = state.store.snapshot()?;
    let categories = snapshot
        .categories
        .iter()
        .map(|category| CategorySummary {
            blog_count: snapshot.article_count(category.id),
            category: category.clone(),
        })
        .collect();

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}
