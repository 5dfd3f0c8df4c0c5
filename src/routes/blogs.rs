/**
 * Blog Routes
 * Public read endpoints for articles
 */
use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::AppError;
use crate::listing::{
    self,
    params::BlogListParams,
    response::{BlogListResponse, BlogResponse},
    ArticleKey,
};
use crate::AppState;

/// Parse a numeric article id from a path or query value
pub(crate) fn parse_article_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            AppError::invalid(format!(
                "blog id must be a positive integer (got '{}')",
                raw
            ))
        })
}

/// GET /api/blogs - Filtered, paginated listing
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(params): Query<BlogListParams>,
) -> Result<Json<BlogListResponse>, AppError> {
    let query = params.parse(state.config.default_page_size, state.config.max_page_size)?;
    let snapshot = state.store.snapshot()?;
    Ok(Json(listing::list_articles(&snapshot, &query)))
}

/// GET /api/blogs/{id}
pub async fn get_blog_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogResponse>, AppError> {
    let id = parse_article_id(&id)?;
    let snapshot = state.store.snapshot()?;
    listing::find_article(&snapshot, ArticleKey::Id(id)).map(Json)
}

/// GET /api/blogs/slug/{slug}
pub async fn get_blog_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogResponse>, AppError> {
    let snapshot = state.store.snapshot()?;
    listing::find_article(&snapshot, ArticleKey::Slug(&slug)).map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorResponse;
    use crate::routes::test_support::{app, get_json};
    use axum::http::StatusCode;

    fn ids(body: &BlogListResponse) -> Vec<i64> {
        body.blogs.iter().map(|b| b.article.id).collect()
    }

    #[tokio::test]
    async fn test_list_defaults() {
        let (app, _) = app();
        let (status, body) = get_json::<BlogListResponse>(&app, "/api/blogs").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(ids(&body), vec![1, 2, 3]);
        assert_eq!((body.total, body.page, body.limit, body.total_pages), (3, 1, 10, 1));
    }

    #[tokio::test]
    async fn test_list_search_alexandria() {
        let (app, _) = app();
        let (status, body) =
            get_json::<BlogListResponse>(&app, "/api/blogs?search=alexandria").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![3]);
        assert_eq!(body.blogs[0].article.title, "Ancient Libraries: Guardians of Knowledge");
    }

    #[tokio::test]
    async fn test_list_featured_flag() {
        let (app, _) = app();
        let (_, featured) = get_json::<BlogListResponse>(&app, "/api/blogs?featured=true").await;
        assert_eq!(ids(&featured), vec![1, 3]);

        let (_, plain) = get_json::<BlogListResponse>(&app, "/api/blogs?featured=false").await;
        assert_eq!(ids(&plain), vec![2]);
    }

    #[tokio::test]
    async fn test_list_category_tag_and_paging() {
        let (app, _) = app();
        let (_, body) =
            get_json::<BlogListResponse>(&app, "/api/blogs?category=fiction&limit=1&page=2").await;
        assert_eq!(ids(&body), vec![2]);
        assert_eq!(body.total, 2);
        assert_eq!(body.total_pages, 2);

        let (_, body) = get_json::<BlogListResponse>(&app, "/api/blogs?tag=tolkien").await;
        assert_eq!(ids(&body), vec![2]);
    }

    #[tokio::test]
    async fn test_list_admin_panel_blank_params() {
        let (app, _) = app();
        let (status, body) =
            get_json::<BlogListResponse>(&app, "/api/blogs?page=1&limit=10&search=&status=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.total, 3);
    }

    #[tokio::test]
    async fn test_list_sort_oldest() {
        let (app, _) = app();
        let (_, body) = get_json::<BlogListResponse>(&app, "/api/blogs?sort=oldest").await;
        assert_eq!(ids(&body), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_list_out_of_range_page_is_empty() {
        let (app, _) = app();
        let (status, body) = get_json::<BlogListResponse>(&app, "/api/blogs?page=9").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.blogs.is_empty());
        assert_eq!(body.total, 3);
    }

    #[tokio::test]
    async fn test_list_malformed_params_are_bad_request() {
        let (app, _) = app();
        for uri in [
            "/api/blogs?page=abc",
            "/api/blogs?limit=0",
            "/api/blogs?limit=1000",
            "/api/blogs?featured=maybe",
            "/api/blogs?status=gone",
        ] {
            let (status, body) = get_json::<ErrorResponse>(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert!(body.error.contains("must be"), "{}: {}", uri, body.error);
        }
    }

    #[tokio::test]
    async fn test_get_by_id_attaches_related_books() {
        let (app, _) = app();
        let (status, body) = get_json::<BlogResponse>(&app, "/api/blogs/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.blog.article.id, 2);
        assert_eq!(body.blog.related_books.len(), 2);
        assert_eq!(body.blog.category.map(|c| c.name), Some("Fiction".to_string()));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_and_malformed() {
        let (app, _) = app();
        let (status, body) = get_json::<ErrorResponse>(&app, "/api/blogs/77").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Blog not found");

        let (status, _) = get_json::<ErrorResponse>(&app, "/api/blogs/seven").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let (app, _) = app();
        let uri = "/api/blogs/slug/building-personal-library-complete-guide";
        let (status, body) = get_json::<BlogResponse>(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.blog.article.id, 1);

        let (status, body) = get_json::<ErrorResponse>(&app, "/api/blogs/slug/missing-post").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Blog not found");
    }

    #[test]
    fn test_parse_article_id() {
        assert_eq!(parse_article_id("3").unwrap(), 3);
        assert_eq!(parse_article_id(" 12 ").unwrap(), 12);
        assert!(parse_article_id("0").is_err());
        assert!(parse_article_id("-2").is_err());
        assert!(parse_article_id("x1").is_err());
    }
}
