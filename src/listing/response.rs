use serde::{Deserialize, Serialize};

use super::enrich::ArticleView;
use super::paginate::Page;

/// Response for GET /api/blogs
#[derive(Debug, Serialize, Deserialize)]
pub struct BlogListResponse {
    pub success: bool,
    pub blogs: Vec<ArticleView>,
    pub total: usize,
    pub page: i64,
    pub limit: u32,
    pub total_pages: usize,
}

impl From<Page<ArticleView>> for BlogListResponse {
    fn from(page: Page<ArticleView>) -> Self {
        Self {
            success: true,
            blogs: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

/// Response for single-article lookups
#[derive(Debug, Serialize, Deserialize)]
pub struct BlogResponse {
    pub success: bool,
    pub blog: ArticleView,
}

impl From<ArticleView> for BlogResponse {
    fn from(blog: ArticleView) -> Self {
        Self {
            success: true,
            blog,
        }
    }
}
