//! Content models - the records served by the blog endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication state of an article
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleStatus::Draft => write!(f, "draft"),
            ArticleStatus::Published => write!(f, "published"),
            ArticleStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for ArticleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ArticleStatus::Draft),
            "published" => Ok(ArticleStatus::Published),
            "archived" => Ok(ArticleStatus::Archived),
            other => Err(format!(
                "status must be one of draft, published, archived (got '{}')",
                other
            )),
        }
    }
}

/// Blog article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub category_id: i64,
    pub tags: Vec<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_featured: bool,
    pub status: ArticleStatus,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Article category (static reference data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Book recommended alongside an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedBook {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub purchase_link: String,
}

/// Related book submitted by the admin panel; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRelatedBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    pub purchase_link: String,
}

/// Homepage banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub link: String,
}

/// New article for insertion. Fields are already validated and sanitized.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub category_id: i64,
    pub tags: Vec<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub status: ArticleStatus,
    pub is_featured: bool,
    pub related_books: Vec<NewRelatedBook>,
}

/// Partial article update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category_id: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub status: Option<ArticleStatus>,
    pub is_featured: Option<bool>,
    pub related_books: Option<Vec<NewRelatedBook>>,
}
