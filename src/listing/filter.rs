use crate::store::models::{Article, ArticleStatus, Category};

/// Optional predicates over the article collection. Every supplied
/// predicate must hold for an article to be kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleFilter {
    /// Case-insensitive substring of title, content or any tag
    pub search: Option<String>,
    /// Category slug
    pub category: Option<String>,
    /// Exact tag
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<ArticleStatus>,
}

impl ArticleFilter {
    pub fn is_empty(&self) -> bool {
        self == &ArticleFilter::default()
    }

    /// Keep the articles matching every predicate, in their original order.
    pub fn apply<'a>(&self, articles: &'a [Article], categories: &[Category]) -> Vec<&'a Article> {
        // An unknown category slug resolves to `Some(None)` and matches nothing.
        let category_id = self.category.as_deref().map(|slug| {
            categories
                .iter()
                .find(|c| c.slug == slug)
                .map(|c| c.id)
        });
        if let Some(None) = category_id {
            return Vec::new();
        }
        let category_id = category_id.flatten();
        let needle = self.search.as_deref().map(str::to_lowercase);

        articles
            .iter()
            .filter(|article| {
                needle
                    .as_deref()
                    .map_or(true, |needle| matches_search(article, needle))
                    && category_id.map_or(true, |id| article.category_id == id)
                    && self
                        .tag
                        .as_deref()
                        .map_or(true, |tag| article.tags.iter().any(|t| t == tag))
                    && self.featured.map_or(true, |f| article.is_featured == f)
                    && self.status.map_or(true, |s| article.status == s)
            })
            .collect()
    }
}

fn matches_search(article: &Article, needle: &str) -> bool {
    article.title.to_lowercase().contains(needle)
        || article.content.to_lowercase().contains(needle)
        || article
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
