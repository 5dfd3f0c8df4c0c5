use serde::{Deserialize, Serialize};

use crate::store::models::{Article, Category, RelatedBook};
use crate::store::Snapshot;

/// Article as returned to readers: the stored record plus its lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    pub category: Option<Category>,
    pub related_books: Vec<RelatedBook>,
}

/// Attach the category record and the related books keyed by the article id.
/// A missing lookup entry yields an empty list.
pub fn enrich(article: &Article, snapshot: &Snapshot) -> ArticleView {
    ArticleView {
        article: article.clone(),
        category: snapshot.category(article.category_id).cloned(),
        related_books: snapshot.related_books_for(article.id).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixture;

    #[test]
    fn test_attaches_books_and_category() {
        let snapshot = fixture::snapshot();
        let view = enrich(snapshot.article_by_id(2).unwrap(), &snapshot);
        assert_eq!(view.related_books.len(), 2);
        assert_eq!(view.related_books[0].title, "The Lord of the Rings");
        assert_eq!(view.category.map(|c| c.slug), Some("fiction".to_string()));
    }

    #[test]
    fn test_missing_lookup_entry_gives_empty_books() {
        let mut snapshot = fixture::snapshot();
        snapshot.related_books.remove(&1);
        let view = enrich(snapshot.article_by_id(1).unwrap(), &snapshot);
        assert!(view.related_books.is_empty());
    }

    #[test]
    fn test_serializes_flat_with_related_books() {
        let snapshot = fixture::snapshot();
        let json = serde_json::to_value(enrich(&snapshot.articles[2], &snapshot)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["slug"], "ancient-libraries-guardians-knowledge");
        assert_eq!(json["category"]["name"], "History");
        assert_eq!(json["related_books"].as_array().map(Vec::len), Some(1));
    }
}
