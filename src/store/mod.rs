pub mod fixture;
pub mod models;

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use models::{Article, ArticleChanges, Banner, Category, NewArticle, NewRelatedBook, RelatedBook};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("article {0} not found")]
    ArticleNotFound(i64),

    #[error("slug '{0}' is already in use")]
    DuplicateSlug(String),

    #[error("category {0} does not exist")]
    UnknownCategory(i64),

    #[error("content store lock poisoned")]
    Poisoned,
}

/// Immutable view of the store contents. A request reads one snapshot
/// for its whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub articles: Vec<Article>,
    pub categories: Vec<Category>,
    pub related_books: HashMap<i64, Vec<RelatedBook>>,
    pub banners: Vec<Banner>,
}

impl Snapshot {
    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn article_by_id(&self, id: i64) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn article_by_slug(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    pub fn related_books_for(&self, article_id: i64) -> &[RelatedBook] {
        self.related_books
            .get(&article_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of articles filed under a category
    pub fn article_count(&self, category_id: i64) -> usize {
        self.articles
            .iter()
            .filter(|a| a.category_id == category_id)
            .count()
    }

    fn next_article_id(&self) -> i64 {
        self.articles.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    fn next_book_id(&self) -> i64 {
        self.related_books
            .values()
            .flatten()
            .map(|b| b.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn ensure_category(&self, id: i64) -> Result<(), StoreError> {
        match self.category(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::UnknownCategory(id)),
        }
    }

    fn ensure_slug_free(&self, slug: &str, owner: Option<i64>) -> Result<(), StoreError> {
        let taken = self
            .articles
            .iter()
            .any(|a| a.slug == slug && Some(a.id) != owner);
        if taken {
            Err(StoreError::DuplicateSlug(slug.to_string()))
        } else {
            Ok(())
        }
    }

    fn store_books(&mut self, article_id: i64, books: Vec<NewRelatedBook>) {
        if books.is_empty() {
            self.related_books.remove(&article_id);
            return;
        }
        let first_id = self.next_book_id();
        let books = books
            .into_iter()
            .zip(first_id..)
            .map(|(book, id)| RelatedBook {
                id,
                title: book.title,
                author: book.author,
                description: book.description,
                price: book.price,
                purchase_link: book.purchase_link,
            })
            .collect();
        self.related_books.insert(article_id, books);
    }
}

/// Data-access capability behind every handler. Reads hand out snapshots;
/// writes replace the current snapshot wholesale.
pub trait ContentStore: Send + Sync {
    fn snapshot(&self) -> Result<Arc<Snapshot>, StoreError>;

    fn insert_article(&self, article: NewArticle) -> Result<Article, StoreError>;

    fn update_article(&self, id: i64, changes: ArticleChanges) -> Result<Article, StoreError>;

    fn delete_article(&self, id: i64) -> Result<(), StoreError>;
}

/// In-process store with copy-on-write snapshots
#[derive(Debug, Default)]
pub struct MemoryStore {
    current: RwLock<Arc<Snapshot>>,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn with_fixture() -> Self {
        Self::new(fixture::snapshot())
    }

    fn modify<T>(
        &self,
        f: impl FnOnce(&mut Snapshot) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.current.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = Snapshot::clone(&guard);
        let out = f(&mut next)?;
        *guard = Arc::new(next);
        Ok(out)
    }
}

impl ContentStore for MemoryStore {
    fn snapshot(&self) -> Result<Arc<Snapshot>, StoreError> {
        self.current
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| StoreError::Poisoned)
    }

    fn insert_article(&self, article: NewArticle) -> Result<Article, StoreError> {
        self.modify(|snapshot| {
            snapshot.ensure_category(article.category_id)?;
            snapshot.ensure_slug_free(&article.slug, None)?;

            let now = Utc::now();
            let id = snapshot.next_article_id();
            let stored = Article {
                id,
                title: article.title,
                slug: article.slug,
                content: article.content,
                excerpt: article.excerpt,
                featured_image: article.featured_image,
                category_id: article.category_id,
                tags: article.tags,
                meta_title: article.meta_title,
                meta_description: article.meta_description,
                is_featured: article.is_featured,
                status: article.status,
                view_count: 0,
                created_at: now,
                updated_at: now,
            };
            snapshot.store_books(id, article.related_books);
            snapshot.articles.push(stored.clone());

            tracing::info!(article_id = id, slug = %stored.slug, "article created");
            Ok(stored)
        })
    }

    fn update_article(&self, id: i64, changes: ArticleChanges) -> Result<Article, StoreError> {
        self.modify(|snapshot| {
            if let Some(category_id) = changes.category_id {
                snapshot.ensure_category(category_id)?;
            }
            if let Some(ref slug) = changes.slug {
                snapshot.ensure_slug_free(slug, Some(id))?;
            }

            let article = snapshot
                .articles
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(StoreError::ArticleNotFound(id))?;

            if let Some(title) = changes.title {
                article.title = title;
            }
            if let Some(slug) = changes.slug {
                article.slug = slug;
            }
            if let Some(content) = changes.content {
                article.content = content;
            }
            if let Some(excerpt) = changes.excerpt {
                article.excerpt = excerpt;
            }
            if changes.featured_image.is_some() {
                article.featured_image = changes.featured_image;
            }
            if let Some(category_id) = changes.category_id {
                article.category_id = category_id;
            }
            if let Some(tags) = changes.tags {
                article.tags = tags;
            }
            if changes.meta_title.is_some() {
                article.meta_title = changes.meta_title;
            }
            if changes.meta_description.is_some() {
                article.meta_description = changes.meta_description;
            }
            if let Some(status) = changes.status {
                article.status = status;
            }
            if let Some(is_featured) = changes.is_featured {
                article.is_featured = is_featured;
            }
            article.updated_at = Utc::now();
            let updated = article.clone();

            if let Some(books) = changes.related_books {
                snapshot.store_books(id, books);
            }

            tracing::info!(article_id = id, "article updated");
            Ok(updated)
        })
    }

    fn delete_article(&self, id: i64) -> Result<(), StoreError> {
        self.modify(|snapshot| {
            let before = snapshot.articles.len();
            snapshot.articles.retain(|a| a.id != id);
            if snapshot.articles.len() == before {
                return Err(StoreError::ArticleNotFound(id));
            }
            snapshot.related_books.remove(&id);

            tracing::info!(article_id = id, "article deleted");
            Ok(())
        })
    }
}
