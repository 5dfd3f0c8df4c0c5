//! Blog query surface: filter → sort → paginate → enrich → respond.
//!
//! Everything here is a pure function of the request and one store snapshot.

pub mod enrich;
pub mod filter;
pub mod paginate;
pub mod params;
pub mod response;
pub mod sort;

use crate::error::AppError;
use crate::store::Snapshot;

use enrich::enrich;
use paginate::paginate;
use params::ListQuery;
use response::{BlogListResponse, BlogResponse};

/// How a single article is addressed
#[derive(Debug, Clone, Copy)]
pub enum ArticleKey<'a> {
    Id(i64),
    Slug(&'a str),
}

pub fn list_articles(snapshot: &Snapshot, query: &ListQuery) -> BlogListResponse {
    let mut matched = query.filter.apply(&snapshot.articles, &snapshot.categories);
    if let Some(sort) = query.sort {
        sort.apply(&mut matched);
    }

    tracing::debug!(
        matched = matched.len(),
        page = query.page.page,
        limit = query.page.limit,
        "blog listing"
    );

    paginate(matched, query.page)
        .map(|article| enrich(article, snapshot))
        .into()
}

pub fn find_article(snapshot: &Snapshot, key: ArticleKey<'_>) -> Result<BlogResponse, AppError> {
    let article = match key {
        ArticleKey::Id(id) => snapshot.article_by_id(id),
        ArticleKey::Slug(slug) => snapshot.article_by_slug(slug),
    }
    .ok_or_else(AppError::blog_not_found)?;

    Ok(enrich(article, snapshot).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::filter::ArticleFilter;
    use crate::listing::paginate::PageRequest;
    use crate::listing::sort::ArticleSort;
    use crate::store::fixture;

    fn query(filter: ArticleFilter, page: i64, limit: u32) -> ListQuery {
        ListQuery {
            filter,
            sort: None,
            page: PageRequest { page, limit },
        }
    }

    fn ids(response: &BlogListResponse) -> Vec<i64> {
        response.blogs.iter().map(|b| b.article.id).collect()
    }

    #[test]
    fn test_unfiltered_listing_envelope() {
        let snapshot = fixture::snapshot();
        let response = list_articles(&snapshot, &query(ArticleFilter::default(), 1, 10));
        assert!(response.success);
        assert_eq!(ids(&response), vec![1, 2, 3]);
        assert_eq!(response.total, 3);
        assert_eq!(response.page, 1);
        assert_eq!(response.limit, 10);
        assert_eq!(response.total_pages, 1);
        assert!(response.blogs.iter().all(|b| !b.related_books.is_empty()));
    }

    #[test]
    fn test_total_counts_matches_not_page() {
        let snapshot = fixture::snapshot();
        let response = list_articles(&snapshot, &query(ArticleFilter::default(), 2, 2));
        assert_eq!(ids(&response), vec![3]);
        assert_eq!(response.total, 3);
        assert_eq!(response.total_pages, 2);
    }

    #[test]
    fn test_filtered_then_paginated() {
        let snapshot = fixture::snapshot();
        let featured = ArticleFilter {
            featured: Some(true),
            ..Default::default()
        };
        let response = list_articles(&snapshot, &query(featured, 1, 1));
        assert_eq!(ids(&response), vec![1]);
        assert_eq!(response.total, 2);
        assert_eq!(response.total_pages, 2);
    }

    #[test]
    fn test_sort_runs_before_pagination() {
        let snapshot = fixture::snapshot();
        let mut q = query(ArticleFilter::default(), 1, 2);
        q.sort = Some(ArticleSort::Popular);
        assert_eq!(ids(&list_articles(&snapshot, &q)), vec![3, 1]);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let snapshot = fixture::snapshot();
        let response = list_articles(&snapshot, &query(ArticleFilter::default(), 5, 10));
        assert!(response.blogs.is_empty());
        assert_eq!(response.total, 3);
        assert_eq!(response.page, 5);
    }

    #[test]
    fn test_find_by_id_attaches_related_books() {
        let snapshot = fixture::snapshot();
        let response = find_article(&snapshot, ArticleKey::Id(2)).unwrap();
        assert_eq!(response.blog.article.slug, "evolution-fantasy-literature");
        assert_eq!(response.blog.related_books.len(), 2);
    }

    #[test]
    fn test_find_without_lookup_entry_has_empty_books() {
        let mut snapshot = fixture::snapshot();
        snapshot.related_books.remove(&3);
        let response = find_article(&snapshot, ArticleKey::Id(3)).unwrap();
        assert!(response.blog.related_books.is_empty());
    }

    #[test]
    fn test_find_by_slug_and_not_found() {
        let snapshot = fixture::snapshot();
        let slug = "ancient-libraries-guardians-knowledge";
        let found = find_article(&snapshot, ArticleKey::Slug(slug));
        assert_eq!(found.unwrap().blog.article.id, 3);

        let missing = find_article(&snapshot, ArticleKey::Slug("no-such-post"));
        assert!(matches!(missing, Err(AppError::NotFound(_))));
        assert!(matches!(
            find_article(&snapshot, ArticleKey::Id(99)),
            Err(AppError::NotFound(_))
        ));
    }
}
