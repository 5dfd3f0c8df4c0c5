use serde::Deserialize;

use super::filter::ArticleFilter;
use super::paginate::PageRequest;
use super::sort::ArticleSort;
use crate::error::AppError;
use crate::store::models::ArticleStatus;

/// Raw query string of GET /api/blogs. Values stay strings until `parse`
/// so malformed input is reported instead of silently defaulted.
#[derive(Debug, Default, Deserialize)]
pub struct BlogListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Fully parsed list query
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: ArticleFilter,
    pub sort: Option<ArticleSort>,
    pub page: PageRequest,
}

/// Blank values count as absent; the admin panel sends `search=&status=`.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(name: &str, value: &str) -> Result<bool, AppError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(AppError::invalid(format!(
            "{} must be true or false (got '{}')",
            name, other
        ))),
    }
}

impl BlogListParams {
    pub fn parse(self, default_limit: u32, max_limit: u32) -> Result<ListQuery, AppError> {
        let featured = present(self.featured)
            .map(|v| parse_bool("featured", &v))
            .transpose()?;
        let status = present(self.status)
            .map(|v| v.parse::<ArticleStatus>())
            .transpose()
            .map_err(AppError::InvalidInput)?;
        let sort = present(self.sort)
            .map(|v| v.parse::<ArticleSort>())
            .transpose()
            .map_err(AppError::InvalidInput)?;

        let page = match present(self.page) {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                AppError::invalid(format!("page must be an integer (got '{}')", raw))
            })?,
            None => 1,
        };
        let limit = match present(self.limit) {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|l| (1..=max_limit).contains(l))
                .ok_or_else(|| {
                    AppError::invalid(format!(
                        "limit must be an integer between 1 and {} (got '{}')",
                        max_limit, raw
                    ))
                })?,
            None => default_limit,
        };

        Ok(ListQuery {
            filter: ArticleFilter {
                search: present(self.search),
                category: present(self.category),
                tag: present(self.tag),
                featured,
                status,
            },
            sort,
            page: PageRequest { page, limit },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BlogListParams {
        let mut p = BlogListParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "search" => p.search = value,
                "category" => p.category = value,
                "tag" => p.tag = value,
                "featured" => p.featured = value,
                "status" => p.status = value,
                "sort" => p.sort = value,
                "page" => p.page = value,
                "limit" => p.limit = value,
                other => panic!("unknown param {}", other),
            }
        }
        p
    }

    #[test]
    fn test_defaults() {
        let query = BlogListParams::default().parse(10, 100).unwrap();
        assert!(query.filter.is_empty());
        assert_eq!(query.sort, None);
        assert_eq!(query.page, PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn test_blank_values_are_absent() {
        let query = params(&[("search", ""), ("status", "  "), ("page", "")])
            .parse(10, 100)
            .unwrap();
        assert!(query.filter.is_empty());
        assert_eq!(query.page.page, 1);
    }

    #[test]
    fn test_parses_every_option() {
        let query = params(&[
            ("search", "library"),
            ("category", "fiction"),
            ("tag", "books"),
            ("featured", "1"),
            ("status", "published"),
            ("sort", "latest"),
            ("page", "2"),
            ("limit", "5"),
        ])
        .parse(10, 100)
        .unwrap();
        assert_eq!(query.filter.search.as_deref(), Some("library"));
        assert_eq!(query.filter.category.as_deref(), Some("fiction"));
        assert_eq!(query.filter.tag.as_deref(), Some("books"));
        assert_eq!(query.filter.featured, Some(true));
        assert_eq!(query.filter.status, Some(ArticleStatus::Published));
        assert_eq!(query.sort, Some(ArticleSort::Latest));
        assert_eq!(query.page, PageRequest { page: 2, limit: 5 });
    }

    #[test]
    fn test_non_positive_page_is_accepted() {
        let query = params(&[("page", "-3")]).parse(10, 100).unwrap();
        assert_eq!(query.page.page, -3);
    }

    #[test]
    fn test_malformed_values_are_invalid_input() {
        let cases: &[(&str, &str)] = &[
            ("page", "two"),
            ("page", "1.5"),
            ("limit", "0"),
            ("limit", "-5"),
            ("limit", "101"),
            ("limit", "ten"),
            ("featured", "yes"),
            ("status", "deleted"),
            ("sort", "random"),
        ];
        for (key, value) in cases {
            let result = params(&[(*key, *value)]).parse(10, 100);
            assert!(
                matches!(result, Err(AppError::InvalidInput(_))),
                "{}={} should be rejected",
                key,
                value
            );
        }
    }
}
