use std::cmp::Reverse;
use std::str::FromStr;

use crate::store::models::Article;

/// Optional ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleSort {
    /// Newest first
    Latest,
    Oldest,
    /// Most viewed first
    Popular,
}

impl FromStr for ArticleSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(ArticleSort::Latest),
            "oldest" => Ok(ArticleSort::Oldest),
            "popular" => Ok(ArticleSort::Popular),
            other => Err(format!(
                "sort must be one of latest, oldest, popular (got '{}')",
                other
            )),
        }
    }
}

impl ArticleSort {
    /// Stable sort, so ties keep their filtered order.
    pub fn apply(self, articles: &mut [&Article]) {
        match self {
            ArticleSort::Latest => articles.sort_by_key(|a| Reverse(a.created_at)),
            ArticleSort::Oldest => articles.sort_by_key(|a| a.created_at),
            ArticleSort::Popular => articles.sort_by_key(|a| Reverse(a.view_count)),
        }
    }
}
