//! Post selection and ordering.
//!
//! The feed lists posts newest first. Announcements go out oldest first, so
//! the selected window is reversed before sending.

use crate::error::{AppError, Result};

/// How many of the most recent posts to consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostLimit {
    Unlimited,
    Latest(usize),
}

impl PostLimit {
    /// Interpret the configured `max_posts` value (0 means unlimited).
    pub fn from_config(max_posts: i64) -> Result<Self> {
        match max_posts {
            0 => Ok(PostLimit::Unlimited),
            n if n > 0 => Ok(PostLimit::Latest(usize::try_from(n).unwrap_or(usize::MAX))),
            n => Err(AppError::validation(format!(
                "Invalid value {n} for max_posts (expected 0 for all posts or a positive count)"
            ))),
        }
    }
}

/// Select posts to announce, in announcement order.
///
/// With a limit smaller than the feed, the `n` newest posts are kept.
/// Either way the result runs from oldest to newest.
pub fn select_posts<T>(mut posts: Vec<T>, limit: PostLimit) -> Vec<T> {
    if let PostLimit::Latest(n) = limit {
        posts.truncate(n);
    }
    posts.reverse();
    posts
}

#[cfg(test)]
mod tests {
    use super::*;

    // Feed order: newest first.
    fn feed() -> Vec<&'static str> {
        vec!["p5", "p4", "p3", "p2", "p1"]
    }

    #[test]
    fn test_limit_keeps_newest_oldest_first() {
        let selected = select_posts(feed(), PostLimit::Latest(2));
        assert_eq!(selected, vec!["p4", "p5"]);
    }

    #[test]
    fn test_unlimited_reverses_everything() {
        let selected = select_posts(feed(), PostLimit::Unlimited);
        assert_eq!(selected, vec!["p1", "p2", "p3", "p4", "p5"]);
    }

    #[test]
    fn test_limit_at_or_above_total_takes_all() {
        assert_eq!(
            select_posts(feed(), PostLimit::Latest(5)),
            vec!["p1", "p2", "p3", "p4", "p5"]
        );
        assert_eq!(
            select_posts(feed(), PostLimit::Latest(50)),
            vec!["p1", "p2", "p3", "p4", "p5"]
        );
    }

    #[test]
    fn test_empty_feed() {
        let selected: Vec<&str> = select_posts(Vec::new(), PostLimit::Latest(3));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_limit_from_config() {
        assert_eq!(PostLimit::from_config(0).unwrap(), PostLimit::Unlimited);
        assert_eq!(PostLimit::from_config(7).unwrap(), PostLimit::Latest(7));
        assert!(matches!(
            PostLimit::from_config(-1),
            Err(AppError::Validation(_))
        ));
    }
}
