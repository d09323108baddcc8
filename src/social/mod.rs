//! Social interactions (follow, favorite, like) over a remote procedure endpoint.
//!
//! [`SocialService`] only shapes parameters and forwards calls; results come
//! back as the endpoint sent them. There is no retry or caching here.
//! [`parse_result`] reads a result as one of the typed views below when the
//! caller knows its shape.
//!
//! # Pagination
//!
//! Callers page with `{page, page_size}`; the endpoint expects
//! `{limit, offset}`:
//!
//! ```text
//! limit  = page_size
//! offset = (page - 1) * (page_size or default_page_size)   // only when page is set
//! ```

mod service;
mod transport;

pub use service::SocialService;
pub use transport::{CallKind, HttpTransport, SocialTransport, TransportFuture};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Read a raw procedure result as a typed view.
///
/// Fields the view does not know are ignored; missing required fields are a
/// [`crate::CompassError::Json`] error.
pub fn parse_result<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Kind of item a favorite/like refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// Agent listing
    Agent,
    /// Plugin listing
    Plugin,
}

impl TargetType {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Plugin => "plugin",
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Item reference: numeric id or string identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Numeric id
    Id(u64),
    /// String identifier (e.g. plugin slug)
    Identifier(String),
}

impl Target {
    /// Value for `targetIdOrIdentifier` fields
    pub fn to_value(&self) -> Value {
        match self {
            Self::Id(id) => Value::from(*id),
            Self::Identifier(identifier) => Value::from(identifier.as_str()),
        }
    }
}

impl From<u64> for Target {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for Target {
    fn from(identifier: &str) -> Self {
        Self::Identifier(identifier.to_string())
    }
}

impl From<String> for Target {
    fn from(identifier: String) -> Self {
        Self::Identifier(identifier)
    }
}

/// Page request. Both fields optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    pub page: Option<u32>,
    /// Items per page
    pub page_size: Option<u32>,
}

impl Pagination {
    /// Page `page` of `page_size` items
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Page number only; offset uses the default page size
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            page_size: None,
        }
    }

    /// Translate to `(limit, offset)`.
    ///
    /// The offset is computed in `u64`, where the product of two `u32` values
    /// cannot overflow.
    pub fn to_limit_offset(&self, default_page_size: u32) -> (Option<u32>, Option<u64>) {
        let limit = self.page_size;
        let page_size = u64::from(self.page_size.unwrap_or(default_page_size));
        let offset = self
            .page
            .map(|page| u64::from(page.saturating_sub(1)) * page_size);
        (limit, offset)
    }
}

/// `checkFollowStatus` result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatus {
    /// Caller follows the user
    pub is_following: bool,
    /// The user follows back
    #[serde(default)]
    pub is_mutual: bool,
}

/// `getFollowCounts` result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowCounts {
    /// Number of followers
    pub followers_count: u64,
    /// Number of followed users
    pub following_count: u64,
}

/// `checkFavorite` result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    /// Caller has favorited the item
    pub is_favorited: bool,
}

/// `checkLike` result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    /// Caller has liked the item
    pub is_liked: bool,
}

/// `toggleLike` result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleLikeResult {
    /// Like state after the toggle
    pub liked: bool,
}

/// Paginated list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// 1-based page number
    pub current_page: u32,
    /// Items on this page
    pub items: Vec<T>,
    /// Items per page
    pub page_size: u32,
    /// Total items
    pub total_count: u64,
    /// Total pages
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pagination() {
        assert_eq!(Pagination::default().to_limit_offset(10), (None, None));
    }

    #[test]
    fn test_offset_from_page_and_size() {
        assert_eq!(Pagination::new(2, 20).to_limit_offset(10), (Some(20), Some(20)));
        assert_eq!(Pagination::new(5, 15).to_limit_offset(10), (Some(15), Some(60)));
        assert_eq!(Pagination::new(1, 25).to_limit_offset(10), (Some(25), Some(0)));
    }

    #[test]
    fn test_offset_uses_default_page_size() {
        assert_eq!(Pagination::page(3).to_limit_offset(10), (None, Some(20)));
    }

    #[test]
    fn test_page_zero_does_not_underflow() {
        assert_eq!(Pagination::new(0, 10).to_limit_offset(10), (Some(10), Some(0)));
    }

    #[test]
    fn test_large_pages_do_not_overflow() {
        assert_eq!(
            Pagination::page(500_000_000).to_limit_offset(10),
            (None, Some(4_999_999_990))
        );
        assert_eq!(
            Pagination::new(u32::MAX, u32::MAX).to_limit_offset(10),
            (
                Some(u32::MAX),
                Some(u64::from(u32::MAX - 1) * u64::from(u32::MAX))
            )
        );
    }

    #[test]
    fn test_target_values() {
        assert_eq!(Target::from(7_u64).to_value(), serde_json::json!(7));
        assert_eq!(Target::from("x").to_value(), serde_json::json!("x"));
    }

    #[test]
    fn test_paginated_deserialize() {
        let page: Paginated<Value> = serde_json::from_value(serde_json::json!({
            "currentPage": 1,
            "items": [],
            "pageSize": 10,
            "totalCount": 0,
            "totalPages": 0
        }))
        .unwrap();
        assert_eq!(page.page_size, 10);
        assert!(page.items.is_empty());
    }
}
