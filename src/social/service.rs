//! Social service: parameter shaping over a [`SocialTransport`].

use serde_json::{json, Map, Value};

use super::transport::{CallKind, HttpTransport, SocialTransport};
use super::{Pagination, Target, TargetType};
use crate::config::SocialConfig;
use crate::error::Result;

/// Follow/favorite/like operations forwarded to the remote endpoint.
///
/// Every operation returns the procedure result exactly as the endpoint sent
/// it. Use [`super::parse_result`] to read it as one of the typed views
/// ([`super::FollowStatus`], [`super::Paginated`], ...).
pub struct SocialService<T> {
    transport: T,
    default_page_size: u32,
}

impl SocialService<HttpTransport> {
    /// Service over HTTP, configured from `config`
    pub fn from_config(config: &SocialConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?).with_default_page_size(config.default_page_size))
    }
}

impl<T: SocialTransport> SocialService<T> {
    /// Create a service over `transport`
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            default_page_size: 10,
        }
    }

    /// Set the page size used for offsets when only a page is given
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ---- follows ----

    /// Follow a user
    pub async fn follow(&self, following_id: u64) -> Result<Value> {
        self.mutate("follow", json!({ "followingId": following_id }))
            .await
    }

    /// Unfollow a user
    pub async fn unfollow(&self, following_id: u64) -> Result<Value> {
        self.mutate("unfollow", json!({ "followingId": following_id }))
            .await
    }

    /// Whether the caller follows `target_user_id`
    pub async fn check_follow_status(&self, target_user_id: u64) -> Result<Value> {
        self.query("checkFollowStatus", json!({ "targetUserId": target_user_id }))
            .await
    }

    /// Follower and following counts
    pub async fn get_follow_counts(&self, user_id: u64) -> Result<Value> {
        self.query("getFollowCounts", json!({ "userId": user_id }))
            .await
    }

    /// Users `user_id` follows
    pub async fn get_following(
        &self,
        user_id: u64,
        pagination: Pagination,
    ) -> Result<Value> {
        self.list("getFollowing", Some(user_id), pagination).await
    }

    /// Users following `user_id`
    pub async fn get_followers(
        &self,
        user_id: u64,
        pagination: Pagination,
    ) -> Result<Value> {
        self.list("getFollowers", Some(user_id), pagination).await
    }

    // ---- favorites ----

    /// Favorite an item
    pub async fn add_favorite(&self, target_type: TargetType, target: impl Into<Target>) -> Result<Value> {
        self.mutate("addFavorite", target_params(target_type, &target.into()))
            .await
    }

    /// Remove a favorite
    pub async fn remove_favorite(
        &self,
        target_type: TargetType,
        target: impl Into<Target>,
    ) -> Result<Value> {
        self.mutate("removeFavorite", target_params(target_type, &target.into()))
            .await
    }

    /// Whether the caller has favorited an item
    pub async fn check_favorite_status(
        &self,
        target_type: TargetType,
        target: impl Into<Target>,
    ) -> Result<Value> {
        self.query("checkFavorite", check_params(target_type, &target.into()))
            .await
    }

    /// The caller's favorites
    pub async fn get_my_favorites(&self, pagination: Pagination) -> Result<Value> {
        self.list("getMyFavorites", None, pagination).await
    }

    /// Agents favorited by `user_id`
    pub async fn get_user_favorite_agents(
        &self,
        user_id: u64,
        pagination: Pagination,
    ) -> Result<Value> {
        self.list("getUserFavoriteAgents", Some(user_id), pagination)
            .await
    }

    /// Plugins favorited by `user_id`
    pub async fn get_user_favorite_plugins(
        &self,
        user_id: u64,
        pagination: Pagination,
    ) -> Result<Value> {
        self.list("getUserFavoritePlugins", Some(user_id), pagination)
            .await
    }

    // ---- likes ----

    /// Like an item
    pub async fn like(&self, target_type: TargetType, target: impl Into<Target>) -> Result<Value> {
        self.mutate("like", target_params(target_type, &target.into()))
            .await
    }

    /// Remove a like
    pub async fn unlike(&self, target_type: TargetType, target: impl Into<Target>) -> Result<Value> {
        self.mutate("unlike", target_params(target_type, &target.into()))
            .await
    }

    /// Whether the caller has liked an item
    pub async fn check_like_status(
        &self,
        target_type: TargetType,
        target: impl Into<Target>,
    ) -> Result<Value> {
        self.query("checkLike", check_params(target_type, &target.into()))
            .await
    }

    /// Flip the caller's like on an item
    pub async fn toggle_like(
        &self,
        target_type: TargetType,
        target: impl Into<Target>,
    ) -> Result<Value> {
        self.mutate("toggleLike", target_params(target_type, &target.into()))
            .await
    }

    /// Agents liked by `user_id`
    pub async fn get_user_liked_agents(
        &self,
        user_id: u64,
        pagination: Pagination,
    ) -> Result<Value> {
        self.list("getUserLikedAgents", Some(user_id), pagination)
            .await
    }

    /// Plugins liked by `user_id`
    pub async fn get_user_liked_plugins(
        &self,
        user_id: u64,
        pagination: Pagination,
    ) -> Result<Value> {
        self.list("getUserLikedPlugins", Some(user_id), pagination)
            .await
    }

    async fn mutate(&self, procedure: &str, params: Value) -> Result<Value> {
        self.transport
            .call(CallKind::Mutation, procedure, params)
            .await
    }

    async fn query(&self, procedure: &str, params: Value) -> Result<Value> {
        self.transport
            .call(CallKind::Query, procedure, params)
            .await
    }

    async fn list(
        &self,
        procedure: &str,
        user_id: Option<u64>,
        pagination: Pagination,
    ) -> Result<Value> {
        self.query(procedure, self.list_params(user_id, pagination))
            .await
    }

    fn list_params(&self, user_id: Option<u64>, pagination: Pagination) -> Value {
        let (limit, offset) = pagination.to_limit_offset(self.default_page_size);

        let mut params = Map::new();
        if let Some(limit) = limit {
            params.insert("limit".to_string(), limit.into());
        }
        if let Some(offset) = offset {
            params.insert("offset".to_string(), offset.into());
        }
        if let Some(user_id) = user_id {
            params.insert("userId".to_string(), user_id.into());
        }
        Value::Object(params)
    }
}

/// `{targetType, targetId}` or `{targetType, identifier}`
fn target_params(target_type: TargetType, target: &Target) -> Value {
    match target {
        Target::Id(id) => json!({ "targetId": id, "targetType": target_type }),
        Target::Identifier(identifier) => {
            json!({ "identifier": identifier, "targetType": target_type })
        },
    }
}

/// `{targetType, targetIdOrIdentifier}`
fn check_params(target_type: TargetType, target: &Target) -> Value {
    json!({ "targetIdOrIdentifier": target.to_value(), "targetType": target_type })
}
