//! Social service parameter-shaping tests.
//!
//! A recording transport captures each call so the tests can check the exact
//! procedure name, call kind and JSON input the service forwards.

use std::collections::VecDeque;
use std::sync::Mutex;

use compass::error::CompassError;
use compass::social::{
    parse_result, CallKind, FavoriteStatus, FollowCounts, FollowStatus, LikeStatus, Paginated,
    Pagination, SocialService, SocialTransport, TargetType, ToggleLikeResult, TransportFuture,
};
use serde_json::{json, Value};

#[derive(Default)]
struct RecordingTransport {
    calls: Mutex<Vec<(CallKind, String, Value)>>,
    responses: Mutex<VecDeque<Value>>,
}

impl RecordingTransport {
    fn respond(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    fn last_call(&self) -> (CallKind, String, Value) {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }
}

impl SocialTransport for RecordingTransport {
    fn call(&self, kind: CallKind, procedure: &str, params: Value) -> TransportFuture<'_> {
        self.calls
            .lock()
            .unwrap()
            .push((kind, procedure.to_string(), params));
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Value::Null);
        Box::pin(async move { Ok(response) })
    }
}

fn empty_page() -> Value {
    json!({
        "currentPage": 1,
        "items": [],
        "pageSize": 10,
        "totalCount": 0,
        "totalPages": 0
    })
}

/// Test follow and unfollow send followingId as mutations
#[tokio::test]
async fn test_follow_unfollow() {
    let service = SocialService::new(RecordingTransport::default());

    service.follow(123).await.unwrap();
    let (kind, procedure, params) = service.transport().last_call();
    assert_eq!(kind, CallKind::Mutation);
    assert_eq!(procedure, "follow");
    assert_eq!(params, json!({"followingId": 123}));

    service.unfollow(456).await.unwrap();
    let (_, procedure, params) = service.transport().last_call();
    assert_eq!(procedure, "unfollow");
    assert_eq!(params, json!({"followingId": 456}));
}

/// Test follow status query and typed result
#[tokio::test]
async fn test_check_follow_status() {
    let transport =
        RecordingTransport::default().respond(json!({"isFollowing": true, "isMutual": true}));
    let service = SocialService::new(transport);

    let status: FollowStatus = parse_result(service.check_follow_status(789).await.unwrap()).unwrap();
    assert!(status.is_following);
    assert!(status.is_mutual);

    let (kind, procedure, params) = service.transport().last_call();
    assert_eq!(kind, CallKind::Query);
    assert_eq!(procedure, "checkFollowStatus");
    assert_eq!(params, json!({"targetUserId": 789}));
}

/// Test follow counts
#[tokio::test]
async fn test_get_follow_counts() {
    let transport =
        RecordingTransport::default().respond(json!({"followersCount": 50, "followingCount": 30}));
    let service = SocialService::new(transport);

    let counts: FollowCounts = parse_result(service.get_follow_counts(999).await.unwrap()).unwrap();
    assert_eq!(counts.followers_count, 50);
    assert_eq!(counts.following_count, 30);
    assert_eq!(service.transport().last_call().2, json!({"userId": 999}));
}

/// Test list calls without pagination send only the user id
#[tokio::test]
async fn test_lists_without_pagination() {
    let transport = RecordingTransport::default()
        .respond(empty_page())
        .respond(empty_page())
        .respond(empty_page());
    let service = SocialService::new(transport);

    let page: Paginated<Value> = parse_result(
        service
            .get_following(111, Pagination::default())
            .await
            .unwrap(),
    )
    .unwrap();
    assert_eq!(page.page_size, 10);
    assert_eq!(service.transport().last_call().2, json!({"userId": 111}));

    service
        .get_user_favorite_agents(111, Pagination::default())
        .await
        .unwrap();
    assert_eq!(
        service.transport().last_call().1,
        "getUserFavoriteAgents"
    );

    service.get_my_favorites(Pagination::default()).await.unwrap();
    assert_eq!(service.transport().last_call().2, json!({}));
}

/// Test pagination is translated to limit/offset
#[tokio::test]
async fn test_pagination_translation() {
    let mut transport = RecordingTransport::default();
    for _ in 0..8 {
        transport = transport.respond(empty_page());
    }
    let service = SocialService::new(transport);

    service
        .get_following(222, Pagination::new(2, 20))
        .await
        .unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"limit": 20, "offset": 20, "userId": 222})
    );

    service.get_following(333, Pagination::page(3)).await.unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"offset": 20, "userId": 333})
    );

    service
        .get_followers(555, Pagination::new(5, 15))
        .await
        .unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"limit": 15, "offset": 60, "userId": 555})
    );

    service
        .get_my_favorites(Pagination::new(2, 25))
        .await
        .unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"limit": 25, "offset": 25})
    );

    service
        .get_user_favorite_agents(222, Pagination::new(3, 10))
        .await
        .unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"limit": 10, "offset": 20, "userId": 222})
    );

    service
        .get_user_favorite_plugins(444, Pagination::new(4, 5))
        .await
        .unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"limit": 5, "offset": 15, "userId": 444})
    );

    service
        .get_user_liked_agents(666, Pagination::new(2, 12))
        .await
        .unwrap();
    assert_eq!(
        service.transport().last_call(),
        (
            CallKind::Query,
            "getUserLikedAgents".to_string(),
            json!({"limit": 12, "offset": 12, "userId": 666})
        )
    );

    service
        .get_user_liked_plugins(888, Pagination::new(6, 8))
        .await
        .unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"limit": 8, "offset": 40, "userId": 888})
    );
}

/// Test a custom default page size drives the offset
#[tokio::test]
async fn test_custom_default_page_size() {
    let transport = RecordingTransport::default().respond(empty_page());
    let service = SocialService::new(transport).with_default_page_size(25);

    service.get_following(1, Pagination::page(3)).await.unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"offset": 50, "userId": 1})
    );
}

/// Test favorites with numeric ids and string identifiers
#[tokio::test]
async fn test_favorites() {
    let transport = RecordingTransport::default()
        .respond(Value::Null)
        .respond(Value::Null)
        .respond(Value::Null)
        .respond(json!({"isFavorited": true}))
        .respond(json!({"isFavorited": false}));
    let service = SocialService::new(transport);

    service.add_favorite(TargetType::Agent, 123_u64).await.unwrap();
    assert_eq!(
        service.transport().last_call(),
        (
            CallKind::Mutation,
            "addFavorite".to_string(),
            json!({"targetId": 123, "targetType": "agent"})
        )
    );

    service
        .add_favorite(TargetType::Plugin, "my-plugin-identifier")
        .await
        .unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"identifier": "my-plugin-identifier", "targetType": "plugin"})
    );

    service
        .remove_favorite(TargetType::Plugin, "another-plugin")
        .await
        .unwrap();
    assert_eq!(service.transport().last_call().1, "removeFavorite");

    let status: FavoriteStatus = parse_result(
        service
            .check_favorite_status(TargetType::Agent, 789_u64)
            .await
            .unwrap(),
    )
    .unwrap();
    assert!(status.is_favorited);
    assert_eq!(
        service.transport().last_call(),
        (
            CallKind::Query,
            "checkFavorite".to_string(),
            json!({"targetIdOrIdentifier": 789, "targetType": "agent"})
        )
    );

    let status = service
        .check_favorite_status(TargetType::Plugin, "test-identifier")
        .await
        .unwrap();
    assert_eq!(status, json!({"isFavorited": false}));
    assert_eq!(
        service.transport().last_call().2,
        json!({"targetIdOrIdentifier": "test-identifier", "targetType": "plugin"})
    );
}

/// Test likes
#[tokio::test]
async fn test_likes() {
    let transport = RecordingTransport::default()
        .respond(Value::Null)
        .respond(Value::Null)
        .respond(json!({"isLiked": true}))
        .respond(json!({"liked": false}));
    let service = SocialService::new(transport);

    service.like(TargetType::Agent, 123_u64).await.unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"targetId": 123, "targetType": "agent"})
    );

    service.unlike(TargetType::Plugin, "some-plugin").await.unwrap();
    assert_eq!(
        service.transport().last_call(),
        (
            CallKind::Mutation,
            "unlike".to_string(),
            json!({"identifier": "some-plugin", "targetType": "plugin"})
        )
    );

    let status: LikeStatus = parse_result(
        service
            .check_like_status(TargetType::Agent, 789_u64)
            .await
            .unwrap(),
    )
    .unwrap();
    assert!(status.is_liked);
    assert_eq!(service.transport().last_call().1, "checkLike");

    let toggled: ToggleLikeResult = parse_result(
        service
            .toggle_like(TargetType::Plugin, "toggle-plugin")
            .await
            .unwrap(),
    )
    .unwrap();
    assert!(!toggled.liked);
    assert_eq!(
        service.transport().last_call(),
        (
            CallKind::Mutation,
            "toggleLike".to_string(),
            json!({"identifier": "toggle-plugin", "targetType": "plugin"})
        )
    );
}

/// Test mutation results are returned unmodified
#[tokio::test]
async fn test_results_pass_through() {
    let transport = RecordingTransport::default().respond(json!({"ok": true, "extra": [1, 2]}));
    let service = SocialService::new(transport);

    let result = service.follow(1).await.unwrap();
    assert_eq!(result, json!({"ok": true, "extra": [1, 2]}));
}

/// Test query results keep fields the typed views do not know
#[tokio::test]
async fn test_query_results_pass_through() {
    let status = json!({"isFollowing": true, "isMutual": false, "followedAt": "2024-01-01"});
    let page = json!({"items": [], "totalCount": 0, "hasMore": false});
    let transport = RecordingTransport::default()
        .respond(status.clone())
        .respond(page.clone());
    let service = SocialService::new(transport);

    assert_eq!(service.check_follow_status(1).await.unwrap(), status);
    assert_eq!(
        service
            .get_following(1, Pagination::default())
            .await
            .unwrap(),
        page
    );
}

/// Test reading an unexpected shape as a typed view is a JSON error
#[tokio::test]
async fn test_typed_view_of_unexpected_shape() {
    let transport = RecordingTransport::default().respond(json!({"unexpected": 1}));
    let service = SocialService::new(transport);

    let raw = service.check_like_status(TargetType::Agent, 1_u64).await.unwrap();
    assert_eq!(raw, json!({"unexpected": 1}));

    let err = parse_result::<LikeStatus>(raw).unwrap_err();
    assert!(matches!(err, CompassError::Json(_)));
}

/// Test very large page numbers produce the exact offset
#[tokio::test]
async fn test_large_page_offset() {
    let transport = RecordingTransport::default().respond(empty_page());
    let service = SocialService::new(transport);

    service
        .get_followers(7, Pagination::page(500_000_000))
        .await
        .unwrap();
    assert_eq!(
        service.transport().last_call().2,
        json!({"offset": 4_999_999_990_u64, "userId": 7})
    );
}
