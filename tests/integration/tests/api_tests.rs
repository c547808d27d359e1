//! API Integration Tests
//!
//! Each test spawns the full router over the in-memory store with a manual
//! clock; no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::Duration;
use integration_tests::{assert_json, assert_status, fixtures::*, test_config, TestServer};
use reqwest::StatusCode;

async fn post_message(server: &TestServer, token: Option<&str>, content: &str) -> MessageBody {
    let response = server
        .post("/api/v1/messages", token, &CreateMessageRequest::new(content))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn list_messages(server: &TestServer, token: Option<&str>) -> Vec<EnrichedMessageBody> {
    let response = server.get("/api/v1/messages", token).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn react(
    server: &TestServer,
    token: &str,
    message_id: &str,
    request: &ReactRequest,
) -> ReactionSummaryBody {
    let response = server
        .post(
            &format!("/api/v1/messages/{message_id}/reactions"),
            Some(token),
            request,
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn reminders(server: &TestServer, token: &str) -> Vec<ReminderBody> {
    let response = server
        .get("/api/v1/dashboard/reminders", Some(token))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health", None).await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready", None).await.expect("Request failed");
    let body: ReadinessBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "ready");
    assert_eq!(body.backend, "memory");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/messages", None).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Message Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_message_vanishes_after_24_hours() {
    let server = TestServer::start().await.unwrap();

    let posted = post_message(&server, None, "hello").await;
    assert_eq!(posted.expires_at - posted.created_at, Duration::hours(24));
    assert!(posted.author_id.is_none());

    server.advance(Duration::hours(1));
    let listed = list_messages(&server, None).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].message.content, "hello");
    assert_eq!(listed[0].message.remaining_seconds, 23 * 3600);

    server.advance(Duration::hours(23) + Duration::seconds(1));
    assert!(list_messages(&server, None).await.is_empty());

    // Still stored until the sweeper runs
    assert_eq!(server.store.message_count(), 1);
    let removed = server.sweeper().sweep_once().await.unwrap();
    assert!(removed >= 1);
    assert_eq!(server.store.message_count(), 0);
}

#[tokio::test]
async fn test_content_length_bounds() {
    let server = TestServer::start().await.unwrap();

    for len in [1, 500] {
        let response = server
            .post("/api/v1/messages", None, &CreateMessageRequest::of_length(len))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    for len in [0, 501] {
        let response = server
            .post("/api/v1/messages", None, &CreateMessageRequest::of_length(len))
            .await
            .unwrap();
        let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(body.error.code, "VALIDATION_ERROR");
    }

    assert_eq!(server.store.message_count(), 2);
}

#[tokio::test]
async fn test_signed_in_post_records_author() {
    let server = TestServer::start().await.unwrap();
    let user = unique_user_id();
    let token = server.token_for(user).unwrap();

    let posted = post_message(&server, Some(&token), "mine").await;
    assert_eq!(posted.author_id, Some(user.to_string()));
    assert!((posted.remaining_fraction - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_listing_is_newest_first() {
    let server = TestServer::start().await.unwrap();

    post_message(&server, None, "first").await;
    server.advance(Duration::seconds(5));
    post_message(&server, None, "second").await;
    server.advance(Duration::seconds(5));
    post_message(&server, None, "third").await;

    let contents: Vec<String> = list_messages(&server, None)
        .await
        .into_iter()
        .map(|m| m.message.content)
        .collect();
    assert_eq!(contents, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_delete_message() {
    let server = TestServer::start().await.unwrap();
    let posted = post_message(&server, None, "short lived").await;

    let response = server
        .delete(&format!("/api/v1/messages/{}", posted.id), None)
        .await
        .unwrap();
    let body: SuccessBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);
    assert!(list_messages(&server, None).await.is_empty());

    let response = server.delete("/api/v1/messages/999999", None).await.unwrap();
    let body: SuccessBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.success);

    let response = server.delete("/api/v1/messages/abc", None).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_scenario() {
    let server = TestServer::start().await.unwrap();
    let alice = server.token_for(unique_user_id()).unwrap();
    let bob = server.token_for(unique_user_id()).unwrap();
    let message = post_message(&server, None, "M").await;

    assert_eq!(
        react(&server, &alice, &message.id, &ReactRequest::like()).await,
        ReactionSummaryBody::expect(1, 0, "like")
    );
    assert_eq!(
        react(&server, &alice, &message.id, &ReactRequest::dislike()).await,
        ReactionSummaryBody::expect(0, 1, "dislike")
    );
    assert_eq!(
        react(&server, &bob, &message.id, &ReactRequest::like()).await,
        ReactionSummaryBody::expect(1, 1, "like")
    );

    let as_alice = list_messages(&server, Some(&alice)).await;
    assert_eq!((as_alice[0].likes, as_alice[0].dislikes), (1, 1));
    assert_eq!(as_alice[0].user_reaction.as_deref(), Some("dislike"));

    let anonymous = list_messages(&server, None).await;
    assert_eq!(anonymous[0].user_reaction, None);
}

#[tokio::test]
async fn test_reaction_requires_auth() {
    let server = TestServer::start().await.unwrap();
    let message = post_message(&server, None, "M").await;
    let path = format!("/api/v1/messages/{}/reactions", message.id);

    let response = server.post(&path, None, &ReactRequest::like()).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "UNAUTHORIZED");

    let response = server
        .post(&path, Some("not-a-jwt"), &ReactRequest::like())
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_reaction_on_missing_or_expired_message() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(unique_user_id()).unwrap();

    let response = server
        .post(
            "/api/v1/messages/999999/reactions",
            Some(&token),
            &ReactRequest::like(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let message = post_message(&server, None, "M").await;
    server.advance(Duration::hours(24));
    let response = server
        .post(
            &format!("/api/v1/messages/{}/reactions", message.id),
            Some(&token),
            &ReactRequest::like(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_reaction_rejects_unknown_kind() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(unique_user_id()).unwrap();
    let message = post_message(&server, None, "M").await;

    let response = server
        .post(
            &format!("/api/v1/messages/{}/reactions", message.id),
            Some(&token),
            &serde_json::json!({ "kind": "love" }),
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_BODY");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reactions_over_http() {
    let server = TestServer::start().await.unwrap();
    let message = post_message(&server, None, "popular").await;
    let path = format!("/api/v1/messages/{}/reactions", message.id);

    let mut tasks = tokio::task::JoinSet::new();
    for n in 0..15 {
        let token = server.token_for(unique_user_id()).unwrap();
        let request = server
            .client
            .post(format!("{}{}", server.base_url(), path))
            .bearer_auth(token)
            .json(&if n < 10 {
                ReactRequest::like()
            } else {
                ReactRequest::dislike()
            });
        tasks.spawn(async move { request.send().await });
    }
    while let Some(result) = tasks.join_next().await {
        assert_eq!(result.unwrap().unwrap().status(), StatusCode::OK);
    }

    let listed = list_messages(&server, None).await;
    assert_eq!((listed[0].likes, listed[0].dislikes), (10, 5));
}

#[tokio::test]
async fn test_deleted_message_takes_reactions_with_it() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(unique_user_id()).unwrap();
    let message = post_message(&server, None, "M").await;

    react(&server, &token, &message.id, &ReactRequest::like()).await;
    assert_eq!(server.store.reaction_count(), 1);

    server
        .delete(&format!("/api/v1/messages/{}", message.id), None)
        .await
        .unwrap();
    assert_eq!(server.store.reaction_count(), 0);
}

// ============================================================================
// Dashboard Tests
// ============================================================================

#[tokio::test]
async fn test_dashboard_requires_auth() {
    let server = TestServer::start().await.unwrap();

    for path in [
        "/api/v1/dashboard/messages",
        "/api/v1/dashboard/preferences",
        "/api/v1/dashboard/reminders",
    ] {
        let response = server.get(path, None).await.unwrap();
        let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(body.error.code, "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_anonymous_caller_gets_one_error_code() {
    let server = TestServer::start().await.unwrap();
    let message = post_message(&server, None, "M").await;

    let response = server
        .post(
            &format!("/api/v1/messages/{}/reactions", message.id),
            None,
            &ReactRequest::like(),
        )
        .await
        .unwrap();
    let from_service: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get("/api/v1/dashboard/messages", None).await.unwrap();
    let from_extractor: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(from_service.error.code, from_extractor.error.code);
}

#[tokio::test]
async fn test_preferences_defaults_and_bounds() {
    let server = TestServer::start().await.unwrap();
    let user = unique_user_id();
    let token = server.token_for(user).unwrap();

    let response = server
        .get("/api/v1/dashboard/preferences", Some(&token))
        .await
        .unwrap();
    let prefs: PreferencesBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(prefs.user_id, user.to_string());
    assert!(prefs.notifications_enabled);
    assert_eq!(prefs.notify_before_minutes, 60);

    for minutes in [0, 2000] {
        let response = server
            .put(
                "/api/v1/dashboard/preferences",
                Some(&token),
                &UpdatePreferencesRequest::new(true, minutes),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    }

    for minutes in [5, 60, 1440] {
        let response = server
            .put(
                "/api/v1/dashboard/preferences",
                Some(&token),
                &UpdatePreferencesRequest::new(false, minutes),
            )
            .await
            .unwrap();
        let body: SuccessBody = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(body.success);
    }

    let response = server
        .get("/api/v1/dashboard/preferences", Some(&token))
        .await
        .unwrap();
    let prefs: PreferencesBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!prefs.notifications_enabled);
    assert_eq!(prefs.notify_before_minutes, 1440);
}

#[tokio::test]
async fn test_dashboard_history_includes_expired_until_swept() {
    let server = TestServer::start().await.unwrap();
    let user = unique_user_id();
    let token = server.token_for(user).unwrap();

    post_message(&server, Some(&token), "old").await;
    server.advance(Duration::hours(25));
    post_message(&server, Some(&token), "new").await;
    post_message(&server, None, "not mine").await;

    let response = server
        .get("/api/v1/dashboard/messages", Some(&token))
        .await
        .unwrap();
    let history: Vec<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["new", "old"]);
    assert_eq!(history[1].remaining_seconds, 0);

    server.sweeper().sweep_once().await.unwrap();
    let response = server
        .get("/api/v1/dashboard/messages", Some(&token))
        .await
        .unwrap();
    let history: Vec<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_reminders_follow_preferences() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(unique_user_id()).unwrap();

    let posted = post_message(&server, Some(&token), "remind me").await;
    server
        .put(
            "/api/v1/dashboard/preferences",
            Some(&token),
            &UpdatePreferencesRequest::new(true, 120),
        )
        .await
        .unwrap();

    server.advance(Duration::hours(21));
    assert!(reminders(&server, &token).await.is_empty());

    server.advance(Duration::hours(1) + Duration::minutes(30));
    let due = reminders(&server, &token).await;
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].message.id, posted.id);
    assert_eq!(due[0].remind_at, posted.expires_at - Duration::hours(2));
    assert_eq!(due[0].preview, "remind me");

    // Gone once the message expires
    server.advance(Duration::hours(2));
    assert!(reminders(&server, &token).await.is_empty());
}

// ============================================================================
// Rate Limiting Tests
// ============================================================================

#[tokio::test]
async fn test_rate_limit_spares_health_probes() {
    let config = test_config(&[
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1"),
        ("RATE_LIMIT_BURST", "2"),
    ])
    .unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();

    let mut statuses = Vec::new();
    for _ in 0..5 {
        statuses.push(server.get("/api/v1/messages", None).await.unwrap().status());
    }
    assert!(statuses.contains(&StatusCode::TOO_MANY_REQUESTS));

    let response = server.get("/health", None).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_rate_limit_refills_at_configured_rate() {
    let config = test_config(&[
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "4"),
        ("RATE_LIMIT_BURST", "1"),
    ])
    .unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();

    let response = server.get("/api/v1/messages", None).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = server.get("/api/v1/messages", None).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // One token per 250ms at 4 requests per second
    tokio::time::sleep(std::time::Duration::from_millis(400)).await;
    let response = server.get("/api/v1/messages", None).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
