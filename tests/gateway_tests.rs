// SPDX-License-Identifier: MIT

//! Achievement gateway tests: listing headers, mutation body serialization,
//! owned-games listing and error propagation.

use chrono::{TimeZone, Utc};
use galaxy_achievements::error::AppError;
use galaxy_achievements::models::ProductCredential;
use galaxy_achievements::services::{AchievementGateway, ProductResolver, TokenManager};
use galaxy_achievements::store::CredentialStore;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{achievement_json, auth_record};

const PRODUCT_ID: u64 = 500;

/// Gateway over a store pre-seeded with the product's credentials and a
/// usable access token for its client, so only the gameplay endpoint is hit.
async fn seeded_gateway(server: &MockServer, dir: &std::path::Path) -> AchievementGateway {
    let store = CredentialStore::new(dir);
    store
        .save_product_credential(
            PRODUCT_ID,
            &ProductCredential {
                client_id: "ach_cid".to_string(),
                client_secret: "ach_sec".to_string(),
            },
        )
        .await
        .unwrap();
    store
        .save_token("ach_cid", auth_record("scoped_tok"), Utc::now())
        .await
        .unwrap();

    let http = reqwest::Client::new();
    let resolver = ProductResolver::new(http.clone(), server.uri(), store.clone());
    let tokens = TokenManager::new(http.clone(), server.uri(), store);
    AchievementGateway::new(http, server.uri(), server.uri(), "en", resolver, tokens)
}

#[tokio::test]
async fn lists_achievements_with_bearer_and_locale() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/clients/ach_cid/users/777/achievements"))
        .and(header("authorization", "Bearer sess_tok"))
        .and(header("X-Gog-Lc", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                achievement_json("ach_1", "First Blood", Some("2023-04-01T00:00:00+0000")),
                achievement_json("ach_2", "Completionist", None),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = seeded_gateway(&server, dir.path()).await;
    let achievements = gateway
        .list_achievements(PRODUCT_ID, "777", "sess_tok")
        .await
        .unwrap();

    assert_eq!(achievements.len(), 2);
    assert_eq!(achievements[0].achievement_id, "ach_1");
    assert!(achievements[1].date_unlocked.is_none());
}

#[tokio::test]
async fn relock_serializes_null_date() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/clients/ach_cid/users/777/achievements/ach_1"))
        .and(header("authorization", "Bearer scoped_tok"))
        .and(body_json(json!({"date_unlocked": null})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = seeded_gateway(&server, dir.path()).await;
    gateway
        .set_achievement_unlocked(PRODUCT_ID, "777", "ach_1", "rt", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn unlock_serializes_numeric_offset_timestamp() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/clients/ach_cid/users/777/achievements/ach_2"))
        .and(body_json(
            json!({"date_unlocked": "2023-05-01T10:30:00.000+0000"}),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = seeded_gateway(&server, dir.path()).await;
    let unlocked_at = Utc.with_ymd_and_hms(2023, 5, 1, 10, 30, 0).unwrap();
    gateway
        .set_achievement_unlocked(PRODUCT_ID, "777", "ach_2", "rt", Some(unlocked_at))
        .await
        .unwrap();
}

#[tokio::test]
async fn rejected_mutation_carries_status_and_body() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/clients/ach_cid/users/777/achievements/ach_1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("not allowed"))
        .mount(&server)
        .await;

    let gateway = seeded_gateway(&server, dir.path()).await;
    let err = gateway
        .set_achievement_unlocked(PRODUCT_ID, "777", "ach_1", "rt", None)
        .await
        .unwrap_err();

    match err {
        AppError::Upstream { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "not allowed");
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn lists_owned_game_ids() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/user/data/games"))
        .and(header("authorization", "Bearer sess_tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"owned": [10, 20, 30]})))
        .mount(&server)
        .await;

    let gateway = seeded_gateway(&server, dir.path()).await;
    let owned = gateway.list_owned_game_ids("sess_tok").await.unwrap();
    assert_eq!(owned, vec![10, 20, 30]);
}

#[tokio::test]
async fn owned_games_failure_is_upstream_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/user/data/games"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let gateway = seeded_gateway(&server, dir.path()).await;
    let err = gateway.list_owned_game_ids("sess_tok").await.unwrap_err();
    assert!(matches!(err, AppError::Upstream { status: 500, .. }));
}
