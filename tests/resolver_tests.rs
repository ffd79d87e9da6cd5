// SPDX-License-Identifier: MIT

//! Product resolver tests: build selection over the wire, credential
//! caching, and build-id precision.

use galaxy_achievements::error::AppError;
use galaxy_achievements::services::ProductResolver;
use galaxy_achievements::store::CredentialStore;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::build_detail_json;

fn resolver(server: &MockServer, dir: &std::path::Path) -> ProductResolver {
    ProductResolver::new(
        reqwest::Client::new(),
        server.uri(),
        CredentialStore::new(dir),
    )
}

#[tokio::test]
async fn resolves_latest_build_and_caches_permanently() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/products/12345/product.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "builds": [
                {"id": 1, "date_published": "2023-01-01", "listed": true},
                {"id": 2, "date_published": "2023-06-01", "listed": false},
                {"id": 3, "date_published": "2023-06-01", "listed": true},
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Build 2 has the same date but is unlisted; 3 must win.
    Mock::given(method("GET"))
        .and(path("/products/12345/builds/3.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(build_detail_json("cid_123", "sec_123")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver(&server, dir.path());

    let first = resolver.resolve_credentials(12345).await.unwrap();
    assert_eq!(first.client_id, "cid_123");
    assert_eq!(first.client_secret, "sec_123");

    // Second call must not issue any network request (expect(1) above) and
    // must return the identical credentials.
    let second = resolver.resolve_credentials(12345).await.unwrap();
    assert_eq!(second, first);

    // A fresh resolver over the same cache dir is served from products.json.
    let fresh = ProductResolver::new(
        reqwest::Client::new(),
        server.uri(),
        CredentialStore::new(dir.path()),
    );
    assert_eq!(fresh.resolve_credentials(12345).await.unwrap(), first);
}

#[tokio::test]
async fn no_valid_build_is_product_not_found() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/products/77/product.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "builds": [
                {"id": 1, "date_published": "2023-01-01", "listed": false},
                {"id": 2, "listed": true},
            ]
        })))
        .mount(&server)
        .await;

    let err = resolver(&server, dir.path())
        .resolve_credentials(77)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound(77)));
}

#[tokio::test]
async fn upstream_failure_is_propagated_with_status() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/products/88/product.json"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = resolver(&server, dir.path())
        .resolve_credentials(88)
        .await
        .unwrap_err();
    match err {
        AppError::Upstream { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn build_ids_beyond_2_pow_53_keep_exact_precision() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    // 2^53 + 1: a float round-trip would turn this into ...992.
    Mock::given(method("GET"))
        .and(path("/products/5/product.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "builds": [
                {"id": 9007199254740993u64, "date_published": "2024-01-01", "listed": true},
            ]
        })))
        .mount(&server)
        .await;

    // The mock only matches the exact decimal form of the id.
    Mock::given(method("GET"))
        .and(path("/products/5/builds/9007199254740993.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(build_detail_json("cid_5", "sec_5")))
        .expect(1)
        .mount(&server)
        .await;

    let credential = resolver(&server, dir.path())
        .resolve_credentials(5)
        .await
        .unwrap();
    assert_eq!(credential.client_id, "cid_5");
}
