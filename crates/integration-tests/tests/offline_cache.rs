//! Offline cache gateway scenarios.
//!
//! Drives the gateway through its install → activate → serve lifecycle
//! against a scripted origin, then pulls the network out.

use axum::http::Method;

use saka_integration_tests::{ScriptedUpstream, asset};
use saka_storefront::gateway::{
    APP_SHELL, CacheGateway, CachePurpose, GatewayError, GenerationConfig, STATIC_GENERATION,
};

fn shell_upstream() -> ScriptedUpstream {
    let mut entries: Vec<(&str, _)> = APP_SHELL
        .iter()
        .map(|target| (*target, asset("<html>shell</html>", "text/html")))
        .collect();
    entries.push((
        "/assets/data/cards.json",
        asset(r#"{"packaging":[]}"#, "application/json"),
    ));
    entries.push(("/assets/img/starter.webp", asset("img", "image/webp")));
    ScriptedUpstream::serving(&entries)
}

async fn installed_gateway() -> CacheGateway<ScriptedUpstream> {
    let gateway = CacheGateway::new(shell_upstream());
    gateway.install().await.expect("install against a live origin");
    gateway.activate().await;
    gateway
}

#[tokio::test]
async fn test_full_lifecycle_then_offline() {
    let gateway = installed_gateway().await;

    // Warm one gallery image through the cache-first path.
    gateway
        .serve(&Method::GET, "/assets/img/starter.webp")
        .await
        .expect("live fetch");

    gateway.upstream().go_offline();

    // The whole app shell still serves from the static generation.
    let response = gateway.serve(&Method::GET, "/index.html").await.expect("cached shell");
    assert_eq!(response.body.as_ref(), b"<html>shell</html>");

    let response = gateway
        .serve(&Method::GET, "/assets/img/starter.webp")
        .await
        .expect("cached image");
    assert_eq!(response.body.as_ref(), b"img");
}

#[tokio::test]
async fn test_catalog_requests_never_touch_the_cache() {
    let gateway = installed_gateway().await;
    let target = "/assets/data/cards.json?t=1700000000000";

    // Even with an entry seeded for the exact URL, the request goes out.
    gateway
        .cache()
        .put(&STATIC_GENERATION, target, asset("stale pricing", "application/json"))
        .await;

    let before = gateway.upstream().fetch_count();
    let result = gateway.serve(&Method::GET, target).await;
    assert!(result.is_err(), "scripted origin has no query-string entry");
    assert_eq!(gateway.upstream().fetch_count(), before + 1);

    // Offline, the catalog request fails rather than serving stale data.
    gateway.upstream().go_offline();
    let result = gateway.serve(&Method::GET, "/assets/data/cards.json").await;
    assert!(matches!(result, Err(GatewayError::Fetch(_))));
}

#[tokio::test]
async fn test_offline_with_empty_cache_yields_no_response() {
    let gateway = CacheGateway::new(ScriptedUpstream::default());
    gateway.activate().await;

    let result = gateway.serve(&Method::GET, "/index.html").await;
    assert!(matches!(result, Err(GatewayError::Offline)));

    let result = gateway.serve(&Method::GET, "/assets/img/starter.webp").await;
    assert!(matches!(result, Err(GatewayError::Offline)));
}

#[tokio::test]
async fn test_version_bump_evicts_previous_generation() {
    let gateway = CacheGateway::new(shell_upstream());

    // A cache left behind by the previous deploy.
    let previous = GenerationConfig {
        name: "saka-static-v2",
        purpose: CachePurpose::Static,
        max_age: STATIC_GENERATION.max_age,
    };
    gateway
        .cache()
        .put(&previous, "/index.html", asset("old shell", "text/html"))
        .await;

    gateway.install().await.expect("install against a live origin");
    gateway.activate().await;

    let names = gateway.cache().generation_names().await;
    assert!(!names.contains(&"saka-static-v2".to_string()));
    assert!(names.contains(&STATIC_GENERATION.name.to_string()));

    // The swept copy is gone; the fresh shell serves instead.
    gateway.upstream().go_offline();
    let response = gateway.serve(&Method::GET, "/index.html").await.expect("cached shell");
    assert_eq!(response.body.as_ref(), b"<html>shell</html>");
}
