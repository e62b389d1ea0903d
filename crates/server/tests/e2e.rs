use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, ServerState};
use service::{resource::ResourceService, storage::JsonResourceStore};

struct TestApp {
    base_url: String,
}

/// Boot the router on an ephemeral port with an isolated data file per test.
async fn start_server() -> anyhow::Result<TestApp> {
    let data_path = format!("target/test-data/{}/resources.json", Uuid::new_v4());
    let store = JsonResourceStore::new(&data_path).await?;
    let state = ServerState { resources: Arc::new(ResourceService::new(store)) };

    let app: Router = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_get_delete_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Create
    let res = c
        .post(format!("{}/resources", app.base_url))
        .json(&json!({"title": "Dune", "author": "Herbert"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(created["id"], 1);
    assert_eq!(created["title"], "Dune");
    assert_eq!(created["author"], "Herbert");

    // Read back
    let res = c.get(format!("{}/resources/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched, created);

    // Delete
    let res = c.delete(format!("{}/resources/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    // Gone, with the typed error body
    let res = c.get(format!("{}/resources/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "NotFound");
    assert_eq!(body["message"], "Resource with id 1 not found");
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_create_is_400() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/resources", app.base_url))
        .json(&json!({"title": "  ", "author": "Herbert"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "InvalidInput");
    assert!(body["message"].as_str().unwrap().contains("title"));
    Ok(())
}

#[tokio::test]
async fn e2e_structurally_malformed_create_is_400() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Missing required field never reaches the handler body; the rejection
    // must still wear the typed error shape, not a plain-text 422.
    let res = c
        .post(format!("{}/resources", app.base_url))
        .json(&json!({"author": "Herbert"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "InvalidInput");
    assert!(body["message"].as_str().unwrap().contains("title"));

    // Broken JSON syntax gets the same treatment.
    let res = c
        .post(format!("{}/resources", app.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "InvalidInput");
    Ok(())
}

#[tokio::test]
async fn e2e_put_merges_partial_payload() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/resources", app.base_url))
        .json(&json!({"title": "Dune", "author": "Herbert", "price": 12.5, "stock": 3}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c
        .put(format!("{}/resources/1", app.base_url))
        .json(&json!({"title": "Dune Messiah"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["title"], "Dune Messiah");
    assert_eq!(updated["author"], "Herbert");
    assert_eq!(updated["price"], 12.5);
    assert_eq!(updated["stock"], 3);

    // PUT on an absent id must not upsert
    let res = c
        .put(format!("{}/resources/99", app.base_url))
        .json(&json!({"title": "Ghost"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "NotFound");
    assert_eq!(body["message"], "Resource with id 99 not found");
    Ok(())
}

#[tokio::test]
async fn e2e_delete_absent_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().delete(format!("{}/resources/7", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "NotFound");
    Ok(())
}

#[tokio::test]
async fn e2e_list_with_and_without_pagination() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for i in 1..=5 {
        let res = c
            .post(format!("{}/resources", app.base_url))
            .json(&json!({"title": format!("Book {}", i), "author": "Author"}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let res = c.get(format!("{}/resources", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let all = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(all.len(), 5);

    let res = c
        .get(format!("{}/resources?page=2&per_page=2", app.base_url))
        .send()
        .await?;
    let page = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["id"], 3);
    Ok(())
}
