//! End-to-end tests against a live server.

use reqwest::StatusCode;
use serde_json::{json, Value};

use items_api::config::AppConfig;

mod common;

#[tokio::test]
async fn test_item_lifecycle() {
    let app = common::spawn_default_app().await;
    let client = reqwest::Client::new();

    for text in ["first", "second", "third"] {
        let res = client
            .post(app.url("/items/"))
            .json(&json!({ "text": text }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({ "text": text, "is_done": false }));
    }

    let list: Value = client
        .get(app.url("/items/?limit=2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["text"], "first");

    let list: Value = client
        .get(app.url("/items/?limit=-1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list, json!([
        { "text": "first", "is_done": false },
        { "text": "second", "is_done": false },
    ]));

    // Index 0 is never addressable.
    let res = client.get(app.url("/items/0")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Item not found" }));

    let res = client.get(app.url("/items/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["text"], "second");

    let res = client
        .patch(app.url("/items/1"))
        .json(&json!({ "text": "changed", "is_done": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["text"], "second");

    let res = client.delete(app.url("/items/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = client
        .delete(app.url("/items/1"))
        .json(&json!({ "text": "second" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let body: Value = client
        .get(app.url("/items/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["text"], "third");

    let res = client
        .delete(app.url("/items/5"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    assert_eq!(app.state.sessions.active(), 0);
}

#[tokio::test]
async fn test_invalid_item_id_is_422() {
    let app = common::spawn_default_app().await;

    let res = reqwest::get(app.url("/items/abc")).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["detail"][0]["type"], "int_parsing");
}

#[tokio::test]
async fn test_every_response_has_process_time() {
    let app = common::spawn_default_app().await;

    for path in ["/", "/items/", "/missing", "/items/abc"] {
        let res = reqwest::get(app.url(path)).await.unwrap();
        let value = res
            .headers()
            .get("x-process-time")
            .unwrap_or_else(|| panic!("missing header on {path}"))
            .to_str()
            .unwrap()
            .to_string();
        let seconds: f64 = value.parse().unwrap();
        assert!(seconds >= 0.0);
    }
}

#[tokio::test]
async fn test_request_id_generated_and_propagated() {
    let app = common::spawn_default_app().await;
    let client = reqwest::Client::new();

    let res = client.get(app.url("/")).send().await.unwrap();
    let generated = res.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(generated.len(), 36);

    let res = client
        .get(app.url("/"))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), "req-123");
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = common::spawn_default_app().await;
    let client = reqwest::Client::new();

    let res = client
        .request(reqwest::Method::OPTIONS, app.url("/items/"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    let headers = res.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
    assert!(headers.get("x-process-time").is_some());

    let res = client
        .request(reqwest::Method::OPTIONS, app.url("/items/"))
        .header("origin", "http://evil.example")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert!(res.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_cors_origins_from_config() {
    let mut config = AppConfig::default();
    config.cors.allowed_origins = vec!["https://app.example".into()];
    let app = common::spawn_app(config).await;

    let res = reqwest::Client::new()
        .get(app.url("/"))
        .header("origin", "https://app.example")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "https://app.example"
    );
}

#[tokio::test]
async fn test_products_validation() {
    let app = common::spawn_default_app().await;

    let body: Value = reqwest::get(app.url("/products?limit=5&tags=b&tags=a&tags=b"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        json!({ "limit": 5, "offset": 0, "order_by": "created_at", "tags": ["a", "b"] })
    );

    let res = reqwest::get(app.url("/products?limit=0&offset=-1&color=red"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    let kinds: Vec<&str> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["extra_forbidden"]);

    let res = reqwest::get(app.url("/products?limit=0&offset=-1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["detail"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_users_endpoints() {
    let app = common::spawn_default_app().await;
    let client = reqwest::Client::new();

    let res = client
        .post(app.url("/users?user_type=admin"))
        .json(&json!({ "email": "a@b.c", "first_name": "A", "last_name": "B" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(app.url(&format!("/users?user_type={}", "x".repeat(51))))
        .json(&json!({ "email": "a@b.c", "first_name": "A", "last_name": "B" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = client
        .get(app.url("/users/profile"))
        .json(&json!({ "email": "a@b.c", "password": "hunter2" }))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "email": "a@b.c" }));

    let body: Value = client
        .get(app.url("/users/secret?q=x"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "secret": "Some top level secret" }));
}

#[tokio::test]
async fn test_unknown_route_and_stock() {
    let app = common::spawn_default_app().await;

    let res = reqwest::get(app.url("/gbp/prices")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Not Found" }));

    let body: Value = reqwest::get(app.url("/usd/prices"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["name"], "usd");
    assert_eq!(body["prices"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_server_stops_on_shutdown() {
    let app = common::spawn_default_app().await;
    let url = app.url("/");
    assert!(reqwest::get(&url).await.is_ok());

    app.shutdown.trigger();
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;

    let client = reqwest::Client::builder().pool_max_idle_per_host(0).build().unwrap();
    assert!(client.get(&url).send().await.is_err());
}

#[tokio::test]
async fn test_items_without_slash_follows_redirect() {
    let app = common::spawn_default_app().await;
    let client = reqwest::Client::new();

    let res = client
        .post(app.url("/items"))
        .json(&json!({ "text": "redirected" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(app.url("/items?limit=5")).send().await.unwrap();
    assert_eq!(res.url().path(), "/items/");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!([{ "text": "redirected", "is_done": false }]));
}

#[tokio::test]
async fn test_server_started_after_trigger_exits() {
    use items_api::lifecycle::Shutdown;

    let shutdown = Shutdown::new();
    shutdown.trigger();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = items_api::HttpServer::new(AppConfig::default());
    let run = server.run(listener, shutdown.subscribe());
    tokio::time::timeout(std::time::Duration::from_secs(2), run)
        .await
        .unwrap()
        .unwrap();
}
