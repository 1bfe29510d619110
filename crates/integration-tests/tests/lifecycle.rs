//! Discovery, health and reset.

use mock_shop_integration_tests::{TestServer, read};
use serde_json::json;

#[tokio::test]
async fn test_discovery_is_stable() {
    let server = TestServer::start().await.expect("Failed to start server");

    let (status, first) = read(server.get("/").send().await.expect("root"))
        .await
        .expect("read");
    assert_eq!(status, 200);
    assert_eq!(first["message"], "Mock API Server is running!");
    assert_eq!(first["port"], server.port());
    assert!(first["available_endpoints"]["Payment"].is_object());

    let (_, second) = read(server.get("/").send().await.expect("root"))
        .await
        .expect("read");
    assert_eq!(first, second);

    let (_, health) = read(server.get("/health").send().await.expect("health"))
        .await
        .expect("read");
    assert_eq!(health["registered_users"], 0);
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = server.sign_up("alice", "pw1").await.expect("sign up");
    server
        .post("/store/shop1")
        .header("Authorization", &auth)
        .send()
        .await
        .expect("store");
    server
        .post("/item/widget")
        .header("Authorization", &auth)
        .json(&json!({"price": 1}))
        .send()
        .await
        .expect("item");

    let (_, health) = read(server.get("/health").send().await.expect("health"))
        .await
        .expect("read");
    assert_eq!(
        health,
        json!({
            "status": "healthy",
            "message": "Mock API Server is running",
            "registered_users": 1,
            "stores": 1,
            "items": 1
        })
    );

    for _ in 0..2 {
        let (status, body) = read(server.post("/reset").send().await.expect("reset"))
            .await
            .expect("read");
        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({"message": "All data has been reset successfully", "status": "reset_complete"})
        );
    }

    let (_, health) = read(server.get("/health").send().await.expect("health"))
        .await
        .expect("read");
    assert_eq!(health["registered_users"], 0);
    assert_eq!(health["stores"], 0);
    assert_eq!(health["items"], 0);

    // Tokens died with the reset
    let status = server
        .get("/items")
        .header("Authorization", &auth)
        .send()
        .await
        .expect("items")
        .status();
    assert_eq!(status, 401);

    // Counters restart at 1
    let body = server.register("zed", "pw").await.expect("register");
    assert_eq!(body["uuid"], 1);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/no/such/route")
        .header("x-request-id", "req-123")
        .send()
        .await
        .expect("request");
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
    let (status, body) = read(response).await.expect("read");
    assert_eq!((status, body), (404, json!({"message": "Not found"})));
}
