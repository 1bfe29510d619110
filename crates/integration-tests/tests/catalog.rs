//! Stores, items and profile CRUD over HTTP.

use mock_shop_integration_tests::{TestServer, read};
use serde_json::{Value, json};

async fn signed_in() -> (TestServer, u64, String) {
    let server = TestServer::start().await.expect("Failed to start server");
    let (id, auth) = server.sign_up("alice", "pw1").await.expect("sign up");
    (server, id, auth)
}

#[tokio::test]
async fn test_store_names_are_unique() {
    let (server, _, auth) = signed_in().await;

    let status = server
        .post("/store/shop1")
        .header("Authorization", &auth)
        .send()
        .await
        .expect("store")
        .status();
    assert_eq!(status, 201);

    let (status, body) = read(
        server
            .post("/store/shop1")
            .header("Authorization", &auth)
            .send()
            .await
            .expect("store"),
    )
    .await
    .expect("read");
    assert_eq!(status, 400);
    assert_eq!(
        body,
        json!({"message": "A store with name 'shop1' already exists."})
    );

    let (status, body) = read(
        server
            .get("/store/shop2")
            .header("Authorization", &auth)
            .send()
            .await
            .expect("store"),
    )
    .await
    .expect("read");
    assert_eq!((status, body), (404, json!({"message": "Store not found"})));
}

#[tokio::test]
async fn test_item_names_are_unique() {
    let (server, _, auth) = signed_in().await;

    for expected in [201, 400] {
        let status = server
            .post("/item/widget")
            .header("Authorization", &auth)
            .json(&json!({"price": 1}))
            .send()
            .await
            .expect("item")
            .status();
        assert_eq!(status, expected);
    }
}

#[tokio::test]
async fn test_item_lookup_by_id_or_name() {
    let (server, _, auth) = signed_in().await;

    // An all-digit name still creates by name
    let (status, body) = read(
        server
            .post("/item/42")
            .header("Authorization", &auth)
            .json(&json!({"price": 2.5, "store_id": null}))
            .send()
            .await
            .expect("item"),
    )
    .await
    .expect("read");
    assert_eq!(status, 201);
    assert_eq!(body, json!({"name": "42", "price": 2.5, "itemID": 1}));

    let stored = json!({"name": "42", "price": 2.5, "store_id": null, "itemID": 1});
    let get = |path: &str| server.get(path).header("Authorization", &auth).send();

    // ...but reads with digits go by id
    let (status, body) = read(get("/item/1").await.expect("get")).await.expect("read");
    assert_eq!((status, body), (200, stored));
    let (status, body) = read(get("/item/42").await.expect("get")).await.expect("read");
    assert_eq!((status, body), (404, json!({"message": "Item not found"})));

    server
        .post("/item/gizmo")
        .header("Authorization", &auth)
        .json(&json!({"price": 3}))
        .send()
        .await
        .expect("item");
    let (status, body) = read(get("/item/gizmo").await.expect("get")).await.expect("read");
    assert_eq!(status, 200);
    assert_eq!(body["itemID"], 2);
}

#[tokio::test]
async fn test_item_update_merges_and_renames() {
    let (server, _, auth) = signed_in().await;
    server
        .post("/item/widget")
        .header("Authorization", &auth)
        .json(&json!({"price": 10, "store_id": "1"}))
        .send()
        .await
        .expect("item");

    let (status, body) = read(
        server
            .put("/item/widget")
            .header("Authorization", &auth)
            .json(&json!({"name": "sprocket", "color": "red"}))
            .send()
            .await
            .expect("update"),
    )
    .await
    .expect("read");
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"name": "sprocket", "price": 10, "store_id": "1", "itemID": 1, "color": "red"})
    );

    let get = |path: &str| server.get(path).header("Authorization", &auth).send();
    let (status, _) = read(get("/item/widget").await.expect("get")).await.expect("read");
    assert_eq!(status, 404);
    let (status, body) = read(get("/item/sprocket").await.expect("get")).await.expect("read");
    assert_eq!(status, 200);
    assert_eq!(body["color"], "red");

    let (status, body) = read(
        server
            .put("/item/9")
            .header("Authorization", &auth)
            .json(&json!({"price": 1}))
            .send()
            .await
            .expect("update"),
    )
    .await
    .expect("read");
    assert_eq!((status, body), (404, json!({"message": "Item not found"})));
}

#[tokio::test]
async fn test_items_link_to_store_by_loose_id() {
    let (server, _, auth) = signed_in().await;
    server
        .post("/store/shop1")
        .header("Authorization", &auth)
        .send()
        .await
        .expect("store");

    for (name, store_id) in [("a", json!(1)), ("b", json!("1")), ("c", json!(2)), ("d", Value::Null)] {
        server
            .post(&format!("/item/{name}"))
            .header("Authorization", &auth)
            .json(&json!({"price": 1, "store_id": store_id}))
            .send()
            .await
            .expect("item");
    }

    let (_, body) = read(
        server
            .get("/store/shop1")
            .header("Authorization", &auth)
            .send()
            .await
            .expect("store"),
    )
    .await
    .expect("read");
    assert_eq!(body, json!({"uuid": "1", "name": "shop1", "items": ["a", "b"]}));

    let (_, body) = read(
        server
            .get("/items")
            .header("Authorization", &auth)
            .send()
            .await
            .expect("items"),
    )
    .await
    .expect("read");
    let names: Vec<&str> = body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
}

#[tokio::test]
async fn test_profile_lifecycle() {
    let (server, id, auth) = signed_in().await;
    let path = format!("/user_info/{id}");

    let (status, body) = read(
        server
            .post(&path)
            .header("Authorization", &auth)
            .json(&json!({"phone": "555", "email": "a@b.c", "address": {"street": "Main", "city": "Oslo"}}))
            .send()
            .await
            .expect("create"),
    )
    .await
    .expect("read");
    assert_eq!((status, body), (200, json!({"message": "User info created successfully."})));

    let (status, body) = read(
        server
            .post(&path)
            .header("Authorization", &auth)
            .json(&json!({}))
            .send()
            .await
            .expect("create"),
    )
    .await
    .expect("read");
    assert_eq!((status, body), (400, json!({"message": "User info already exists"})));

    let (status, _) = read(
        server
            .put(&path)
            .header("Authorization", &auth)
            .json(&json!({"email": "new@b.c"}))
            .send()
            .await
            .expect("update"),
    )
    .await
    .expect("read");
    assert_eq!(status, 200);

    let (status, body) = read(
        server
            .get(&path)
            .header("Authorization", &auth)
            .send()
            .await
            .expect("read"),
    )
    .await
    .expect("read");
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"phone": "555", "email": "new@b.c", "userID": id, "street": "Main", "city": "Oslo"})
    );

    let (status, body) = read(
        server
            .delete(&path)
            .header("Authorization", &auth)
            .send()
            .await
            .expect("delete"),
    )
    .await
    .expect("read");
    assert_eq!((status, body), (200, json!({"message": "User info deleted."})));

    let (status, body) = read(
        server
            .delete(&path)
            .header("Authorization", &auth)
            .send()
            .await
            .expect("delete"),
    )
    .await
    .expect("read");
    assert_eq!((status, body), (404, json!({"message": "User info not found."})));
}

#[tokio::test]
async fn test_profile_not_found_ordering() {
    let (server, id, auth) = signed_in().await;
    let get = |path: String| server.get(&path).header("Authorization", &auth).send();

    // Sentinel id with no account reports a missing profile
    let (status, body) = read(get("/user_info/1000".into()).await.expect("get"))
        .await
        .expect("read");
    assert_eq!((status, body), (404, json!({"message": "User info not found"})));

    // Any other unknown id reports a missing user
    let (status, body) = read(get("/user_info/5".into()).await.expect("get"))
        .await
        .expect("read");
    assert_eq!((status, body), (404, json!({"message": "User not found"})));

    // Known account without a profile
    let (status, body) = read(get(format!("/user_info/{id}")).await.expect("get"))
        .await
        .expect("read");
    assert_eq!((status, body), (404, json!({"message": "User info not found"})));

    // Non-numeric ids never reach the auth gate
    let (status, body) = read(server.get("/user_info/me").send().await.expect("get"))
        .await
        .expect("read");
    assert_eq!((status, body), (404, json!({"message": "Not found"})));
}
