//! Auth gate, read-only mounts, and multi-mount routing.

use bson::doc;
use mongo_rest::store::DocumentStore;
use serde_json::{json, Value};

mod common;
use common::{client, TestServer};

#[tokio::test]
async fn ping_works_with_and_without_auth() {
    let open = TestServer::spawn(|_| {}).await;
    let res = client().get(open.url("/ping")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "OK");

    let gated = TestServer::spawn(|c| c.auth_token = Some("s3cret".into())).await;
    let res = client().get(gated.url("/ping")).send().await.unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn gate_rejects_missing_and_wrong_tokens() {
    let server = TestServer::spawn(|c| c.auth_token = Some("s3cret".into())).await;
    server
        .store()
        .insert_one("test", doc! { "_id": "id-1" })
        .await
        .unwrap();
    let client = client();

    let res = client.get(server.url("/test/id-1")).send().await.unwrap();
    assert_eq!(res.status(), 401);

    let res = client
        .get(server.url("/test/id-1"))
        .header("Authorization", "Bearer wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    let res = client
        .get(server.url("/test/id-1"))
        .header("Authorization", "s3cret") // missing Bearer scheme
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
}

#[tokio::test]
async fn gate_admits_the_configured_token() {
    let server = TestServer::spawn(|c| c.auth_token = Some("s3cret".into())).await;
    server
        .store()
        .insert_one("test", doc! { "_id": "id-1", "n": 1 })
        .await
        .unwrap();

    let client = client();
    let res = client
        .get(server.url("/test/id-1"))
        .header("Authorization", "Bearer s3cret")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["n"], 1);
}

#[tokio::test]
async fn read_only_mount_has_no_mutating_routes() {
    let server = TestServer::spawn(|c| c.mounts[0].read_only = true).await;
    server
        .store()
        .insert_one("test", doc! { "_id": "id-1", "n": 1 })
        .await
        .unwrap();
    let client = client();

    // Reads behave exactly like a full-mode mount.
    assert_eq!(
        client.get(server.url("/test/id-1")).send().await.unwrap().status(),
        200
    );
    assert_eq!(client.get(server.url("/test")).send().await.unwrap().status(), 200);

    // Mutating verbs were never registered.
    let res = client
        .post(server.url("/test"))
        .json(&json!({ "_id": "id-2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);

    let res = client
        .put(server.url("/test/id-1"))
        .json(&json!({ "n": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);

    let res = client.delete(server.url("/test/id-1")).send().await.unwrap();
    assert_eq!(res.status(), 405);

    // Store state is untouched.
    let docs = server.store().find("test", doc! {}).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].get_i32("n").unwrap(), 1);
}

#[tokio::test]
async fn mounts_are_independent() {
    use mongo_rest::config::MountConfig;

    let server = TestServer::spawn(|c| {
        c.base = "api".into();
        c.mounts = vec![
            MountConfig {
                prefix: "writable".into(),
                ..Default::default()
            },
            MountConfig {
                prefix: "frozen".into(),
                read_only: true,
                ..Default::default()
            },
        ];
    })
    .await;
    let client = client();

    // Full-mode mount accepts writes.
    let res = client
        .post(server.url("/api/writable/things"))
        .json(&json!({ "_id": "t1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    // Read-only mount under the same base does not.
    let res = client
        .post(server.url("/api/frozen/things"))
        .json(&json!({ "_id": "t2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);

    // Each mount has its own store.
    assert_eq!(
        server.stores[0].find("things", doc! {}).await.unwrap().len(),
        1
    );
    assert!(server.stores[1]
        .find("things", doc! {})
        .await
        .unwrap()
        .is_empty());

    // Unprefixed paths are not routed.
    assert_eq!(
        client.get(server.url("/things")).send().await.unwrap().status(),
        404
    );
}
