mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn create_then_get_round_trips() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;

    let id = common::create_report(&server, &alice, "Quarterly", "Numbers went up").await?;

    let res = alice
        .authorize(reqwest::Client::new().get(server.url(&format!("/reports/{}", id))))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], id.to_string().as_str());
    assert_eq!(body["title"], "Quarterly");
    assert_eq!(body["description"], "Numbers went up");
    Ok(())
}

#[tokio::test]
async fn create_ignores_client_supplied_identity() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;
    let forced_id = Uuid::new_v4();

    let res = alice
        .authorize(reqwest::Client::new().post(server.url("/reports")))
        .json(&json!({
            "id": forced_id,
            "ownerId": Uuid::new_v4(),
            "title": "t",
            "description": "d",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let id = res.json::<Uuid>().await?;
    assert_ne!(id, forced_id);

    // Still owned by the caller
    let res = alice
        .authorize(reqwest::Client::new().get(server.url(&format!("/reports/{}", id))))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn create_with_blank_title_is_rejected() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;

    let res = alice
        .authorize(reqwest::Client::new().post(server.url("/reports")))
        .json(&json!({ "title": " ", "description": "d" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap_or_default().contains("Title cannot be empty!"));
    Ok(())
}

#[tokio::test]
async fn create_collects_every_violation() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;

    let res = alice
        .authorize(reqwest::Client::new().post(server.url("/reports")))
        .json(&json!({ "title": "", "description": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["errors"], json!(["Title cannot be empty!", "Description can not be empty!"]));
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_bad_request() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;

    let res = alice
        .authorize(reqwest::Client::new().post(server.url("/reports")))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn malformed_id_is_bad_request() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;
    let client = reqwest::Client::new();

    for raw in ["111", "aaa", "a-a-b-c"] {
        let res = alice.authorize(client.get(server.url(&format!("/reports/{}", raw)))).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "GET {}", raw);

        let res = alice.authorize(client.delete(server.url(&format!("/reports/{}", raw)))).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "DELETE {}", raw);
    }
    Ok(())
}

#[tokio::test]
async fn unknown_id_is_not_found() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;
    let client = reqwest::Client::new();
    let path = format!("/reports/{}", Uuid::new_v4());

    let res = alice.authorize(client.get(server.url(&path))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = alice
        .authorize(client.post(server.url(&path)))
        .json(&json!({ "title": "t", "description": "d" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = alice.authorize(client.delete(server.url(&path))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_replaces_title_and_description() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;
    let client = reqwest::Client::new();
    let id = common::create_report(&server, &alice, "old", "old").await?;
    let path = format!("/reports/{}", id);

    let res = alice
        .authorize(client.post(server.url(&path)))
        .json(&json!({ "id": Uuid::new_v4(), "title": "new", "description": "newer" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Uuid>().await?, id);

    let body = alice.authorize(client.get(server.url(&path))).send().await?.json::<Value>().await?;
    assert_eq!(body["id"], id.to_string().as_str());
    assert_eq!(body["title"], "new");
    assert_eq!(body["description"], "newer");
    Ok(())
}

#[tokio::test]
async fn invalid_update_leaves_report_untouched() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;
    let client = reqwest::Client::new();
    let id = common::create_report(&server, &alice, "keep", "keep").await?;
    let path = format!("/reports/{}", id);

    let res = alice
        .authorize(client.post(server.url(&path)))
        .json(&json!({ "title": "changed", "description": "  " }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = alice.authorize(client.get(server.url(&path))).send().await?.json::<Value>().await?;
    assert_eq!(body["title"], "keep");
    Ok(())
}

#[tokio::test]
async fn delete_is_not_idempotent() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;
    let client = reqwest::Client::new();
    let id = common::create_report(&server, &alice, "t", "d").await?;
    let path = format!("/reports/{}", id);

    let res = alice.authorize(client.delete(server.url(&path))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.json::<bool>().await?);

    let res = alice.authorize(client.delete(server.url(&path))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = alice.authorize(client.get(server.url(&path))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn other_users_cannot_touch_a_report() -> Result<()> {
    let server = common::start_server().await?;
    let alice = common::register_user(&server, "alice").await?;
    let mallory = common::register_user(&server, "mallory").await?;
    let client = reqwest::Client::new();
    let id = common::create_report(&server, &alice, "private", "private").await?;
    let path = format!("/reports/{}", id);

    let res = mallory.authorize(client.get(server.url(&path))).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = mallory
        .authorize(client.post(server.url(&path)))
        .json(&json!({ "title": "mine", "description": "mine" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = mallory.authorize(client.delete(server.url(&path))).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(
        body["message"],
        format!("Current user is not authorized to delete the report with uuid: {}", id).as_str()
    );

    // Owner still sees the original
    let body = alice.authorize(client.get(server.url(&path))).send().await?.json::<Value>().await?;
    assert_eq!(body["title"], "private");
    Ok(())
}
