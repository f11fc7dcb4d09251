mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn deep_link_sets_active_tab_content() -> Result<()> {
    let server = common::ensure_server().await?;
    let id = common::create_session(server, Some("/workspace?content=list")).await?;

    let body: Value = reqwest::get(server.url(&format!("/api/workspace/sessions/{}", id)))
        .await?
        .json()
        .await?;

    let data = &body["data"];
    assert_eq!(data["content"], "list");
    assert_eq!(data["activeTab"], "main");
    assert_eq!(data["tabs"][0]["activeContent"], "list");
    assert_eq!(data["history"], json!([]));
    Ok(())
}

#[tokio::test]
async fn tab_click_pushes_one_history_entry() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let id = common::create_session(server, Some("/workspace?content=calendar")).await?;
    let navigate = server.url(&format!("/api/workspace/sessions/{}/navigate", id));

    let first: Value = client
        .post(&navigate)
        .json(&json!({ "content": "monthlyCalendar" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(first["data"]["pushed"], "/workspace?content=monthlyCalendar");

    let second: Value = client
        .post(&navigate)
        .json(&json!({ "content": "monthlyCalendar" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(second["data"]["pushed"], Value::Null);

    let history = &second["data"]["workspace"]["history"];
    assert_eq!(
        history,
        &json!([{ "url": "/workspace?content=monthlyCalendar", "scroll": false }])
    );
    assert_eq!(second["data"]["workspace"]["tabs"][0]["activeContent"], "monthlyCalendar");
    Ok(())
}

#[tokio::test]
async fn unrecognized_location_keeps_tab_content() -> Result<()> {
    let server = common::ensure_server().await?;
    let id = common::create_session(server, Some("/workspace?content=flow")).await?;

    let res: Value = reqwest::Client::new()
        .post(server.url(&format!("/api/workspace/sessions/{}/location", id)))
        .json(&json!({ "url": "/workspace?content=unknown" }))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(res["data"]["workspace"]["content"], "empty");
    assert_eq!(res["data"]["workspace"]["tabs"][0]["activeContent"], "flow");
    Ok(())
}

#[tokio::test]
async fn tabs_open_switch_and_close() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let id = common::create_session(server, Some("/workspace?content=flow")).await?;
    let base = server.url(&format!("/api/workspace/sessions/{}", id));

    let opened = client.post(format!("{}/tabs", base)).json(&json!({ "key": "second" })).send().await?;
    assert_eq!(opened.status(), StatusCode::CREATED);

    client
        .post(format!("{}/navigate", base))
        .json(&json!({ "content": "list" }))
        .send()
        .await?;

    let back: Value = client.put(format!("{}/tabs/main", base)).send().await?.json().await?;
    assert_eq!(back["data"]["pushed"], "/workspace?content=flow");

    let closed: Value = client.delete(format!("{}/tabs/main", base)).send().await?.json().await?;
    assert_eq!(closed["data"]["workspace"]["activeTab"], "second");
    assert_eq!(closed["data"]["pushed"], "/workspace?content=list");

    let missing = client.put(format!("{}/tabs/main", base)).send().await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn new_tab_takes_content_already_in_url() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let id = common::create_session(server, Some("/workspace?content=flow")).await?;
    let base = server.url(&format!("/api/workspace/sessions/{}", id));

    client.post(format!("{}/tabs", base)).json(&json!({ "key": "second" })).send().await?;
    let res: Value = client
        .post(format!("{}/navigate", base))
        .json(&json!({ "content": "flow" }))
        .send()
        .await?
        .json()
        .await?;

    let workspace = &res["data"]["workspace"];
    assert_eq!(workspace["activeTab"], "second");
    assert_eq!(workspace["tabs"][1]["activeContent"], "flow");
    assert_eq!(workspace["url"], "/workspace?content=flow");
    assert_eq!(workspace["history"], json!([]));
    Ok(())
}

#[tokio::test]
async fn empty_is_not_a_navigation_target() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let id = common::create_session(server, Some("/workspace?content=list")).await?;
    let base = server.url(&format!("/api/workspace/sessions/{}", id));

    let res = client
        .post(format!("{}/navigate", base))
        .json(&json!({ "content": "empty" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let snapshot: Value = client.get(&base).send().await?.json().await?;
    assert_eq!(snapshot["data"]["url"], "/workspace?content=list");
    assert_eq!(snapshot["data"]["tabs"][0]["activeContent"], "list");
    assert_eq!(snapshot["data"]["history"], json!([]));
    Ok(())
}

#[tokio::test]
async fn invalid_navigation_requests_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let id = common::create_session(server, None).await?;

    let bad_content = client
        .post(server.url(&format!("/api/workspace/sessions/{}/navigate", id)))
        .json(&json!({ "content": "timeline" }))
        .send()
        .await?;
    assert_eq!(bad_content.status(), StatusCode::BAD_REQUEST);
    let body: Value = bad_content.json().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let unknown = client
        .get(server.url(&format!("/api/workspace/sessions/{}", uuid::Uuid::new_v4())))
        .send()
        .await?;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deleted_session_is_gone() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let id = common::create_session(server, None).await?;
    let url = server.url(&format!("/api/workspace/sessions/{}", id));

    let deleted = client.delete(&url).send().await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let res = client.get(&url).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn snapshot_etag_changes_after_navigation() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let id = common::create_session(server, Some("/workspace?content=calendar")).await?;
    let url = server.url(&format!("/api/workspace/sessions/{}", id));

    let before = client.get(&url).send().await?;
    let etag = before.headers()["etag"].to_str()?.to_string();

    let unchanged = client.get(&url).header("If-None-Match", &etag).send().await?;
    assert_eq!(unchanged.status(), StatusCode::NOT_MODIFIED);

    client
        .post(format!("{}/navigate", url))
        .json(&json!({ "content": "flow" }))
        .send()
        .await?;

    let after = client.get(&url).header("If-None-Match", &etag).send().await?;
    assert_eq!(after.status(), StatusCode::OK);
    assert_ne!(after.headers()["etag"].to_str()?, etag);
    Ok(())
}
