mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{product, spawn_server, test_config};

fn catalog() -> Vec<panda_api::database::models::Product> {
    vec![
        product(0, "Bamboo chair", "Sturdy chair", 3000),
        product(1, "Panda plush", "Soft toy", 1500),
        product(2, "100% cotton shirt", "Comfortable", 2500),
        product(3, "Desk lamp", "Warm light", 1500),
        product(4, "Notebook", "Ruled_paper", 500),
    ]
}

async fn list(server: &common::TestServer, query: &str) -> Result<Value> {
    let resp = server.client.get(server.url(&format!("/api/products{}", query))).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(resp.json().await?)
}

fn names(body: &Value) -> Vec<&str> {
    body["items"].as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn price_order_is_cheapest_first_with_stable_ties() -> Result<()> {
    let server = spawn_server(test_config(), Vec::new(), catalog()).await?;

    let body = list(&server, "?orderBy=price").await?;
    assert_eq!(
        names(&body),
        vec!["Notebook", "Panda plush", "Desk lamp", "100% cotton shirt", "Bamboo chair"]
    );
    Ok(())
}

#[tokio::test]
async fn oldest_is_not_a_product_order() -> Result<()> {
    let server = spawn_server(test_config(), Vec::new(), catalog()).await?;

    let body = list(&server, "?orderBy=oldest").await?;
    assert_eq!(names(&body)[0], "Notebook");
    assert_eq!(names(&body)[4], "Bamboo chair");
    Ok(())
}

#[tokio::test]
async fn keyword_matches_name_or_description() -> Result<()> {
    let server = spawn_server(test_config(), Vec::new(), catalog()).await?;

    let body = list(&server, "?keyword=chair").await?;
    assert_eq!(names(&body), vec!["Bamboo chair"]);

    let body = list(&server, "?keyword=SOFT").await?;
    assert_eq!(names(&body), vec!["Panda plush"]);
    Ok(())
}

#[tokio::test]
async fn wildcards_in_keyword_match_literally() -> Result<()> {
    let server = spawn_server(test_config(), Vec::new(), catalog()).await?;

    let percent = list(&server, "?keyword=%25").await?;
    assert_eq!(names(&percent), vec!["100% cotton shirt"]);

    let underscore = list(&server, "?keyword=_").await?;
    assert_eq!(names(&underscore), vec!["Notebook"]);
    Ok(())
}

#[tokio::test]
async fn list_serializes_camel_case_fields() -> Result<()> {
    let server = spawn_server(test_config(), Vec::new(), catalog()).await?;

    let body = list(&server, "?pageSize=1").await?;
    let item = &body["items"][0];
    assert!(item.get("imageUrl").is_some());
    assert!(item.get("favoriteCount").is_some());
    assert!(item.get("createdAt").is_some());
    assert_eq!(body["pagination"]["totalPages"], 5);
    Ok(())
}

#[tokio::test]
async fn create_validates_name_and_price() -> Result<()> {
    let server = spawn_server(test_config(), Vec::new(), Vec::new()).await?;

    let resp = server
        .client
        .post(server.url("/api/products"))
        .json(&json!({ "name": "", "price": -1 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert!(body["fieldErrors"].get("name").is_some());
    assert!(body["fieldErrors"].get("price").is_some());

    let resp = server
        .client
        .post(server.url("/api/products"))
        .json(&json!({ "name": "Lamp" }))
        .send()
        .await?;
    let body: Value = resp.json().await?;
    assert_eq!(body["fieldErrors"]["price"], "This field is required");
    Ok(())
}

#[tokio::test]
async fn empty_patch_is_rejected() -> Result<()> {
    let server = spawn_server(test_config(), Vec::new(), Vec::new()).await?;

    let resp = server
        .client
        .patch(server.url(&format!("/api/products/{}", catalog()[0].id)))
        .json(&json!({ "id": "ignored" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
