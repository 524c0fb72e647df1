mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{articles, spawn_default, spawn_server, test_config};

async fn list(server: &common::TestServer, query: &str) -> Result<Value> {
    let resp = server.client.get(server.url(&format!("/api/articles{}", query))).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(resp.json().await?)
}

fn titles(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn default_list_is_first_ten_newest() -> Result<()> {
    let server = spawn_server(test_config(), articles(25), Vec::new()).await?;

    let body = list(&server, "").await?;
    assert_eq!(body["pagination"], json!({ "page": 1, "pageSize": 10, "total": 25, "totalPages": 3 }));
    let titles = titles(&body);
    assert_eq!(titles.len(), 10);
    assert_eq!(titles[0], "Article 24");
    assert_eq!(titles[9], "Article 15");
    Ok(())
}

#[tokio::test]
async fn paging_past_the_end() -> Result<()> {
    let server = spawn_server(test_config(), articles(25), Vec::new()).await?;

    let page3 = list(&server, "?page=3&pageSize=10").await?;
    assert_eq!(titles(&page3).len(), 5);

    let page4 = list(&server, "?page=4&pageSize=10").await?;
    assert!(titles(&page4).is_empty());
    assert_eq!(page4["pagination"]["totalPages"], 3);
    assert_eq!(page4["pagination"]["total"], 25);
    Ok(())
}

#[tokio::test]
async fn out_of_range_params_fall_back() -> Result<()> {
    let server = spawn_server(test_config(), articles(60), Vec::new()).await?;

    let body = list(&server, "?page=-5&pageSize=999").await?;
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["pageSize"], 50);
    assert_eq!(titles(&body).len(), 50);

    let body = list(&server, "?page=abc&pageSize=zero").await?;
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["pageSize"], 10);
    Ok(())
}

#[tokio::test]
async fn oldest_order_and_unsupported_price_order() -> Result<()> {
    let server = spawn_server(test_config(), articles(5), Vec::new()).await?;

    let oldest = list(&server, "?orderBy=OLDEST").await?;
    assert_eq!(titles(&oldest)[0], "Article 0");

    // price is not an article sort key, so it falls back to recent
    let price = list(&server, "?orderBy=price").await?;
    assert_eq!(titles(&price)[0], "Article 4");

    // orderBy wins over the sortKey alias
    let both = list(&server, "?orderBy=oldest&sortKey=recent").await?;
    assert_eq!(titles(&both)[0], "Article 0");
    Ok(())
}

#[tokio::test]
async fn keyword_searches_title_content_and_author() -> Result<()> {
    let server = spawn_server(test_config(), articles(10), Vec::new()).await?;

    let by_author = list(&server, "?keyword=KOALA").await?;
    assert_eq!(by_author["pagination"]["total"], 5);

    let by_content = list(&server, "?filterText=body%20of%20article%207").await?;
    assert_eq!(titles(&by_content), vec!["Article 7"]);

    let blank = list(&server, "?keyword=%20%20").await?;
    assert_eq!(blank["pagination"]["total"], 10);

    let none = list(&server, "?keyword=zebra").await?;
    assert_eq!(none["pagination"], json!({ "page": 1, "pageSize": 10, "total": 0, "totalPages": 0 }));
    assert_eq!(none["items"], json!([]));
    Ok(())
}

#[tokio::test]
async fn create_requires_title_content_and_author() -> Result<()> {
    let server = spawn_default().await?;

    let resp = server
        .client
        .post(server.url("/api/articles"))
        .json(&json!({ "title": "Hello", "author": "  " }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["fieldErrors"].get("content").is_some());
    assert!(body["fieldErrors"].get("author").is_some());
    assert!(body["fieldErrors"].get("title").is_none());
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected() -> Result<()> {
    let server = spawn_default().await?;

    let resp = server
        .client
        .post(server.url("/api/articles"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn non_uuid_ids_are_rejected() -> Result<()> {
    let server = spawn_default().await?;

    for path in ["/api/articles/42", "/api/articles/42/comments"] {
        let resp = server.client.get(server.url(path)).send().await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", path);
    }

    let resp = server
        .client
        .delete(server.url("/api/articles/not-an-id/comments/1"))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn writes_surface_unavailable_store_as_503() -> Result<()> {
    let server = spawn_default().await?;

    let resp = server
        .client
        .post(server.url("/api/articles"))
        .json(&json!({ "title": "Hello", "content": "World", "author": "panda" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    assert!(!body["message"].as_str().unwrap().contains("127.0.0.1"));
    Ok(())
}

#[tokio::test]
async fn comment_requires_content() -> Result<()> {
    let server = spawn_default().await?;
    let article_id = articles(1)[0].id;

    let resp = server
        .client
        .post(server.url(&format!("/api/articles/{}/comments", article_id)))
        .json(&json!({ "userId": "nope" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert!(body["fieldErrors"].get("content").is_some());
    assert!(body["fieldErrors"].get("userId").is_some());
    Ok(())
}
