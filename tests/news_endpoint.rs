//! `GET /news` against mocked Guardian and MediaStack endpoints.

mod helpers;

use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;
use newshub::{
    models::{
        error::ProviderError,
        news::{Article, NewsFilters},
    },
    utils::providers::NewsProvider,
};
use reqwest::Client;

use helpers::{app_for, app_with, app_with_providers, get, send, test_config};
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn guardian_body(count: usize) -> Value {
    let results: Vec<Value> = (0..count)
        .map(|n| {
            json!({
                "webTitle": format!("Guardian story {n}"),
                "webUrl": format!("https://www.theguardian.com/world/{n}"),
                "webPublicationDate": "2024-05-01T10:00:00Z"
            })
        })
        .collect();
    json!({"response": {"status": "ok", "results": results}})
}

fn mediastack_body(count: usize) -> Value {
    let data: Vec<Value> = (0..count)
        .map(|n| {
            json!({
                "title": format!("MediaStack story {n}"),
                "url": format!("https://news.example.com/{n}"),
                "description": "Summary",
                "image": null,
                "published_at": "2024-05-02T08:30:00+00:00",
                "source": "Example Wire",
                "author": "Staff"
            })
        })
        .collect();
    json!({"pagination": {"count": count}, "data": data})
}

async fn mount_guardian(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_mediastack(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/news"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn unavailable(res: &helpers::TestResponse) -> Option<String> {
    res.headers
        .get("x-news-unavailable")
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn both_providers_down_still_returns_empty_list() {
    let server = MockServer::start().await;
    mount_guardian(&server, ResponseTemplate::new(500)).await;
    mount_mediastack(&server, ResponseTemplate::new(502)).await;
    let app = app_for(&server).await;

    let res = send(&app, get("/news?query=anything")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
    assert_eq!(unavailable(&res).as_deref(), Some("guardian,mediastack"));
}

#[tokio::test]
async fn unreachable_providers_still_return_empty_list() {
    let app = app_with(test_config("http://127.0.0.1:9", "http://127.0.0.1:9")).await;

    let res = send(&app, get("/news")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn merged_count_is_sum_of_both_providers() {
    let server = MockServer::start().await;
    mount_guardian(&server, ResponseTemplate::new(200).set_body_json(guardian_body(3))).await;
    mount_mediastack(&server, ResponseTemplate::new(200).set_body_json(mediastack_body(4))).await;
    let app = app_for(&server).await;

    let res = send(&app, get("/news")).await;
    let articles = res.body.as_array().unwrap();

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(articles.len(), 7);
    assert_eq!(unavailable(&res), None);
    for article in articles {
        for field in ["title", "url", "source"] {
            assert!(!article[field].as_str().unwrap().is_empty(), "{field} empty in {article}");
        }
    }
}

#[tokio::test]
async fn articles_are_normalized_per_provider() {
    let server = MockServer::start().await;
    mount_guardian(&server, ResponseTemplate::new(200).set_body_json(guardian_body(1))).await;
    mount_mediastack(&server, ResponseTemplate::new(200).set_body_json(mediastack_body(1))).await;
    let app = app_for(&server).await;

    let res = send(&app, get("/news")).await;
    let articles = res.body.as_array().unwrap();
    let guardian = articles.iter().find(|a| a["source"] == "The Guardian").unwrap();
    let mediastack = articles.iter().find(|a| a["source"] == "MediaStack").unwrap();

    assert_eq!(guardian["description"], "Read the full story on The Guardian");
    assert_eq!(
        guardian["urlToImage"],
        "https://assets.guim.co.uk/images/guardian-logo-rss.png"
    );
    assert_eq!(guardian["publishedAt"], "2024-05-01T10:00:00Z");

    assert_eq!(mediastack["description"], "Summary");
    assert_eq!(
        mediastack["urlToImage"],
        "https://mediastack.com/images/mediastack-logo.png"
    );
    assert_eq!(mediastack["publishedAt"], "2024-05-02T08:30:00Z");
    assert_eq!(mediastack["author"], "Staff");
}

#[tokio::test]
async fn one_provider_down_keeps_the_other() {
    let server = MockServer::start().await;
    mount_guardian(&server, ResponseTemplate::new(200).set_body_json(guardian_body(2))).await;
    mount_mediastack(&server, ResponseTemplate::new(200).set_body_string("not json")).await;
    let app = app_for(&server).await;

    let res = send(&app, get("/news")).await;
    let articles = res.body.as_array().unwrap();

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(|a| a["source"] == "The Guardian"));
    assert_eq!(unavailable(&res).as_deref(), Some("mediastack"));
}

#[tokio::test]
async fn repeated_requests_return_the_same_set() {
    let server = MockServer::start().await;
    mount_guardian(&server, ResponseTemplate::new(200).set_body_json(guardian_body(5))).await;
    mount_mediastack(&server, ResponseTemplate::new(200).set_body_json(mediastack_body(5))).await;
    let app = app_for(&server).await;

    let urls = |body: &Value| -> BTreeSet<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|a| a["url"].as_str().unwrap().to_string())
            .collect()
    };
    let first = send(&app, get("/news")).await;
    let second = send(&app, get("/news")).await;

    assert_eq!(urls(&first.body), urls(&second.body));
    assert_eq!(urls(&first.body).len(), 10);
}

#[tokio::test]
async fn filters_are_forwarded_with_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("api-key", "guardian-key"))
        .and(query_param("q", "hockey"))
        .and(query_param("lang", "fr"))
        .and(query_param("section", "sports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(guardian_body(1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/news"))
        .and(query_param("access_key", "mediastack-key"))
        .and(query_param("keywords", "hockey"))
        .and(query_param("languages", "fr"))
        .and(query_param("countries", "ca"))
        .and(query_param("categories", "sports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mediastack_body(1)))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server).await;

    let res = send(
        &app,
        get("/news?query=hockey&language=fr&country=ca&category=sports"),
    )
    .await;

    assert_eq!(res.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_filters_use_provider_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("lang", "en"))
        .and(query_param("section", "world"))
        .respond_with(ResponseTemplate::new(200).set_body_json(guardian_body(1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/news"))
        .and(query_param("languages", "en"))
        .and(query_param("countries", "us"))
        .and(query_param("categories", "general"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mediastack_body(1)))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server).await;

    let res = send(&app, get("/news?category=")).await;

    assert_eq!(res.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_urls_across_providers_are_kept() {
    let server = MockServer::start().await;
    let shared = "https://shared.example.com/story";
    mount_guardian(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"response": {"results": [
            {"webTitle": "Same story", "webUrl": shared}
        ]}})),
    )
    .await;
    mount_mediastack(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"title": "Same story", "url": shared}
        ]})),
    )
    .await;
    let app = app_for(&server).await;

    let res = send(&app, get("/news")).await;

    assert_eq!(res.body.as_array().unwrap().len(), 2);
}

struct Crashing;

#[async_trait]
impl NewsProvider for Crashing {
    fn name(&self) -> &'static str {
        "crashing"
    }

    async fn fetch(&self, _: &Client, _: &NewsFilters) -> Result<Vec<Article>, ProviderError> {
        panic!("provider task aborted")
    }
}

struct Empty;

#[async_trait]
impl NewsProvider for Empty {
    fn name(&self) -> &'static str {
        "empty"
    }

    async fn fetch(&self, _: &Client, _: &NewsFilters) -> Result<Vec<Article>, ProviderError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn merge_failure_returns_server_error() {
    let providers: Vec<Arc<dyn NewsProvider>> = vec![Arc::new(Empty), Arc::new(Crashing)];
    let app = app_with_providers(providers).await;

    let res = send(&app, get("/news?query=anything")).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, json!({"error": "Failed to fetch news from all sources"}));
}
