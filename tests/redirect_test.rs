//! End-to-end tests for the redirect server.

use std::time::Duration;

use host_redirect::config::{parse_config, RedirectConfig};
use reqwest::header::{HOST, LOCATION};
use reqwest::StatusCode;

mod common;

fn config(toml: &str) -> RedirectConfig {
    parse_config(toml).unwrap()
}

#[tokio::test]
async fn test_subdomain_redirect() {
    let server = common::start_server(config(
        r#"
        [[rules]]
        type = "subdomain"
        subdomain = "www"
        "#,
    ))
    .await;

    let res = common::client()
        .get(server.url("/a?q=1"))
        .header(HOST, "example.com")
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()[LOCATION], "http://www.example.com/a?q=1");
}

#[tokio::test]
async fn test_rules_run_in_file_order() {
    let server = common::start_server(config(
        r#"
        [listener]
        scheme = "https"

        [[rules]]
        type = "top_level_domain"
        source_tlds = [".com", ".net"]
        target_tld = ".eu"
        status_code = 302

        [[rules]]
        type = "subdomain"
        subdomain = "www"
        "#,
    ))
    .await;
    let client = common::client();

    let res = client
        .get(server.url("/shop"))
        .header(HOST, "example.net:8443")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "https://example.eu/shop");

    let res = client
        .get(server.url("/shop"))
        .header(HOST, "example.eu")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()[LOCATION], "https://www.example.eu/shop");

    let res = client
        .get(server.url("/shop"))
        .header(HOST, "www.example.eu")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().get(LOCATION).is_none());
}

#[tokio::test]
async fn test_hostname_redirect_keeps_port_and_path_base() {
    let server = common::start_server(config(
        r#"
        [listener]
        path_base = "/app"

        [[rules]]
        type = "hostname"
        source_hosts = ["old.example.org"]
        target_hostname = "example.com"
        subdomain = "www"
        status_code = 308
        "#,
    ))
    .await;

    let res = common::client()
        .post(server.url("/app/orders?id=7"))
        .header(HOST, "old.example.org:8080")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(res.headers()[LOCATION], "http://www.example.com:8080/app/orders?id=7");
}

#[tokio::test]
async fn test_localhost_passes_through() {
    let server = common::start_server(config(
        r#"
        [fallback]
        body = "site"

        [[rules]]
        type = "hostname"
        target_hostname = "example.com"

        [[rules]]
        type = "subdomain"
        subdomain = "www"
        "#,
    ))
    .await;

    let res = common::client()
        .get(server.url("/"))
        .header(HOST, "localhost:3000")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "site");
}

#[tokio::test]
async fn test_forwarded_proto() {
    let server = common::start_server(config(
        r#"
        [listener]
        trust_forwarded_proto = true

        [[rules]]
        type = "subdomain"
        subdomain = "www"
        "#,
    ))
    .await;

    let res = common::client()
        .get(server.url("/"))
        .header(HOST, "example.com")
        .header("X-Forwarded-Proto", "https")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()[LOCATION], "https://www.example.com/");
}

#[tokio::test]
async fn test_config_update_swaps_rules() {
    let server = common::start_server(config(
        r#"
        [[rules]]
        type = "subdomain"
        subdomain = "www"
        "#,
    ))
    .await;
    let client = common::client();

    let res = client.get(server.url("/")).header(HOST, "example.com").send().await.unwrap();
    assert_eq!(res.headers()[LOCATION], "http://www.example.com/");

    server
        .updates
        .send(config(
            r#"
            [[rules]]
            type = "subdomain"
            subdomain = "shop"
            "#,
        ))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client.get(server.url("/")).header(HOST, "example.com").send().await.unwrap();
    assert_eq!(res.headers()[LOCATION], "http://shop.example.com/");
}

#[tokio::test]
async fn test_concurrent_requests_share_rules() {
    let server = common::start_server(config(
        r#"
        [[rules]]
        type = "top_level_domain"
        source_tlds = [".com"]
        target_tld = ".eu"
        "#,
    ))
    .await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let url = server.url(&format!("/item/{}", i));
        tasks.push(tokio::spawn(async move {
            let res = client.get(&url).header(HOST, "example.com").send().await.unwrap();
            (i, res.headers()[LOCATION].to_str().unwrap().to_string())
        }));
    }

    for task in tasks {
        let (i, location) = task.await.unwrap();
        assert_eq!(location, format!("http://example.eu/item/{}", i));
    }
}
