//! End-to-end tests: a real listener on an ephemeral port, raw HTTP/1.1
//! requests, full responses.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use presite::config::{
    AppState, Blueprint, Config, Environment, HttpConfig, LoggingConfig, PageRoute,
    PerformanceConfig, SecretsConfig, ServerConfig, SiteConfig,
};
use presite::server;

/// Lay out a site under `root`: templates plus one static asset.
fn write_site(root: &Path) {
    let templates = root.join("templates");
    let statics = root.join("static");
    fs::create_dir_all(&templates).unwrap();
    fs::create_dir_all(&statics).unwrap();

    fs::write(
        templates.join("home.html"),
        r#"<html><head><link rel="stylesheet" href="{{ static "style.css" }}"></head><body><h1>Home</h1></body></html>"#,
    )
    .unwrap();
    fs::write(templates.join("bios.html"), "<h1>Bios</h1>").unwrap();

    let examples = templates.join("examples");
    fs::create_dir_all(&examples).unwrap();
    fs::write(examples.join("example.html"), "<h1>Example</h1>").unwrap();

    fs::write(statics.join("style.css"), "body { margin: 0 }").unwrap();
    fs::write(statics.join("favicon.svg"), "<svg/>").unwrap();
}

fn test_config(root: &Path) -> Config {
    let root = root.to_str().unwrap();
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: Environment::Development,
            workers: None,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            access_log: false,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        },
        performance: PerformanceConfig {
            keep_alive_timeout: 75,
            read_timeout: 5,
            write_timeout: 5,
            max_connections: None,
        },
        http: HttpConfig {
            server_name: "Presite/test".to_string(),
        },
        site: SiteConfig {
            static_root: format!("{root}/static"),
            static_route: "/static".to_string(),
            template_root: format!("{root}/templates"),
            favicon_paths: vec!["/favicon.ico".to_string(), "/favicon.svg".to_string()],
        },
        secrets: SecretsConfig::default(),
        blueprints: vec![
            Blueprint {
                name: "site".to_string(),
                url_prefix: String::new(),
                template_dir: None,
                pages: vec![
                    PageRoute {
                        path: "/".to_string(),
                        template: "home.html".to_string(),
                    },
                    PageRoute {
                        path: "/bios".to_string(),
                        template: "bios.html".to_string(),
                    },
                ],
            },
            Blueprint {
                name: "example".to_string(),
                url_prefix: "/development".to_string(),
                template_dir: Some(format!("{root}/templates/examples")),
                pages: vec![PageRoute {
                    path: "/example".to_string(),
                    template: "example.html".to_string(),
                }],
            },
        ],
    }
}

/// Start the server on an ephemeral port and return its address.
fn start_server(root: &Path) -> SocketAddr {
    let config = test_config(root);
    let listener = server::create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::new(config, "test-key".to_string()));
    tokio::spawn(async move { server::run(listener, state).await });
    addr
}

/// Send one raw HTTP/1.1 request and read the full response.
async fn send_request(addr: SocketAddr, method: &str, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_home_page_renders() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    let addr = start_server(site.path());

    let response = send_request(addr, "GET", "/").await;
    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.contains("<h1>Home</h1>"));
    assert!(response.to_lowercase().contains("server: presite/test"));
    // The stylesheet reference came out cache-busted
    assert!(response.contains("/static/style.css?v="), "got: {response}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_undefined_path_is_404() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    let addr = start_server(site.path());

    let response = send_request(addr, "GET", "/definitely-not-a-route").await;
    assert!(response.starts_with("HTTP/1.1 404"), "got: {response}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_prefixed_blueprint_page() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    let addr = start_server(site.path());

    let response = send_request(addr, "GET", "/development/example").await;
    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.contains("<h1>Example</h1>"));

    // The page only exists under its prefix
    let response = send_request(addr, "GET", "/example").await;
    assert!(response.starts_with("HTTP/1.1 404"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_static_asset_round_trip() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    let addr = start_server(site.path());

    // The home page names the versioned asset URL; fetching it works and
    // the versioned response is immutable-cacheable
    let home = send_request(addr, "GET", "/").await;
    let url_start = home.find("/static/style.css?v=").unwrap();
    let asset_url: String = home[url_start..]
        .chars()
        .take_while(|c| *c != '"')
        .collect();

    let response = send_request(addr, "GET", &asset_url).await;
    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.contains("text/css"));
    assert!(response.contains("immutable"));
    assert!(response.contains("body { margin: 0 }"));

    // Without the version parameter the asset still resolves, short-lived
    let response = send_request(addr, "GET", "/static/style.css").await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("max-age=3600"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_traversal_is_blocked() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    fs::write(site.path().join("secret.txt"), "not yours").unwrap();
    let addr = start_server(site.path());

    let response = send_request(addr, "GET", "/static/../secret.txt").await;
    assert!(!response.contains("not yours"), "got: {response}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_is_rejected() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    let addr = start_server(site.path());

    let response = send_request(addr, "POST", "/").await;
    assert!(response.starts_with("HTTP/1.1 405"), "got: {response}");
    assert!(response.to_lowercase().contains("allow: get, head"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_favicon_route() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    let addr = start_server(site.path());

    let response = send_request(addr, "GET", "/favicon.svg").await;
    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.contains("image/svg+xml"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_template_is_500() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    // Declare a route whose template was never written
    let mut config = test_config(site.path());
    config.blueprints[0].pages.push(PageRoute {
        path: "/broken".to_string(),
        template: "missing.html".to_string(),
    });

    let listener = server::create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::new(config, "test-key".to_string()));
    tokio::spawn(async move { server::run(listener, state).await });

    let response = send_request(addr, "GET", "/broken").await;
    assert!(response.starts_with("HTTP/1.1 500"), "got: {response}");
}
