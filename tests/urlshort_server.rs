// Serves the redirector over a real socket and checks what a client sees.

use std::collections::HashMap;

use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

use gophercises::urlshort::{map_handler, yaml_handler};

fn fallback() -> Router {
    Router::new()
        .route("/", get(|| async { "Hello, world!" }))
        .fallback(|| async { (StatusCode::NOT_FOUND, "no such page") })
}

/// Start serving `app` on a random port, returning its base URL.
async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://127.0.0.1:{}", port)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_map_redirector() {
    let routes = HashMap::from([
        ("/golang".to_string(), "https://go.dev".to_string()),
        ("/yt".to_string(), "https://youtube.com".to_string()),
    ]);
    let app = Router::new().fallback_service(map_handler(routes, fallback()));
    let base = serve(app).await;
    let client = client();

    let resp = client.get(format!("{base}/golang")).send().await.unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers()["location"], "https://go.dev");

    let resp = client.get(format!("{base}/yt")).send().await.unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers()["location"], "https://youtube.com");

    let resp = client.get(format!("{base}/unknown")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "no such page");

    let resp = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "Hello, world!");
}

#[tokio::test]
async fn test_yaml_redirector_last_record_wins() {
    let yaml = b"- path: /a\n  url: https://first.example\n- path: /a\n  url: https://second.example\n";
    let app = Router::new().fallback_service(yaml_handler(yaml, fallback()).unwrap());
    let base = serve(app).await;

    let resp = client().get(format!("{base}/a")).send().await.unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers()["location"], "https://second.example");
}

#[tokio::test]
async fn test_concurrent_requests_share_the_map() {
    let routes = HashMap::from([("/golang".to_string(), "https://go.dev".to_string())]);
    let app = Router::new().fallback_service(map_handler(routes, fallback()));
    let base = serve(app).await;
    let client = client();

    let requests = (0..16)
        .map(|i| {
            let client = client.clone();
            let url = if i % 2 == 0 {
                format!("{base}/golang")
            } else {
                format!("{base}/missing-{i}")
            };
            tokio::spawn(async move { client.get(url).send().await.unwrap().status() })
        })
        .collect::<Vec<_>>();

    for (i, handle) in requests.into_iter().enumerate() {
        let status = handle.await.unwrap();
        let expected: u16 = if i % 2 == 0 { 302 } else { 404 };
        assert_eq!(status, expected);
    }
}
