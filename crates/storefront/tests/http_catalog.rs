#![cfg(feature = "http")]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use shopfront_core::CategoryId;
use shopfront_storefront::{CatalogQuery, CatalogSource, FetchFailure, HttpCatalog};

const SCARF: &str = r#"{ "id": 16, "name": "Silk Neck Scarf", "price": 4900, "rating": 1.9,
    "label": "Linea", "created_at": "2024-04-11T09:00:00Z", "stock": 4, "category_id": 4 }"#;

/// Serve one canned HTTP response and hand back the request head it received.
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&head).to_string()
    });

    (base, handle)
}

#[tokio::test]
async fn search_sends_query_and_bearer_token() {
    let (base, server) = serve_once("200 OK", format!("[{SCARF}]")).await;
    let catalog = HttpCatalog::new(base).with_token("abc123");

    let records = catalog.fetch(&CatalogQuery::search("scarf")).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name(), "Silk Neck Scarf");

    let head = server.await.unwrap();
    assert!(head.starts_with("GET /products?q=scarf HTTP/1.1"), "{head}");
    assert!(head.to_lowercase().contains("authorization: bearer abc123"), "{head}");
}

#[tokio::test]
async fn category_listing_accepts_wrapped_items() {
    let (base, server) = serve_once("200 OK", format!(r#"{{ "items": [{SCARF}] }}"#)).await;
    let catalog = HttpCatalog::new(format!("{base}/"));

    let records = catalog
        .fetch(&CatalogQuery::Category(CategoryId::new(4)))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);

    let head = server.await.unwrap();
    assert!(head.starts_with("GET /categories/4/products HTTP/1.1"), "{head}");
    assert!(!head.to_lowercase().contains("authorization"));
}

#[tokio::test]
async fn non_success_status_is_an_api_failure() {
    let (base, _server) = serve_once("503 Service Unavailable", "down for maintenance".to_string()).await;
    let err = HttpCatalog::new(base).fetch(&CatalogQuery::All).await.unwrap_err();
    assert_eq!(err, FetchFailure::Api(503, "down for maintenance".to_string()));
}

#[tokio::test]
async fn malformed_body_is_a_parse_failure() {
    let bad_rating = SCARF.replace("1.9", "7.5");
    let (base, _server) = serve_once("200 OK", format!("[{bad_rating}]")).await;
    let err = HttpCatalog::new(base).fetch(&CatalogQuery::All).await.unwrap_err();
    match err {
        FetchFailure::Parse(_) => {}
        other => panic!("Expected Parse, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpCatalog::new(format!("http://{addr}"))
        .fetch(&CatalogQuery::All)
        .await
        .unwrap_err();
    match err {
        FetchFailure::Network(_) => {}
        other => panic!("Expected Network, got {other:?}"),
    }
}
