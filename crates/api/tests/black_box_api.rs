use std::sync::Arc;

use catalog_api::app::AppServices;
use catalog_products::BulkValidationPolicy;
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(policy: BulkValidationPolicy) -> Self {
        // Same router as prod over the in-memory store, on an ephemeral port.
        let app = catalog_api::app::build_app(Arc::new(AppServices::in_memory(policy)));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create(client: &reqwest::Client, srv: &TestServer, name: &str, price: f64) -> serde_json::Value {
    let res = client
        .post(srv.url("/products"))
        .json(&json!({ "name": name, "price": price }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn(BulkValidationPolicy::default()).await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn widget_lifecycle_over_http() {
    let srv = TestServer::spawn(BulkValidationPolicy::AvailableOnly).await;
    let client = reqwest::Client::new();

    let widget = create(&client, &srv, "Widget", 10.0).await;
    assert_eq!(widget["id"], 1);
    assert_eq!(widget["name"], "Widget");
    assert_eq!(widget["price"], 10.0);
    assert_eq!(widget["available"], true);
    assert!(widget["createdAt"].is_string());

    // List
    let res = client
        .get(srv.url("/products?page=1&limit=10"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let page: serde_json::Value = res.json().await.unwrap();
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(
        page["meta"],
        json!({ "page": 1, "nextPage": 2, "limit": 10, "total": 1, "lastPage": 1 })
    );

    // Soft delete
    let res = client.delete(srv.url("/products/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let removed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(removed["available"], false);

    // Gone for reads
    let res = client.get(srv.url("/products/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "message": "Product #1 not found", "status": "NotFound" })
    );

    // Invalid for bulk validation
    let res = client
        .post(srv.url("/products/validate"))
        .json(&json!({ "ids": [1] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "message": "some products are not valid", "status": "BadRequest" })
    );
}

#[tokio::test]
async fn soft_deleted_products_validate_under_lenient_policy() {
    let srv = TestServer::spawn(BulkValidationPolicy::IncludeUnavailable).await;
    let client = reqwest::Client::new();

    create(&client, &srv, "Widget", 10.0).await;
    client.delete(srv.url("/products/1")).send().await.unwrap();

    let res = client
        .post(srv.url("/products/validate"))
        .json(&json!({ "ids": [1, 1] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let valid: serde_json::Value = res.json().await.unwrap();
    let valid = valid.as_array().unwrap();
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0]["id"], 1);
    assert_eq!(valid[0]["available"], false);
}

#[tokio::test]
async fn update_ignores_id_in_body() {
    let srv = TestServer::spawn(BulkValidationPolicy::default()).await;
    let client = reqwest::Client::new();

    create(&client, &srv, "Widget", 10.0).await;

    let res = client
        .patch(srv.url("/products/1"))
        .json(&json!({ "id": 99, "price": 12.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["name"], "Widget");
    assert_eq!(updated["price"], 12.5);

    let res = client.get(srv.url("/products/99")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_input_yields_bad_request_payload() {
    let srv = TestServer::spawn(BulkValidationPolicy::default()).await;
    let client = reqwest::Client::new();

    // Non-numeric path id
    let res = client.get(srv.url("/products/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "BadRequest");

    // Malformed JSON
    let res = client
        .post(srv.url("/products"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "BadRequest");

    // Empty name
    let res = client
        .post(srv.url("/products"))
        .json(&json!({ "name": "  ", "price": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Zero limit
    let res = client
        .get(srv.url("/products?limit=0"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "limit must be a positive number");
}

#[tokio::test]
async fn list_defaults_and_paging_past_the_end() {
    let srv = TestServer::spawn(BulkValidationPolicy::default()).await;
    let client = reqwest::Client::new();

    for i in 0..3 {
        create(&client, &srv, &format!("item-{i}"), 1.0).await;
    }

    let page: serde_json::Value = client
        .get(srv.url("/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["meta"]["page"], 1);
    assert_eq!(page["meta"]["limit"], 10);
    assert_eq!(page["meta"]["total"], 3);

    let page: serde_json::Value = client
        .get(srv.url("/products?page=3&limit=2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(page["data"].as_array().unwrap().is_empty());
    assert_eq!(page["meta"]["nextPage"], 4);
    assert_eq!(page["meta"]["lastPage"], 2);
}
