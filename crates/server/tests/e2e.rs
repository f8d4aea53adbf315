use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{header, Request, StatusCode as AxumStatus},
    Router,
};
use models::db::{connect_with_config, migrate, DatabaseConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use server::{routes, state::AppState};

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn build_app() -> anyhow::Result<Router> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migrate(&db).await?;
    Ok(routes::build_router(AppState { db }, routes::default_cors()))
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = build_app().await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn customer_body(first: &str, last: &str, phone: &str) -> Value {
    json!({
        "first_name": first,
        "last_name": last,
        "phone_number": phone,
        "address_details": "X",
        "city": "Y",
        "state": "Z",
        "pin_code": "123456"
    })
}

fn address_body(pin: &str) -> Value {
    json!({ "address_details": "Flat 4", "city": "Nagpur", "state": "MH", "pin_code": pin })
}

async fn create_customer(c: &reqwest::Client, app: &TestApp, body: &Value) -> anyhow::Result<i64> {
    let res = c.post(app.url("/customers")).json(body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    body["customerId"].as_i64().ok_or_else(|| anyhow::anyhow!("missing customerId in {body}"))
}

async fn list(c: &reqwest::Client, app: &TestApp, query: &str) -> anyhow::Result<Vec<Value>> {
    let body = c.get(app.url(&format!("/customers{query}"))).send().await?.json::<Value>().await?;
    Ok(body["data"].as_array().cloned().unwrap_or_default())
}

async fn count(c: &reqwest::Client, app: &TestApp, query: &str) -> anyhow::Result<u64> {
    let res = c.get(app.url(&format!("/customers/count{query}"))).send().await?;
    let body = res.json::<Value>().await?;
    body["data"].as_u64().ok_or_else(|| anyhow::anyhow!("count missing in {body}"))
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(app.url("/health")).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_then_duplicate_conflicts() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let body = customer_body("A", "B", "1234567890");

    let id = create_customer(&c, &app, &body).await?;
    assert!(id > 0);

    let res = c.post(app.url("/customers")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let err = res.json::<Value>().await?;
    assert!(err["error"].is_string());

    assert_eq!(count(&c, &app, "").await?, 1);
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_phone_and_pin_write_nothing() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(app.url("/customers")).json(&customer_body("A", "B", "12345")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["field"], "phone_number");

    let mut bad_pin = customer_body("A", "B", "1234567890");
    bad_pin["pin_code"] = json!("12a456");
    let res = c.post(app.url("/customers")).json(&bad_pin).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["field"], "pin_code");

    assert!(list(&c, &app, "").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_get_update_and_unknown_customer() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let id = create_customer(&c, &app, &customer_body("Asha", "Rao", "9876543210")).await?;

    let res = c.get(app.url(&format!("/customers/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["first_name"], "Asha");
    assert_eq!(body["data"]["addresses"].as_array().map(Vec::len), Some(1));

    // name change only; no address fields, so no new row
    let res = c
        .put(app.url(&format!("/customers/{id}")))
        .json(&json!({
            "first_name": "Asha",
            "last_name": "Kulkarni",
            "phone_number": "9876543210"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["customerId"], id);
    assert!(body.get("addressId").is_none());

    let mut with_address = customer_body("Asha", "Kulkarni", "9876543210");
    with_address["city"] = json!("Nashik");
    let res = c.put(app.url(&format!("/customers/{id}"))).json(&with_address).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.json::<Value>().await?["addressId"].is_i64());

    let res = c.put(app.url("/customers/999999")).json(&with_address).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.get(app.url("/customers/999999")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.get(app.url(&format!("/customers/{id}"))).send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["last_name"], "Kulkarni");
    assert_eq!(body["data"]["addresses"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn e2e_address_count_filters_match_count() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let single = create_customer(&c, &app, &customer_body("One", "Address", "1111111111")).await?;
    let multi = create_customer(&c, &app, &customer_body("Many", "Addresses", "2222222222")).await?;
    let res = c
        .post(app.url(&format!("/customers/{multi}/addresses")))
        .json(&address_body("440001"))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let bare = create_customer(&c, &app, &customer_body("No", "Address", "3333333333")).await?;
    let res = c.get(app.url(&format!("/customers/{bare}/addresses"))).send().await?;
    let addresses = res.json::<Value>().await?;
    let address_id = addresses["data"][0]["id"].as_i64().unwrap_or_default();
    let res = c.delete(app.url(&format!("/addresses/{address_id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let ids = |rows: Vec<Value>| rows.iter().filter_map(|r| r["id"].as_i64()).collect::<Vec<_>>();

    assert_eq!(ids(list(&c, &app, "?addressCount=single").await?), vec![single]);
    assert_eq!(ids(list(&c, &app, "?addressCount=multiple").await?), vec![multi]);
    assert_eq!(ids(list(&c, &app, "").await?), vec![bare, multi, single]);

    let queries = [
        "",
        "?addressCount=single",
        "?addressCount=multiple",
        "?q=address",
        "?q=nagpur&addressCount=multiple",
    ];
    for query in queries {
        let listed = list(&c, &app, query).await?.len();
        assert_eq!(count(&c, &app, query).await? as usize, listed, "query {query}");
    }

    let res = c.get(app.url("/customers?addressCount=several")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["field"], "addressCount");
    Ok(())
}

#[tokio::test]
async fn e2e_search_is_case_insensitive() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    create_customer(&c, &app, &customer_body("Meera", "Joshi", "4444444444")).await?;
    create_customer(&c, &app, &customer_body("Ravi", "Patil", "5555555555")).await?;

    let body = c.get(app.url("/customers/search?q=JOSH")).send().await?.json::<Value>().await?;
    let rows = body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["first_name"], "Meera");

    let body = c.get(app.url("/customers/search?q=")).send().await?.json::<Value>().await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn e2e_delete_customer_cascades() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let id = create_customer(&c, &app, &customer_body("Del", "Me", "6666666666")).await?;
    for pin in ["411001", "411002"] {
        let res = c.post(app.url("/addresses")).json(&{
            let mut b = address_body(pin);
            b["customer_id"] = json!(id);
            b
        }).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let res = c.delete(app.url(&format!("/customers/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["deletedAddresses"], 3);

    let res = c.get(app.url(&format!("/customers/{id}/addresses"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.delete(app.url(&format!("/customers/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_address_for_unknown_customer_is_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let mut body = address_body("560001");
    body["customer_id"] = json!(4242);
    let res = c.post(app.url("/addresses")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.put(app.url("/addresses/4242")).json(&address_body("560001")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() -> anyhow::Result<()> {
    let app = build_app().await?;
    let res = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), AxumStatus::NOT_FOUND);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn malformed_json_and_bad_ids_are_bad_requests() -> anyhow::Result<()> {
    let app = build_app().await?;

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/customers")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"first_name\": "))?,
        )
        .await?;
    assert_eq!(res.status(), AxumStatus::BAD_REQUEST);

    let res = app
        .oneshot(Request::builder().uri("/customers/abc").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), AxumStatus::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_customer_routes() -> anyhow::Result<()> {
    let app = build_app().await?;
    let res = app
        .oneshot(Request::builder().uri("/api-docs/openapi.json").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), AxumStatus::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let doc: Value = serde_json::from_slice(&bytes)?;
    assert!(doc["paths"]["/customers/{id}"].is_object());
    Ok(())
}
