// apps/storefront_api/tests/products_api_tests.rs

#[macro_use]
mod common;

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::test;
use serde_json::{json, Value};
use storefront_api::db;

use common::{seeded_state, PRODUCT_IMAGE};

fn new_product_body(category_id: i64) -> Value {
  json!({
    "name": "New Product",
    "price": 10000,
    "description": "A description",
    "categoryId": category_id,
    "image": PRODUCT_IMAGE,
  })
}

#[actix_rt::test]
async fn list_returns_every_product_with_its_category() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::get().uri("/api/v1/products").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Vec<Value> = test::read_body_json(resp).await;
  let stored = db::products::count_products(&state.db_pool).await.unwrap();
  assert_eq!(body.len() as i64, stored);
  for product in &body {
    assert!(product["category"].is_object(), "product without category: {}", product);
    assert_eq!(product["category"]["id"], product["categoryId"]);
  }
}

#[actix_rt::test]
async fn list_applies_limit_and_offset() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::get()
    .uri("/api/v1/products?limit=2&offset=0")
    .to_request();
  let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body.len(), 2);
  assert_eq!(body[0]["id"], 1);
  assert_eq!(body[1]["id"], 2);

  let req = test::TestRequest::get()
    .uri("/api/v1/products?limit=2&offset=4")
    .to_request();
  let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body.len(), 1);
}

#[actix_rt::test]
async fn offset_without_limit_returns_the_remaining_rows() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::get().uri("/api/v1/products?offset=3").to_request();
  let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body.len(), 2);
  assert_eq!(body[0]["id"], 4);
}

#[actix_rt::test]
async fn price_filters_narrow_the_listing() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::get().uri("/api/v1/products?price=450").to_request();
  let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body.len(), 1);
  assert_eq!(body[0]["name"], "Strategy Board Game");

  let req = test::TestRequest::get()
    .uri("/api/v1/products?price_min=1000&price_max=2000")
    .to_request();
  let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  let prices: Vec<i64> = body.iter().map(|p| p["price"].as_i64().unwrap()).collect();
  assert_eq!(prices, vec![1899, 1250]);

  let req = test::TestRequest::get()
    .uri("/api/v1/products?price=1899&price_min=1000&price_max=2000&limit=5")
    .to_request();
  let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body.len(), 1);
  assert_eq!(body[0]["name"], "Racing Wheel");

  let req = test::TestRequest::get().uri("/api/v1/products?price_min=2000").to_request();
  let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body.len(), 1);
  assert_eq!(body[0]["name"], "Smart Watch");
}

#[actix_rt::test]
async fn bad_query_values_are_client_errors() {
  let state = seeded_state().await;
  let app = init_app!(state);

  for uri in [
    "/api/v1/products?price_min=2000&price_max=1000",
    "/api/v1/products?limit=-1",
    "/api/v1/products?offset=ten",
    "/api/v1/products?price=-5",
  ] {
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string(), "{}", uri);
  }
}

#[actix_rt::test]
async fn get_returns_the_stored_product() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let stored = db::products::find_product_by_id(&state.db_pool, 1)
    .await
    .unwrap()
    .expect("fixture product 1");

  let req = test::TestRequest::get().uri("/api/v1/products/1").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["name"], stored.product.name.as_str());
  assert_eq!(body["category"]["name"], "Games");
}

#[actix_rt::test]
async fn get_unknown_product_is_not_found() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::get().uri("/api/v1/products/100").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let body: Value = test::read_body_json(resp).await;
  assert!(body["error"].as_str().unwrap().contains("100"));
}

#[actix_rt::test]
async fn non_numeric_product_id_is_a_client_error() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::get().uri("/api/v1/products/abc").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn create_persists_the_product() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/v1/products")
    .set_json(new_product_body(1))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body: Value = test::read_body_json(resp).await;
  let id = body["id"].as_i64().expect("created product has an id");
  assert_eq!(body["category"]["id"], 1);

  let stored = db::products::find_product_by_id(&state.db_pool, id)
    .await
    .unwrap()
    .expect("created product is persisted");
  assert_eq!(stored.product.name, "New Product");
  assert_eq!(stored.product.price, 10000);
  assert_eq!(db::products::count_products(&state.db_pool).await.unwrap(), 6);
}

#[actix_rt::test]
async fn create_with_unknown_category_is_not_found() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/v1/products")
    .set_json(new_product_body(100))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(db::products::count_products(&state.db_pool).await.unwrap(), 5);
}

#[actix_rt::test]
async fn create_with_missing_fields_is_a_client_error() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/v1/products")
    .set_json(json!({ "categoryId": 1, "image": PRODUCT_IMAGE }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let body: Value = test::read_body_json(resp).await;
  let message = body["error"].as_str().unwrap();
  assert!(message.contains("name"));
  assert!(message.contains("price"));
  assert!(message.contains("description"));
}

#[actix_rt::test]
async fn missing_fields_are_reported_before_an_unknown_category() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/v1/products")
    .set_json(json!({ "categoryId": 100 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn malformed_json_body_is_a_client_error() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/v1/products")
    .insert_header(ContentType::json())
    .set_payload("{\"name\": ")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let body: Value = test::read_body_json(resp).await;
  assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn patch_updates_only_the_given_fields() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::patch()
    .uri("/api/v1/products/1")
    .set_json(json!({ "price": 1599, "categoryId": 3 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["price"], 1599);
  assert_eq!(body["name"], "Racing Wheel");
  assert_eq!(body["category"]["name"], "Electronics");
}

#[actix_rt::test]
async fn patch_rejects_bad_input() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let cases = [
    ("/api/v1/products/1", json!({ "categoryId": 100 }), StatusCode::NOT_FOUND),
    ("/api/v1/products/100", json!({ "price": 10 }), StatusCode::NOT_FOUND),
    ("/api/v1/products/1", json!({}), StatusCode::BAD_REQUEST),
    ("/api/v1/products/1", json!({ "price": 0 }), StatusCode::BAD_REQUEST),
  ];
  for (uri, payload, expected) in cases {
    let req = test::TestRequest::patch().uri(uri).set_json(&payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), expected, "{} {}", uri, payload);
  }

  let unchanged = db::products::find_product_by_id(&state.db_pool, 1).await.unwrap().unwrap();
  assert_eq!(unchanged.product.price, 1899);
  assert_eq!(unchanged.product.category_id, 1);
}

#[actix_rt::test]
async fn delete_removes_the_product() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::delete().uri("/api/v1/products/2").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "id": 2 }));

  let req = test::TestRequest::get().uri("/api/v1/products/2").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::delete().uri("/api/v1/products/2").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn down_seed_empties_the_catalog() {
  let state = seeded_state().await;
  let app = init_app!(state);

  db::seed::down_seed(&state.db_pool).await.unwrap();
  assert_eq!(db::products::count_products(&state.db_pool).await.unwrap(), 0);
  assert_eq!(db::categories::count_categories(&state.db_pool).await.unwrap(), 0);

  let req = test::TestRequest::get().uri("/api/v1/products").to_request();
  let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  assert!(body.is_empty());

  // Ids restart once the fixtures are loaded again.
  db::seed::up_seed(&state.db_pool).await.unwrap();
  let req = test::TestRequest::get().uri("/api/v1/products/1").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn health_reports_ok() {
  let state = seeded_state().await;
  let app = init_app!(state);

  let req = test::TestRequest::get().uri("/api/v1/health").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_rt::test]
async fn health_reports_store_failure_without_details() {
  let state = seeded_state().await;
  let app = init_app!(state);

  state.db_pool.close().await;

  let req = test::TestRequest::get().uri("/api/v1/health").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "error": "Database operation failed" }));
}
