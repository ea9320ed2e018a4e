//! API integration tests against a running server
//!
//! Run with: cargo test --test api_tests -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

const USER_ID: i64 = 920_001;
const ISBN: i64 = 9_200_000_001;

async fn cleanup(client: &Client) {
    let _ = client.delete(format!("{}/book/{}", BASE_URL, ISBN)).send().await;
    let _ = client.delete(format!("{}/user/{}", BASE_URL, USER_ID)).send().await;
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_get_missing_book() {
    let client = Client::new();

    let response = client
        .get(format!("{}/book/{}", BASE_URL, 9_299_999_999_i64))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
#[ignore]
async fn test_listing_lifecycle() {
    let client = Client::new();
    cleanup(&client).await;

    // Owner
    let response = client
        .post(format!("{}/user/{}", BASE_URL, USER_ID))
        .json(&json!({"full_name": "Brock Boeser", "class_year": 1}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let user: Value = response.json().await.expect("Failed to parse response");
    let token = user["token"].as_str().expect("No token").to_string();

    // Book
    let response = client
        .post(format!("{}/book/{}", BASE_URL, ISBN))
        .json(&json!({"title": "Evolutionary Analysis", "author": "Jon. C Herron"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Duplicate book
    let response = client
        .post(format!("{}/book/{}", BASE_URL, ISBN))
        .json(&json!({"title": "Something Else", "author": "Nobody"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Listing, with the owner under its legacy name
    let response = client
        .post(format!("{}/listing/{}", BASE_URL, ISBN))
        .json(&json!({
            "price": 110.00,
            "condition": "like new",
            "isbn": ISBN,
            "google_tok": token,
            "status": "available"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let listing: Value = response.json().await.expect("Failed to parse response");
    let listing_id = listing["listing_id"].as_i64().expect("No listing id");
    assert_eq!(listing["price"], "110.00");
    assert_eq!(listing["owner_token"], token.as_str());

    // Book nests the listing
    let book: Value = client
        .get(format!("{}/book/{}", BASE_URL, ISBN))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["title"], "Evolutionary Analysis");
    assert_eq!(book["listings"][0]["listing_id"], listing_id);

    // Mark it sold
    let response = client
        .put(format!("{}/listing/{}", BASE_URL, listing_id))
        .json(&json!({"condition": "like new", "status": "sold"}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["status"], "sold");
    assert_eq!(updated["isbn"], ISBN);

    // Filter by status
    let body: Value = client
        .get(format!("{}/listings?status=sold&isbn={}", BASE_URL, ISBN))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["listings"].as_array().map(Vec::len), Some(1));

    // Deleting the book removes the listing
    let response = client
        .delete(format!("{}/book/{}", BASE_URL, ISBN))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/listing/{}", BASE_URL, listing_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    cleanup(&client).await;
}

#[tokio::test]
#[ignore]
async fn test_update_missing_listing() {
    let client = Client::new();

    let response = client
        .put(format!("{}/listing/{}", BASE_URL, i32::MAX))
        .json(&json!({"condition": "poor"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_list_books_nest_listings() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books?order_by=title", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["books"].as_array().expect("No books array");
    assert!(books.iter().all(|b| b["listings"].is_array()));
}
