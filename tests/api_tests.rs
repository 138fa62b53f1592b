//! API end-to-end tests against a running server

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

async fn create_inception(client: &Client) -> i64 {
    let response = client
        .post(format!("{}/movie/", BASE_URL))
        .json(&json!({
            "name": "Inception",
            "year": 2010,
            "genre": "Sci-Fi",
            "director": {"name": "Nolan"},
            "cast": [{"name": "DiCaprio"}]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse film id")
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
async fn test_create_get_delete_movie() {
    let client = Client::new();
    let film_id = create_inception(&client).await;

    let response = client
        .get(format!("{}/movie/{}", BASE_URL, film_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Inception");
    assert_eq!(body["year"], 2010);
    assert_eq!(body["genre"], "Sci-Fi");
    assert_eq!(body["director"]["name"], "Nolan");
    assert_eq!(body["cast"][0]["name"], "DiCaprio");

    let response = client
        .delete(format!("{}/movie/{}", BASE_URL, film_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: i64 = response.json().await.expect("Failed to parse response");
    assert_eq!(deleted, film_id);

    let response = client
        .get(format!("{}/movie/{}", BASE_URL, film_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_update_movie_and_person() {
    let client = Client::new();
    let film_id = create_inception(&client).await;

    let response = client
        .put(format!("{}/movie/{}", BASE_URL, film_id))
        .json(&json!({"name": "Inception", "year": 2010, "genre": "Heist"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = client
        .get(format!("{}/movie/{}", BASE_URL, film_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["genre"], "Heist");
    let actor_id = body["cast"][0]["id"].as_i64().expect("No cast id");

    let response = client
        .put(format!("{}/movie/{}/{}", BASE_URL, film_id, actor_id))
        .json(&json!({"name": "Leonardo DiCaprio", "date_of_birth": "1974-11-11", "role": "Actor"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let person: Value = client
        .get(format!("{}/movie/{}/{}", BASE_URL, film_id, actor_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(person["name"], "Leonardo DiCaprio");
    assert_eq!(person["role"], "Actor");
}

#[tokio::test]
#[ignore]
async fn test_malformed_requests() {
    let client = Client::new();

    let response = client
        .get(format!("{}/movie/not-a-number", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/movie/", BASE_URL))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
