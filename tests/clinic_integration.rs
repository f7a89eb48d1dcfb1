use chrono::{Duration, SecondsFormat, Utc};
use petclinic_api::config::CorsConfig;
use petclinic_api::routes::build_app;
use petclinic_api::{seed_if_empty, MemoryStore, SeedOutcome};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }
}

/// Serve a seeded in-memory clinic on an ephemeral port
async fn spawn_clinic() -> TestClient {
    let store = Arc::new(MemoryStore::new());
    let outcome = seed_if_empty(&*store, Utc::now())
        .await
        .expect("Failed to seed store");
    assert!(matches!(outcome, SeedOutcome::Seeded { .. }));

    let app = build_app(store, &CorsConfig::default());
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestClient::new(format!("http://{}", address))
}

#[tokio::test]
async fn test_seeded_clinic_workflow() {
    let client = spawn_clinic().await;

    // Seeded owners
    let owners: Value = client
        .get("/owners")
        .await
        .expect("Failed to list owners")
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = owners
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["John Doe", "Jane Smith", "Alice Johnson"]);

    // John owns Buddy and Mittens
    let john: Value = client.get("/owners/1").await.unwrap().json().await.unwrap();
    let pets: Vec<&str> = john["pets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(pets, vec!["Buddy", "Mittens"]);

    // Seed has three future visits, soonest first
    let upcoming: Value = client
        .get("/appointments/upcoming")
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let upcoming = upcoming.as_array().unwrap();
    assert_eq!(upcoming.len(), 3);
    assert_eq!(upcoming[0]["petName"], "Whiskers");
    assert_eq!(upcoming[0]["status"], "Cancelled");
    assert_eq!(upcoming[0]["ownerName"], "Jane Smith");

    // New owner, pet and a visit tomorrow
    let response = client
        .post("/owners", json!({"name": "Maria Garcia", "phone": "555-2468"}))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let owner: Value = response.json().await.unwrap();
    assert_eq!(location, format!("/owners/{}", owner["ownerId"]));

    let response = client
        .post(
            "/pets",
            json!({
                "name": "Luna",
                "species": "Cat",
                "birthDate": "2023-02-01",
                "isNeutered": false,
                "ownerId": owner["ownerId"]
            }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let pet: Value = response.json().await.unwrap();

    let tomorrow = (Utc::now() + Duration::days(1)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let response = client
        .post(
            "/appointments",
            json!({"petId": pet["petId"], "visitDate": tomorrow, "reason": "First visit"}),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let appointment: Value = response.json().await.unwrap();
    assert_eq!(appointment["status"], "Scheduled");

    let upcoming: Value = client
        .get("/appointments/upcoming")
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(upcoming.as_array().unwrap().len(), 4);
    assert_eq!(upcoming[0]["petName"], "Luna");
    assert_eq!(upcoming[0]["ownerName"], "Maria Garcia");

    // Dangling references are refused with a readable reason
    let response = client
        .post(
            "/appointments",
            json!({"petId": 9999, "visitDate": tomorrow, "reason": "Ghost visit"}),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "PetId not found.");

    let pets: Value = client.get("/pets").await.unwrap().json().await.unwrap();
    assert_eq!(pets.as_array().unwrap().len(), 6);
}
