//! API integration tests
//!
//! Require a running server and database. Run with: cargo test -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:3333/api/v1";

/// Suffix keeping serials and names unique across runs
fn unique() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

fn equipment_payload(name: &str, num_serie: &str) -> Value {
    json!({
        "name": name,
        "modelo": "FZ-500",
        "numSerie": num_serie,
        "marca": "CoolTech",
        "loja": "Loja Central",
        "setor": "Açougue",
        "endereco": "Rua A, 100",
        "compressor": "Embraco 1/2HP",
        "controlador": "Full Gauge TC-900",
        "refrigerante": "R-134a",
        "status": "operacional",
        "observacoes": "Instalado em 2024"
    })
}

async fn list(client: &Client, query: &[(&str, &str)]) -> Value {
    let response = client
        .get(format!("{}/equipments", BASE_URL))
        .query(query)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse response")
}

/// Create an equipment and return its public id
async fn create(client: &Client, payload: &Value) -> String {
    let public_id = format!("pub-{}", unique());
    let mut payload = payload.clone();
    payload["publicId"] = json!(public_id);

    let response = client
        .post(format!("{}/equipments", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    public_id
}

async fn get(client: &Client, public_id: &str) -> reqwest::Response {
    client
        .get(format!("{}/equipments/{}", BASE_URL, public_id))
        .send()
        .await
        .expect("Failed to send request")
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
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_create_and_get_equipment() {
    let client = Client::new();
    let serial = format!("SN-{}", unique());
    let payload = equipment_payload("Freezer Açougue", &serial);
    let public_id = format!("pub-{}", unique());
    let mut body = payload.clone();
    body["publicId"] = json!(public_id);

    let response = client
        .post(format!("{}/equipments", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.expect("Failed to parse response");
    let id = created["id"].as_str().expect("No equipment ID");
    assert!(Uuid::parse_str(id).is_ok());

    let response = get(&client, &public_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    let equipment = &body["equipment"];
    assert_eq!(equipment["id"], id);
    assert_eq!(equipment["publicId"], public_id.as_str());
    assert_eq!(equipment["status"], "operacional");
    for field in [
        "name", "modelo", "numSerie", "marca", "loja", "setor", "endereco",
        "compressor", "controlador", "refrigerante", "observacoes",
    ] {
        assert_eq!(equipment[field], payload[field], "field {}", field);
    }
}

#[tokio::test]
#[ignore]
async fn test_create_generates_public_id() {
    let client = Client::new();
    let serial = format!("SN-{}", unique());
    let name = format!("Balcão Frios {}", unique());

    let response = client
        .post(format!("{}/equipments", BASE_URL))
        .json(&equipment_payload(&name, &serial))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let page = list(&client, &[("search", name.as_str())]).await;
    assert_eq!(page["total"], 1);
    let public_id = page["equipments"][0]["publicId"].as_str().unwrap();
    assert_eq!(public_id.len(), 8);
    assert_eq!(get(&client, public_id).await.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_create_short_name_writes_nothing() {
    let client = Client::new();
    let before = list(&client, &[]).await["total"].as_i64().unwrap();

    let response = client
        .post(format!("{}/equipments", BASE_URL))
        .json(&equipment_payload("Frz", &format!("SN-{}", unique())))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let after = list(&client, &[]).await["total"].as_i64().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_num_serie_conflicts() {
    let client = Client::new();
    let serial = format!("SN-{}", unique());
    let name = format!("Camara Fria {}", unique());
    create(&client, &equipment_payload(&name, &serial)).await;

    let mut duplicate = equipment_payload(&name, &serial);
    duplicate["publicId"] = json!(format!("pub-{}", unique()));
    let response = client
        .post(format!("{}/equipments", BASE_URL))
        .json(&duplicate)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let page = list(&client, &[("search", name.as_str())]).await;
    assert_eq!(page["total"], 1);
}

#[tokio::test]
#[ignore]
async fn test_search_and_total_independent_of_page() {
    let client = Client::new();
    let tag = unique();
    for i in 0..3 {
        let name = format!("Freezer {} {}", tag, i);
        create(&client, &equipment_payload(&name, &format!("SN-{}", unique()))).await;
    }
    create(&client, &equipment_payload(&format!("Geladeira {}", tag), &format!("SN-{}", unique()))).await;

    let search = format!("FREEZER {}", tag.to_uppercase());
    let page1 = list(&client, &[("search", search.as_str()), ("orderBy", "name")]).await;
    assert_eq!(page1["total"], 3);
    let names: Vec<&str> = page1["equipments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names.iter().all(|n| n.contains("Freezer")));
    assert!(names.windows(2).all(|w| w[0] <= w[1]));

    let page2 = list(&client, &[("search", search.as_str()), ("page", "2")]).await;
    assert_eq!(page2["equipments"].as_array().unwrap().len(), 0);
    assert_eq!(page2["total"], 3);
}

#[tokio::test]
#[ignore]
async fn test_update_single_field() {
    let client = Client::new();
    let name = format!("Expositor {}", unique());
    let public_id = create(&client, &equipment_payload(&name, &format!("SN-{}", unique()))).await;

    let before: Value = get(&client, &public_id).await.json().await.unwrap();

    let response = client
        .put(format!("{}/equipments/{}", BASE_URL, public_id))
        .json(&json!({ "status": "manutencao" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();

    let mut expected = before["equipment"].clone();
    expected["status"] = json!("manutencao");
    expected["modifDate"] = updated["equipment"]["modifDate"].clone();
    assert_eq!(updated["equipment"], expected);
    assert!(updated["equipment"]["modifDate"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_update_clears_notes() {
    let client = Client::new();
    let name = format!("Ilha Congelados {}", unique());
    let public_id = create(&client, &equipment_payload(&name, &format!("SN-{}", unique()))).await;

    let response = client
        .put(format!("{}/equipments/{}", BASE_URL, public_id))
        .json(&json!({ "observacoes": null }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert!(updated["equipment"]["observacoes"].is_null());
    assert_eq!(updated["equipment"]["name"], name.as_str());
}

#[tokio::test]
#[ignore]
async fn test_unknown_public_id_not_found() {
    let client = Client::new();
    let missing = format!("missing-{}", unique());
    let before = list(&client, &[]).await["total"].clone();

    let response = get(&client, &missing).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.bytes().await.unwrap().is_empty());

    let response = client
        .put(format!("{}/equipments/{}", BASE_URL, missing))
        .json(&json!({ "status": "critico" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.bytes().await.unwrap().is_empty());

    assert_eq!(list(&client, &[]).await["total"], before);
}
