//! In-process stand-in for the pantry server

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use pantry::api::{ServerRecord, ServerTimestamp};
use pantry::config::{Config, ServerConfig};
use pantry::inventory::IngredientDraft;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Name that the create route refuses
pub const REJECTED_NAME: &str = "spoiled milk";

/// Barcode known to the lookup route
pub const KNOWN_BARCODE: &str = "5000000000001";

#[derive(Default)]
pub struct Store {
    pub rows: Vec<ServerRecord>,
    next_id: u64,
    /// Ids whose delete fails with a 500
    pub locked: HashSet<String>,
    /// Ids whose delete answers 200 with `{"ok": false}`
    pub refused: HashSet<String>,
}

impl Store {
    fn insert(&mut self, name: &str, quantity: f64, unit: &str) -> ServerRecord {
        self.next_id += 1;
        let record = ServerRecord {
            id: self.next_id.to_string(),
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            added_at: ServerTimestamp::from(Utc::now()),
        };
        self.rows.push(record.clone());
        record
    }
}

pub type SharedStore = Arc<Mutex<Store>>;

type Reply<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

async fn list(State(store): State<SharedStore>) -> Json<Vec<ServerRecord>> {
    Json(store.lock().unwrap().rows.clone())
}

async fn create(
    State(store): State<SharedStore>,
    Json(draft): Json<IngredientDraft>,
) -> Reply<ServerRecord> {
    if draft.name == REJECTED_NAME {
        return Err(failure(StatusCode::INTERNAL_SERVER_ERROR, "Create failed"));
    }
    let record = store
        .lock()
        .unwrap()
        .insert(&draft.name, draft.quantity, &draft.unit);
    Ok(Json(record))
}

async fn update(State(store): State<SharedStore>, Json(body): Json<Value>) -> Reply<ServerRecord> {
    let id = body["id"].as_str().unwrap_or_default().to_string();
    let mut store = store.lock().unwrap();
    let row = store
        .rows
        .iter_mut()
        .find(|row| row.id == id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Not found"))?;

    if let Some(name) = body["name"].as_str() {
        row.name = name.to_string();
    }
    if let Some(quantity) = body["quantity"].as_f64() {
        row.quantity = quantity;
    }
    if let Some(unit) = body["unit"].as_str() {
        row.unit = unit.to_string();
    }
    Ok(Json(row.clone()))
}

async fn delete(
    State(store): State<SharedStore>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<Value> {
    let id = params.get("id").cloned().unwrap_or_default();
    let mut store = store.lock().unwrap();
    if store.locked.contains(&id) {
        return Err(failure(StatusCode::INTERNAL_SERVER_ERROR, "Delete failed"));
    }
    if store.refused.contains(&id) {
        return Ok(Json(json!({ "ok": false, "error": "Row is referenced" })));
    }
    store.rows.retain(|row| row.id != id);
    Ok(Json(json!({ "ok": true })))
}

async fn barcode(Query(params): Query<HashMap<String, String>>) -> Reply<Value> {
    match params.get("code").map(String::as_str) {
        Some(KNOWN_BARCODE) => Ok(Json(json!({
            "found": true,
            "name": "Greek Yogurt",
            "quantityGuess": 500,
            "unitGuess": "g",
        }))),
        _ => Err((StatusCode::NOT_FOUND, Json(json!({ "found": false })))),
    }
}

async fn recipes(Json(body): Json<Value>) -> Json<Value> {
    let ingredients: Vec<String> = body["ingredients"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    if ingredients.iter().any(|i| i == "mystery") {
        return Json(json!({ "ideas": [], "note": "model unavailable" }));
    }
    Json(json!({
        "ideas": [{
            "id": "shakshuka",
            "title": "Shakshuka",
            "ingredients": ingredients,
            "steps": ["Simmer tomatoes", "Poach eggs"],
            "missing": ["cumin"],
        }]
    }))
}

async fn ocr(Json(body): Json<Value>) -> Reply<Value> {
    if body["imageBase64"].as_str().unwrap_or_default().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Missing imageBase64"));
    }
    Ok(Json(json!({
        "note": "Missing GOOGLE_API_KEY; using fallback parse",
        "ingredients": [
            { "name": "Tomato", "quantity": 3, "unit": "pieces" },
            { "name": "Flour", "quantity": 500, "unit": "grams" },
            { "quantity": 2 },
        ]
    })))
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub store: SharedStore,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            base_url: self.base_url(),
            timeout_secs: 5,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            server: self.server_config(),
            ..Config::default()
        }
    }

    /// Seed a row directly into the store
    pub fn seed(&self, name: &str, quantity: f64, unit: &str) -> ServerRecord {
        self.store.lock().unwrap().insert(name, quantity, unit)
    }

    pub fn lock_delete(&self, id: &str) {
        self.store.lock().unwrap().locked.insert(id.to_string());
    }

    pub fn refuse_delete(&self, id: &str) {
        self.store.lock().unwrap().refused.insert(id.to_string());
    }

    pub fn rows(&self) -> Vec<ServerRecord> {
        self.store.lock().unwrap().rows.clone()
    }
}

pub async fn spawn() -> TestServer {
    let store = SharedStore::default();
    let app = Router::new()
        .route(
            "/api/ingredients",
            get(list).post(create).put(update).delete(delete),
        )
        .route("/api/barcode", get(barcode))
        .route("/api/recipes", post(recipes))
        .route("/api/ocr", post(ocr))
        .with_state(Arc::clone(&store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    TestServer { addr, store }
}
