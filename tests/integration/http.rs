//! Persistence client, cache and intake clients against a live server

use crate::support::{self, KNOWN_BARCODE, REJECTED_NAME};
use pantry::api::{HttpPersistence, PersistenceApi};
use pantry::config::ServerConfig;
use pantry::intake::IntakeClient;
use pantry::inventory::{IngredientDraft, IngredientPatch, InventoryCache};
use pantry::PantryError;
use std::sync::Arc;

#[tokio::test]
async fn persistence_round_trip() {
    let server = support::spawn().await;
    let api = HttpPersistence::new(&server.server_config()).unwrap();

    assert!(api.list().await.unwrap().is_empty());

    let created = api
        .create(&IngredientDraft::new("tomato", 3.0, "pcs"))
        .await
        .unwrap();
    assert_eq!(created.id, "1");

    let updated = api
        .update(&created.id, &IngredientPatch::default().with_quantity(5.0))
        .await
        .unwrap();
    assert_eq!(updated.quantity, 5.0);
    assert_eq!(updated.name, "tomato");

    api.delete(&created.id).await.unwrap();
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_of_unknown_id_reports_status() {
    let server = support::spawn().await;
    let api = HttpPersistence::new(&server.server_config()).unwrap();

    let err = api
        .update("404", &IngredientPatch::default().with_unit("g"))
        .await
        .unwrap_err();
    match err {
        PantryError::Status { status, message, .. } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not found");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_answered_with_ok_false_is_an_error() {
    let server = support::spawn().await;
    let seeded = server.seed("salt", 1.0, "kg");
    server.refuse_delete(&seeded.id);

    let cache = InventoryCache::new(Arc::new(
        HttpPersistence::new(&server.server_config()).unwrap(),
    ));
    cache.load().await.unwrap();

    let err = cache.remove(&seeded.id).await.unwrap_err();
    match err {
        PantryError::Status { status, message, .. } => {
            assert_eq!(status, 200);
            assert_eq!(message, "Row is referenced");
        }
        other => panic!("expected Status, got {other:?}"),
    }
    assert_eq!(cache.names(), vec!["salt"]);
    assert_eq!(server.rows().len(), 1);
}

#[tokio::test]
async fn unreachable_server_is_retryable() {
    let config = ServerConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
    };
    let cache = InventoryCache::new(Arc::new(HttpPersistence::new(&config).unwrap()));

    let err = cache.load().await.unwrap_err();
    assert!(matches!(err, PantryError::Transport { operation: "list", .. }));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn cache_add_commits_server_id() {
    let server = support::spawn().await;
    let cache = InventoryCache::new(Arc::new(
        HttpPersistence::new(&server.server_config()).unwrap(),
    ));
    cache.load().await.unwrap();

    let saved = cache
        .add(IngredientDraft::new("basil", 1.0, "bunch"))
        .await
        .unwrap();

    assert_eq!(saved.id, "1");
    assert_eq!(cache.len(), 1);
    assert!(!cache.records()[0].is_pending());
    assert_eq!(server.rows()[0].name, "basil");
}

#[tokio::test]
async fn cache_add_rejected_by_server_leaves_nothing() {
    let server = support::spawn().await;
    server.seed("eggs", 6.0, "pcs");
    let cache = InventoryCache::new(Arc::new(
        HttpPersistence::new(&server.server_config()).unwrap(),
    ));
    cache.load().await.unwrap();

    let err = cache
        .add(IngredientDraft::new(REJECTED_NAME, 1.0, "l"))
        .await
        .unwrap_err();

    assert!(matches!(err, PantryError::Status { status: 500, .. }));
    assert_eq!(cache.names(), vec!["eggs"]);
}

#[tokio::test]
async fn clear_with_one_failed_delete_restores_everything() {
    let server = support::spawn().await;
    server.seed("eggs", 6.0, "pcs");
    let locked = server.seed("milk", 1.0, "l");
    server.seed("flour", 500.0, "g");
    server.lock_delete(&locked.id);

    let cache = InventoryCache::new(Arc::new(
        HttpPersistence::new(&server.server_config()).unwrap(),
    ));
    cache.load().await.unwrap();

    let err = cache.clear_all().await.unwrap_err();
    assert!(matches!(err, PantryError::PartialClear { failed: 1, total: 3 }));
    assert_eq!(cache.len(), 3);

    // The other two deletes went through; a reload shows the drift
    assert_eq!(server.rows().len(), 1);
    assert_eq!(cache.load().await.unwrap(), 1);
    assert_eq!(cache.names(), vec!["milk"]);
}

#[tokio::test]
async fn update_and_remove_through_cache() {
    let server = support::spawn().await;
    let seeded = server.seed("rice", 1.0, "kg");
    let cache = InventoryCache::new(Arc::new(
        HttpPersistence::new(&server.server_config()).unwrap(),
    ));
    cache.load().await.unwrap();

    let updated = cache
        .update(&seeded.id, IngredientPatch::default().with_quantity(2.5))
        .await
        .unwrap();
    assert_eq!(updated.quantity, 2.5);
    assert_eq!(cache.get(&seeded.id).unwrap().quantity, 2.5);

    cache.remove(&seeded.id).await.unwrap();
    assert!(cache.is_empty());
    assert!(server.rows().is_empty());
}

#[tokio::test]
async fn barcode_lookup_via_app_route() {
    let server = support::spawn().await;
    let intake = IntakeClient::new(&server.config()).unwrap();

    let product = intake.lookup_barcode(KNOWN_BARCODE).await.unwrap();
    assert_eq!(product.name, "Greek Yogurt");
    assert_eq!(product.into_draft(), IngredientDraft::new("greek yogurt", 500.0, "g"));

    let err = intake.lookup_barcode("0000").await.unwrap_err();
    assert!(matches!(err, PantryError::BarcodeNotFound(code) if code == "0000"));
}

#[tokio::test]
async fn receipt_extraction_normalizes_items() {
    let server = support::spawn().await;
    let intake = IntakeClient::new(&server.config()).unwrap();

    let scan = intake.extract_receipt(b"\x89PNG fake").await.unwrap();
    assert!(scan.is_fallback());
    assert_eq!(
        scan.drafts,
        vec![
            IngredientDraft::new("tomato", 3.0, "pcs"),
            IngredientDraft::new("flour", 500.0, "g"),
        ]
    );
}

#[tokio::test]
async fn recipes_from_service_and_fallback() {
    let server = support::spawn().await;
    let intake = IntakeClient::new(&server.config()).unwrap();

    let names = vec!["tomato".to_string(), "eggs".to_string()];
    let suggestions = intake.suggest_recipes(&names).await.unwrap();
    assert_eq!(suggestions.ideas[0].title, "Shakshuka");
    assert_eq!(suggestions.ideas[0].missing, vec!["cumin"]);

    let names = vec!["mystery".to_string()];
    let suggestions = intake.suggest_recipes(&names).await.unwrap();
    assert_eq!(suggestions.ideas[0].title, "Mixed Bowl");
    assert_eq!(suggestions.note.as_deref(), Some("model unavailable"));
}
