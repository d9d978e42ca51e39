use std::str::FromStr;

use serde_json::{json, Value as JsnVal};

use storefront::datastore::{AppDeleteInfo, AppDocument, AppUpdateInfo, DocumentId};
use storefront::error::AppErrorCode;

use crate::ut_inmem_store;

fn ut_document(value: JsnVal) -> AppDocument {
    match value {
        JsnVal::Object(m) => m,
        _others => AppDocument::new(),
    }
}

#[tokio::test]
async fn save_fetch_ok() {
    let store = ut_inmem_store(10);
    store.create_collection("products").await.unwrap();
    let mut ids = Vec::new();
    for (name, value) in [("pc", 5000), ("phone", 1200), ("mouse", 25)] {
        let id = DocumentId::generate();
        let content = ut_document(json!({"name": name, "value": value}));
        let result = store.insert("products", id, content).await;
        assert!(result.is_ok());
        ids.push(id);
    }
    let rows = store.fetch_all("products").await.unwrap();
    assert_eq!(rows.len(), 3);
    // insertion order is preserved
    let actual_ids = rows.iter().map(|(id, _c)| *id).collect::<Vec<_>>();
    assert_eq!(actual_ids, ids);
    assert_eq!(rows[0].1.get("name"), Some(&json!("pc")));

    let found = store.fetch_one("products", ids[1]).await.unwrap();
    assert!(found.is_some());
    let found = found.unwrap();
    assert_eq!(found.get("value"), Some(&json!(1200)));

    let unknown = DocumentId::generate();
    let found = store.fetch_one("products", unknown).await.unwrap();
    assert!(found.is_none());
} // end of fn save_fetch_ok

#[tokio::test]
async fn collection_not_exist() {
    let store = ut_inmem_store(10);
    let content = ut_document(json!({"name": "pc"}));
    let result = store.insert("products", DocumentId::generate(), content).await;
    assert!(result.is_err());
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::DataTableNotExist);
    let result = store.fetch_all("orders").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn exceed_max_items() {
    let store = ut_inmem_store(2);
    store.create_collection("orders").await.unwrap();
    // collection creation is idempotent, existing rows are kept
    let content = ut_document(json!({"quantity": "1"}));
    store
        .insert("orders", DocumentId::generate(), content.clone())
        .await
        .unwrap();
    store.create_collection("orders").await.unwrap();
    store
        .insert("orders", DocumentId::generate(), content.clone())
        .await
        .unwrap();
    let result = store.insert("orders", DocumentId::generate(), content).await;
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().code, AppErrorCode::ExceedingMaxLimit);
    let rows = store.fetch_all("orders").await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn duplicate_id_rejected() {
    let store = ut_inmem_store(5);
    store.create_collection("orders").await.unwrap();
    let id = DocumentId::generate();
    let content = ut_document(json!({"quantity": "1"}));
    store.insert("orders", id, content.clone()).await.unwrap();
    let result = store.insert("orders", id, content).await;
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().code, AppErrorCode::InvalidInput);
}

#[tokio::test]
async fn update_fields_ok() {
    let store = ut_inmem_store(5);
    store.create_collection("products").await.unwrap();
    let id = DocumentId::generate();
    let content = ut_document(json!({"name": "pc", "value": 5000, "__v": 0}));
    store.insert("products", id, content).await.unwrap();

    let fields = ut_document(json!({"value": 4500}));
    let result = store.update_fields("products", id, fields).await.unwrap();
    let expect = AppUpdateInfo {
        matched: 1,
        modified: 1,
    };
    assert_eq!(result, expect);
    let saved = store.fetch_one("products", id).await.unwrap().unwrap();
    assert_eq!(saved.get("name"), Some(&json!("pc")));
    assert_eq!(saved.get("value"), Some(&json!(4500)));

    // identical values do not count as modification
    let fields = ut_document(json!({"name": "pc"}));
    let result = store.update_fields("products", id, fields).await.unwrap();
    assert_eq!(result.matched, 1);
    assert_eq!(result.modified, 0);

    let fields = ut_document(json!({"name": "laptop"}));
    let result = store
        .update_fields("products", DocumentId::generate(), fields)
        .await
        .unwrap();
    assert_eq!(result.matched, 0);
    assert_eq!(result.modified, 0);
} // end of fn update_fields_ok

#[tokio::test]
async fn delete_ok() {
    let store = ut_inmem_store(5);
    store.create_collection("products").await.unwrap();
    let id = DocumentId::generate();
    let content = ut_document(json!({"name": "pc", "value": 5000}));
    store.insert("products", id, content).await.unwrap();
    let result = store.delete("products", id).await.unwrap();
    assert_eq!(result, AppDeleteInfo { deleted: 1 });
    let result = store.delete("products", id).await.unwrap();
    assert_eq!(result, AppDeleteInfo { deleted: 0 });
    let found = store.fetch_one("products", id).await.unwrap();
    assert!(found.is_none());
}

#[test]
fn document_id_parse() {
    let id = DocumentId::generate();
    let hex = id.to_hex();
    assert_eq!(hex.len(), 24);
    let parsed = DocumentId::from_str(hex.as_str()).unwrap();
    assert_eq!(parsed, id);
    assert_eq!(parsed.to_string(), hex);
    for raw in ["123", "zzzzzzzzzzzzzzzzzzzzzzzz", ""] {
        let result = DocumentId::from_str(raw);
        assert!(result.is_err());
        let e = result.err().unwrap();
        assert_eq!(e.code, AppErrorCode::InvalidDocumentId);
    }
}
