use std::sync::Arc;

use serde_json::json;

use storefront::api::web::dto::{OrderReqDto, ProductReqDto};
use storefront::error::AppErrorCode;
use storefront::model::{DocumentId, OrderModel, OrderUpdateModel, ProductModel, ProductUpdateModel};
use storefront::repository::{app_repo_order, app_repo_product};
use storefront::AppDataStoreContext;

use crate::ut_inmem_store;

fn ut_dstore_ctx(max_items: u32) -> Arc<AppDataStoreContext> {
    let documents = Some(ut_inmem_store(max_items));
    Arc::new(AppDataStoreContext { documents })
}

fn ut_product(name: &str, value: f64) -> ProductModel {
    let req = ProductReqDto {
        name: Some(json!(name)),
        value: Some(json!(value)),
    };
    ProductModel::try_from(req).unwrap()
}

fn ut_order(pid: &str, qty: &str, total: &str) -> OrderModel {
    let req = OrderReqDto {
        productId: Some(json!(pid)),
        quantity: Some(json!(qty)),
        totalValue: Some(json!(total)),
    };
    OrderModel::try_from(req).unwrap()
}

#[tokio::test]
async fn product_repo_crud_ok() {
    let ds = ut_dstore_ctx(10);
    let repo = app_repo_product(ds.clone()).await.unwrap();
    let created = repo.create(ut_product("pc", 5000.0)).await.unwrap();
    let _other = repo.create(ut_product("phone", 1200.5)).await.unwrap();

    let all = repo.fetch_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], created);
    assert_eq!(all[1].value, 1200.5);

    let upd = ProductUpdateModel {
        name: None,
        value: Some(4500.0),
    };
    let info = repo.update(created.id, upd).await.unwrap();
    assert_eq!((info.matched, info.modified), (1, 1));
    // another repository instance shares the same underlying store
    let repo2 = app_repo_product(ds).await.unwrap();
    let found = repo2.fetch(created.id).await.unwrap().unwrap();
    assert_eq!(found.name.as_str(), "pc");
    assert_eq!(found.value, 4500.0);

    let info = repo2.delete(created.id).await.unwrap();
    assert_eq!(info.deleted, 1);
    let found = repo.fetch(created.id).await.unwrap();
    assert!(found.is_none());
    let all = repo.fetch_all().await.unwrap();
    assert_eq!(all.len(), 1);
} // end of fn product_repo_crud_ok

#[tokio::test]
async fn product_repo_capacity() {
    let ds = ut_dstore_ctx(1);
    let repo = app_repo_product(ds).await.unwrap();
    repo.create(ut_product("pc", 5000.0)).await.unwrap();
    let result = repo.create(ut_product("phone", 1200.0)).await;
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().code, AppErrorCode::ExceedingMaxLimit);
}

#[tokio::test]
async fn order_repo_crud_ok() {
    let ds = ut_dstore_ctx(10);
    let repo = app_repo_order(ds).await.unwrap();
    let created = repo
        .create(ut_order("65a1b2c3d4e5f60718293a4b", "5", "10000"))
        .await
        .unwrap();
    let upd = OrderUpdateModel {
        product_id: None,
        quantity: Some("6".to_string()),
        total_value: Some("12000".to_string()),
    };
    let info = repo.update(created.id, upd).await.unwrap();
    assert_eq!((info.matched, info.modified), (1, 1));
    let found = repo.fetch(created.id).await.unwrap().unwrap();
    assert_eq!(found.product_id.as_str(), "65a1b2c3d4e5f60718293a4b");
    assert_eq!(found.quantity.as_str(), "6");
    assert_eq!(found.total_value.as_str(), "12000");

    let unknown = DocumentId::generate();
    let upd = OrderUpdateModel {
        quantity: Some("1".to_string()),
        ..Default::default()
    };
    let info = repo.update(unknown, upd).await.unwrap();
    assert_eq!((info.matched, info.modified), (0, 0));
    let info = repo.delete(unknown).await.unwrap();
    assert_eq!(info.deleted, 0);
}

#[tokio::test]
async fn repo_missing_datastore() {
    let ds = Arc::new(AppDataStoreContext { documents: None });
    let result = app_repo_product(ds.clone()).await;
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().code, AppErrorCode::MissingDataStore);
    let result = app_repo_order(ds).await;
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().code, AppErrorCode::MissingDataStore);
}
