//! Storage backend tests
//!
//! Runs the same checks against the JSON file backend and a temporary
//! SQLite database through the `Storage` trait.

use std::sync::Arc;

use chrono::{Duration, Utc};
use couponhub::config::{BackendKind, StorageConfig};
use couponhub::errors::CouponError;
use couponhub::storage::backend::{infer_backend_from_url, normalize_backend_name};
use couponhub::storage::{
    BlogPost, ClickRecord, Collection, FileStorage, Record, SeaOrmStorage, Storage,
    StorageFactory,
};
use tempfile::TempDir;

fn record(id: &str, name: &str, minutes_ago: i64) -> Record {
    let mut r = Record::new(id, name, Utc::now() - Duration::minutes(minutes_ago));
    r.classify();
    r
}

fn post(id: &str, slug: &str, minutes_ago: i64) -> BlogPost {
    BlogPost {
        id: id.to_string(),
        title: format!("Post {}", id),
        slug: slug.to_string(),
        category: "Guides".to_string(),
        excerpt: String::new(),
        image: String::new(),
        featured: false,
        content: "body".to_string(),
        created_at: Utc::now() - Duration::minutes(minutes_ago),
        published_date: None,
    }
}

fn file_storage() -> (Arc<dyn Storage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = FileStorage::new(temp_dir.path()).expect("Failed to create file storage");
    (Arc::new(storage), temp_dir)
}

/// 创建临时 SQLite 数据库的存储实例
async fn sqlite_storage() -> (Arc<dyn Storage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite", 1)
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

async fn check_record_crud(storage: Arc<dyn Storage>) {
    let c = Collection::Stores;
    assert!(storage.list(c).await.unwrap().is_empty());

    storage.insert(c, record("a", "Alpha", 30)).await.unwrap();
    storage.insert(c, record("b", "Beta", 10)).await.unwrap();
    storage.insert(c, record("c", "Gamma", 20)).await.unwrap();

    // 最新的在前
    let ids: Vec<String> = storage
        .list(c)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["b", "c", "a"]);

    let fetched = storage.get(c, "a").await.unwrap().unwrap();
    assert_eq!(fetched.name, "Alpha");
    assert!(storage.get(c, "missing").await.unwrap().is_none());

    // 两张表互不影响
    assert!(storage.list(Collection::Coupons).await.unwrap().is_empty());

    let mut updated = fetched.clone();
    updated.name = "Alpha Prime".to_string();
    storage.update(c, updated).await.unwrap();
    assert_eq!(storage.get(c, "a").await.unwrap().unwrap().name, "Alpha Prime");

    let err = storage.update(c, record("zzz", "Nobody", 0)).await.unwrap_err();
    assert!(matches!(err, CouponError::NotFound(_)));

    storage.remove(c, "b").await.unwrap();
    assert!(matches!(
        storage.remove(c, "b").await.unwrap_err(),
        CouponError::NotFound(_)
    ));
    assert_eq!(storage.list(c).await.unwrap().len(), 2);

    assert_eq!(storage.clear(c).await.unwrap(), 2);
    assert!(storage.list(c).await.unwrap().is_empty());
}

async fn check_insert_many(storage: Arc<dyn Storage>) {
    let c = Collection::Coupons;
    let batch = vec![record("x", "X", 3), record("y", "Y", 2), record("z", "Z", 1)];
    assert_eq!(storage.insert_many(c, batch).await.unwrap(), 3);
    assert_eq!(storage.insert_many(c, Vec::new()).await.unwrap(), 0);
    assert_eq!(storage.list(c).await.unwrap().len(), 3);
}

async fn check_blog_and_clicks(storage: Arc<dyn Storage>) {
    storage.insert_post(post("p1", "first", 20)).await.unwrap();
    storage.insert_post(post("p2", "second", 5)).await.unwrap();

    let slugs: Vec<String> = storage
        .list_posts()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.slug)
        .collect();
    assert_eq!(slugs, vec!["second", "first"]);

    let mut changed = storage.get_post("p1").await.unwrap().unwrap();
    changed.slug = "first-renamed".to_string();
    storage.update_post(changed).await.unwrap();
    assert_eq!(
        storage.get_post("p1").await.unwrap().unwrap().slug,
        "first-renamed"
    );

    storage.remove_post("p2").await.unwrap();
    assert!(storage.get_post("p2").await.unwrap().is_none());
    assert!(matches!(
        storage.remove_post("p2").await.unwrap_err(),
        CouponError::NotFound(_)
    ));

    for (i, store_id) in ["s1", "s1", "s2"].iter().enumerate() {
        storage
            .append_click(ClickRecord {
                id: format!("click-{}", i),
                store_id: store_id.to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }
    let clicks = storage.list_clicks().await.unwrap();
    assert_eq!(clicks.len(), 3);
    assert_eq!(clicks.iter().filter(|c| c.store_id == "s1").count(), 2);
}

#[tokio::test]
async fn test_file_record_crud() {
    let (storage, _dir) = file_storage();
    check_record_crud(storage).await;
}

#[tokio::test]
async fn test_sqlite_record_crud() {
    let (storage, _dir) = sqlite_storage().await;
    check_record_crud(storage).await;
}

#[tokio::test]
async fn test_file_insert_many() {
    let (storage, _dir) = file_storage();
    check_insert_many(storage).await;
}

#[tokio::test]
async fn test_sqlite_insert_many() {
    let (storage, _dir) = sqlite_storage().await;
    check_insert_many(storage).await;
}

#[tokio::test]
async fn test_file_blog_and_clicks() {
    let (storage, _dir) = file_storage();
    check_blog_and_clicks(storage).await;
}

#[tokio::test]
async fn test_sqlite_blog_and_clicks() {
    let (storage, _dir) = sqlite_storage().await;
    check_blog_and_clicks(storage).await;
}

#[tokio::test]
async fn test_sqlite_persists_across_connections() {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}?mode=rwc", temp_dir.path().join("p.db").display());

    {
        let storage = SeaOrmStorage::new(&db_url, "sqlite", 1).await.unwrap();
        storage
            .insert(Collection::Stores, record("keep", "Keeper", 0))
            .await
            .unwrap();
    }

    let reopened = SeaOrmStorage::new(&db_url, "sqlite", 1).await.unwrap();
    let kept = reopened.get(Collection::Stores, "keep").await.unwrap();
    assert_eq!(kept.map(|r| r.name), Some("Keeper".to_string()));
}

#[tokio::test]
async fn test_factory_selects_backend() {
    let temp_dir = TempDir::new().unwrap();

    let file_config = StorageConfig {
        data_dir: temp_dir.path().join("data").display().to_string(),
        ..Default::default()
    };
    let storage = StorageFactory::create(&file_config).await.unwrap();
    assert_eq!(storage.backend_name(), "file");

    let db_config = StorageConfig {
        backend: BackendKind::Auto,
        database_url: format!(
            "sqlite://{}?mode=rwc",
            temp_dir.path().join("factory.db").display()
        ),
        ..Default::default()
    };
    let storage = StorageFactory::create(&db_config).await.unwrap();
    assert_eq!(storage.backend_name(), "sqlite");
}

#[test]
fn test_infer_backend_from_url() {
    assert_eq!(infer_backend_from_url("sqlite://data.db").unwrap(), "sqlite");
    assert_eq!(infer_backend_from_url("catalog.sqlite").unwrap(), "sqlite");
    assert_eq!(infer_backend_from_url("mariadb://u@h/db").unwrap(), "mysql");
    assert_eq!(infer_backend_from_url("postgresql://h/db").unwrap(), "postgres");
    assert!(infer_backend_from_url("redis://localhost").is_err());
    assert_eq!(normalize_backend_name("mariadb"), "mysql");
}
