//! JSON 文件存储
//!
//! 每个集合一个文件，每次变更都整体重写。写操作持有同一把锁，
//! 读-改-写之间没有 await。新内容先写临时文件再 rename，读到的
//! 总是完整的旧文件或新文件。

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use super::{BlogPost, ClickRecord, Collection, Record, Storage};
use crate::errors::{CouponError, Result};

const BLOG_FILE: &str = "blog.json";
const CLICKS_FILE: &str = "clicks.json";

pub struct FileStorage {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| {
                CouponError::file_operation(format!(
                    "Failed to create data directory {}: {}",
                    data_dir.display(),
                    e
                ))
            })?;
            info!("Created data directory: {}", data_dir.display());
        }

        Ok(FileStorage {
            data_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn write_guard(&self) -> MutexGuard<'_, ()> {
        // 锁里没有数据，中毒后照常使用
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    /// 只读路径使用：文件不存在时在锁内初始化为 `[]`
    fn read<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.path(file_name);
        if !path.exists() {
            let _guard = self.write_guard();
            if !path.exists() {
                self.replace_file(file_name, "[]")?;
                debug!("Created empty data file: {}", path.display());
            }
        }
        self.load(file_name)
    }

    /// 调用方持有写锁时使用，不存在的文件视为空
    fn load<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.path(file_name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                return Err(CouponError::file_operation(format!(
                    "Failed to read {}: {}",
                    file_name, e
                )));
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str::<Vec<T>>(&content).map_err(|e| {
            error!("Failed to parse {}: {}", path.display(), e);
            CouponError::serialization(format!("Failed to parse {}: {}", file_name, e))
        })
    }

    fn save<T: Serialize>(&self, file_name: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        self.replace_file(file_name, &json)
    }

    fn replace_file(&self, file_name: &str, contents: &str) -> Result<()> {
        let path = self.path(file_name);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)
            .and_then(|_| fs::rename(&tmp_path, &path))
            .map_err(|e| {
                error!("Failed to write {}: {}", file_name, e);
                let _ = fs::remove_file(&tmp_path);
                CouponError::file_operation(format!("Failed to write {}: {}", file_name, e))
            })
    }

    fn read_records(&self, collection: Collection) -> Result<Vec<Record>> {
        self.read(collection.file_name())
    }

    fn load_records(&self, collection: Collection) -> Result<Vec<Record>> {
        self.load(collection.file_name())
    }

    fn save_records(&self, collection: Collection, records: &[Record]) -> Result<()> {
        self.save(collection.file_name(), records)
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn list(&self, collection: Collection) -> Result<Vec<Record>> {
        let mut records = self.read_records(collection)?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Record>> {
        Ok(self
            .read_records(collection)?
            .into_iter()
            .find(|r| r.id == id))
    }

    async fn insert(&self, collection: Collection, record: Record) -> Result<()> {
        let _guard = self.write_guard();
        let mut records = self.load_records(collection)?;
        if records.iter().any(|r| r.id == record.id) {
            return Err(CouponError::conflict(format!(
                "Record {} already exists in {}",
                record.id, collection
            )));
        }
        records.push(record);
        self.save_records(collection, &records)
    }

    async fn insert_many(&self, collection: Collection, batch: Vec<Record>) -> Result<usize> {
        if batch.is_empty() {
            return Ok(0);
        }

        let _guard = self.write_guard();
        let mut records = self.load_records(collection)?;
        let count = batch.len();
        records.extend(batch);
        self.save_records(collection, &records)?;

        info!("Inserted {} records into {}", count, collection);
        Ok(count)
    }

    async fn update(&self, collection: Collection, record: Record) -> Result<()> {
        let _guard = self.write_guard();
        let mut records = self.load_records(collection)?;
        let slot = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| CouponError::not_found(format!("Record {} not found", record.id)))?;
        *slot = record;
        self.save_records(collection, &records)
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<()> {
        let _guard = self.write_guard();
        let mut records = self.load_records(collection)?;
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            return Err(CouponError::not_found(format!("Record {} not found", id)));
        }

        self.save_records(collection, &records)?;
        info!("Removed record {} from {}", id, collection);
        Ok(())
    }

    async fn clear(&self, collection: Collection) -> Result<u64> {
        let _guard = self.write_guard();
        let removed = self.load_records(collection)?.len() as u64;
        self.save_records(collection, &[])?;
        info!("Cleared {} records from {}", removed, collection);
        Ok(removed)
    }

    async fn list_posts(&self) -> Result<Vec<BlogPost>> {
        let mut posts: Vec<BlogPost> = self.read(BLOG_FILE)?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn get_post(&self, id: &str) -> Result<Option<BlogPost>> {
        Ok(self
            .read::<BlogPost>(BLOG_FILE)?
            .into_iter()
            .find(|p| p.id == id))
    }

    async fn insert_post(&self, post: BlogPost) -> Result<()> {
        let _guard = self.write_guard();
        let mut posts: Vec<BlogPost> = self.load(BLOG_FILE)?;
        posts.push(post);
        self.save(BLOG_FILE, &posts)
    }

    async fn update_post(&self, post: BlogPost) -> Result<()> {
        let _guard = self.write_guard();
        let mut posts: Vec<BlogPost> = self.load(BLOG_FILE)?;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| CouponError::not_found(format!("Post {} not found", post.id)))?;
        *slot = post;
        self.save(BLOG_FILE, &posts)
    }

    async fn remove_post(&self, id: &str) -> Result<()> {
        let _guard = self.write_guard();
        let mut posts: Vec<BlogPost> = self.load(BLOG_FILE)?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(CouponError::not_found(format!("Post {} not found", id)));
        }
        self.save(BLOG_FILE, &posts)
    }

    async fn append_click(&self, click: ClickRecord) -> Result<()> {
        let _guard = self.write_guard();
        let mut clicks: Vec<ClickRecord> = self.load(CLICKS_FILE)?;
        clicks.push(click);
        self.save(CLICKS_FILE, &clicks)
    }

    async fn list_clicks(&self) -> Result<Vec<ClickRecord>> {
        let mut clicks: Vec<ClickRecord> = self.read(CLICKS_FILE)?;
        clicks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clicks)
    }

    fn backend_name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn storage() -> (TempDir, FileStorage) {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        (dir, storage)
    }

    #[tokio::test]
    async fn test_missing_file_is_created_empty() {
        let (dir, storage) = storage();
        let records = storage.list(Collection::Stores).await.unwrap();
        assert!(records.is_empty());

        let content = fs::read_to_string(dir.path().join("stores.json")).unwrap();
        assert_eq!(content, "[]");
    }

    #[tokio::test]
    async fn test_writes_leave_no_temp_file() {
        let (dir, storage) = storage();
        storage
            .insert(Collection::Stores, Record::new("a", "Acme", Utc::now()))
            .await
            .unwrap();
        storage.remove(Collection::Stores, "a").await.unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".tmp")), "{:?}", names);

        let content = fs::read_to_string(dir.path().join("stores.json")).unwrap();
        let parsed: Vec<Record> = serde_json::from_str(&content).unwrap();
        assert!(parsed.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_reads_see_complete_files() {
        let (_dir, storage) = storage();
        let storage = std::sync::Arc::new(storage);

        let writer = {
            let storage = storage.clone();
            tokio::spawn(async move {
                for i in 0..50 {
                    storage
                        .insert(
                            Collection::Stores,
                            Record::new(format!("id-{}", i), "Acme", Utc::now()),
                        )
                        .await
                        .unwrap();
                }
            })
        };

        let mut last_len = 0;
        while !writer.is_finished() {
            let len = storage.list(Collection::Stores).await.unwrap().len();
            assert!(len >= last_len);
            last_len = len;
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();
        assert_eq!(storage.list(Collection::Stores).await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (_dir, storage) = storage();
        let now = Utc::now();
        storage
            .insert(Collection::Stores, Record::new("old", "Old", now - Duration::days(1)))
            .await
            .unwrap();
        storage
            .insert(Collection::Stores, Record::new("new", "New", now))
            .await
            .unwrap();

        let ids: Vec<String> = storage
            .list(Collection::Stores)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let (dir, storage) = storage();
        fs::write(dir.path().join("coupons.json"), "{not json").unwrap();
        let err = storage.list(Collection::Coupons).await.unwrap_err();
        assert!(matches!(err, CouponError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let (_dir, storage) = storage();
        let record = Record::new("dup", "Acme", Utc::now());
        storage.insert(Collection::Stores, record.clone()).await.unwrap();
        let err = storage.insert(Collection::Stores, record).await.unwrap_err();
        assert!(matches!(err, CouponError::Conflict(_)));
    }
}
