use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::error::{Result, TrendingError};
use crate::item::{CandidateSet, Item};

pub struct CandidateStore {
    path: Option<PathBuf>,
    items: RwLock<Vec<Item>>,
}

impl CandidateStore {
    pub fn in_memory(items: Vec<Item>) -> Self {
        Self {
            path: None,
            items: RwLock::new(items),
        }
    }

    pub async fn load(path: PathBuf) -> Result<Self> {
        let items = if path.exists() {
            let data = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| source_error("failed to read candidates", err))?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)
                    .map_err(|err| source_error("failed to parse candidates", err))?
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path: Some(path),
            items: RwLock::new(items),
        })
    }

    pub async fn snapshot(&self) -> CandidateSet {
        let guard = self.items.read().await;
        CandidateSet::new(guard.clone())
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn upsert(&self, item: Item) -> Result<Item> {
        self.upsert_many(vec![item.clone()]).await?;
        Ok(item)
    }

    pub async fn upsert_many(&self, items: Vec<Item>) -> Result<usize> {
        let mut guard = self.items.write().await;
        let count = items.len();
        for item in items {
            match guard.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item,
                None => guard.push(item),
            }
        }
        self.persist(&guard).await?;
        Ok(count)
    }

    pub async fn import_file(&self, path: &Path) -> Result<usize> {
        let data = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| source_error("failed to read import", err))?;
        let items: Vec<Item> = serde_json::from_str(&data)
            .map_err(|err| source_error("failed to parse import", err))?;
        self.upsert_many(items).await
    }

    async fn persist(&self, items: &[Item]) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(items)
            .map_err(|err| source_error("failed to serialize candidates", err))?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| source_error("failed to write candidates", err))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|err| source_error("failed to finalize candidates", err))?;
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| source_error("failed to create candidate dir", err))
}

fn source_error(context: &str, err: impl std::fmt::Display) -> TrendingError {
    TrendingError::Source(format!("{}: {}", context, err))
}
