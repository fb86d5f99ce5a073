//! Write-once cache for static asset files served by the web layer.
//!
//! Lifecycle: populate on first read, keyed by relative path, never
//! evicted. Concurrent readers share the cached entry; a race on first
//! read at worst hashes the same file twice and keeps the first insert.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

/// One cached file: its bytes and a content hash usable as an ETag.
pub struct Asset {
    pub content: Vec<u8>,
    pub sha256: String,
    pub content_type: &'static str,
}

pub struct AssetCache {
    root: PathBuf,
    entries: RwLock<HashMap<String, Arc<Asset>>>,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetCache {
            root: root.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch `name` relative to the asset root, reading and caching it on
    /// first use. Traversal outside the root is rejected up front.
    pub async fn get(&self, name: &str) -> std::io::Result<Arc<Asset>> {
        if name.split(['/', '\\']).any(|part| part == "..") {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("asset path escapes the asset root: {}", name),
            ));
        }

        if let Some(asset) = self.entries.read().await.get(name) {
            return Ok(Arc::clone(asset));
        }

        let path = self.root.join(name);
        let content = tokio::fs::read(&path).await?;
        let sha256 = format!("{:x}", Sha256::digest(&content));
        let asset = Arc::new(Asset {
            content,
            sha256,
            content_type: content_type_for(&path),
        });

        let mut entries = self.entries.write().await;
        let entry = entries
            .entry(name.to_string())
            .or_insert_with(|| Arc::clone(&asset));
        Ok(Arc::clone(entry))
    }

    /// Like [`get`], for text assets inlined into page templates.
    pub async fn get_text(&self, name: &str) -> std::io::Result<String> {
        let asset = self.get(name).await?;
        String::from_utf8(asset.content.clone()).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("asset {} is not UTF-8: {}", name, e),
            )
        })
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("html") => "text/html; charset=utf-8",
        Some("ico") => "image/x-icon",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
