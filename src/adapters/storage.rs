use crate::domain::ports::LogoStore;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Logo files in a single local directory.
#[derive(Debug, Clone)]
pub struct LocalLogoStore {
    base_path: PathBuf,
}

impl LocalLogoStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Creates the directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }
}

impl LogoStore for LocalLogoStore {
    async fn exists(&self, file_name: &str) -> Result<bool> {
        let full_path = self.base_path.join(file_name);
        Ok(tokio::fs::try_exists(full_path).await?)
    }

    async fn write_file(&self, file_name: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(file_name);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn purge(&self, extension: &str) -> Result<Vec<String>> {
        let mut removed = Vec::new();

        let mut entries = match tokio::fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(removed),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
                continue;
            }

            tokio::fs::remove_file(&path).await?;
            removed.push(entry.file_name().to_string_lossy().into_owned());
        }

        removed.sort();
        Ok(removed)
    }

    fn location(&self) -> String {
        self.base_path.display().to_string()
    }
}
