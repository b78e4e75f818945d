use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").to_str().unwrap().to_string();
        let storage = LocalStorage::new(base.clone());

        storage.write_file("report.json", b"{}").await.unwrap();

        assert_eq!(fs::read(Path::new(&base).join("report.json")).unwrap(), b"{}");
        assert_eq!(storage.location("report.json"), format!("{}/report.json", base));
    }

    #[tokio::test]
    async fn test_write_under_a_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let storage = LocalStorage::new(blocker.to_str().unwrap().to_string());

        assert!(matches!(
            storage.write_file("causelist.pdf", b"%PDF").await,
            Err(crate::utils::error::ScraperError::IoError(_))
        ));
    }
}
