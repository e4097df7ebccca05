use std::path::{Path, PathBuf};

use thiserror::Error;

use super::envelope::{self, DecodeError, Record};

/// Bundled fallback copy of the global stream.
pub const LOCAL_RESOURCE: &str = "global.json";

/// A missing or broken bundled asset. This is a packaging fault, not a runtime one.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("bundled asset {path} not found")]
    Missing { path: PathBuf },

    #[error("failed to read bundled asset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bundled asset {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

#[derive(Debug, Clone)]
pub struct LocalFeed {
    path: PathBuf,
}

impl LocalFeed {
    /// Resolve `global.json` under `assets_dir` and check that it exists.
    pub fn open(assets_dir: &Path) -> Result<Self, AssetError> {
        let path = assets_dir.join(LOCAL_RESOURCE);
        if !path.is_file() {
            return Err(AssetError::Missing { path });
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Blocking read; the asset is small and local.
    pub fn fetch_local(&self) -> Result<Vec<Record>, AssetError> {
        let body = std::fs::read(&self.path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => AssetError::Missing { path: self.path.clone() },
            _ => AssetError::Read { path: self.path.clone(), source },
        })?;
        envelope::extract_records(&body).map_err(|source| AssetError::Corrupt { path: self.path.clone(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_asset(dir: &Path, body: &str) {
        std::fs::write(dir.join(LOCAL_RESOURCE), body).unwrap();
    }

    #[test]
    fn fetch_local_reads_bundled_records() {
        let dir = tempfile::tempdir().unwrap();
        write_asset(dir.path(), r#"{"data": [{"id": "10"}, {"id": "11"}, {"id": "12"}]}"#);

        let feed = LocalFeed::open(dir.path()).unwrap();
        let records = feed.fetch_local().unwrap();
        let ids: Vec<_> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["10", "11", "12"]);
    }

    #[test]
    fn open_fails_fast_when_asset_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFeed::open(dir.path()).unwrap_err();
        match err {
            AssetError::Missing { path } => assert_eq!(path, dir.path().join("global.json")),
            other => panic!("expected missing asset, got {other:?}"),
        }
    }

    #[test]
    fn asset_removed_after_open_is_reported_missing() {
        let dir = tempfile::tempdir().unwrap();
        write_asset(dir.path(), r#"{"data": []}"#);
        let feed = LocalFeed::open(dir.path()).unwrap();
        std::fs::remove_file(feed.path()).unwrap();
        assert!(matches!(feed.fetch_local(), Err(AssetError::Missing { .. })));
    }

    #[test]
    fn corrupt_asset_is_a_configuration_fault() {
        let dir = tempfile::tempdir().unwrap();
        write_asset(dir.path(), r#"{"items": []}"#);
        let feed = LocalFeed::open(dir.path()).unwrap();
        let err = feed.fetch_local().unwrap_err();
        assert!(matches!(err, AssetError::Corrupt { source: DecodeError::MissingData, .. }));
        assert!(format!("{err}").contains("is corrupt"));
    }

    #[test]
    fn shipped_asset_decodes() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        let records = LocalFeed::open(&dir).unwrap().fetch_local().unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| r.contains_key("id")));
    }
}
