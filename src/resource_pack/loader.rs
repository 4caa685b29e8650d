//! Asset sources backed by ZIP archives, directories and memory.

use super::{blockstate_path, model_path, texture_path, AssetSource, TextureData};
use crate::error::{ColorGenError, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// Open an asset source from a file path.
///
/// Supports both ZIP files (client JARs, resource packs) and directories
/// containing an `assets` folder.
pub fn open_source<P: AsRef<Path>>(path: P) -> Result<Box<dyn AssetSource>> {
    let path = path.as_ref();

    if path.is_dir() {
        Ok(Box::new(DirSource::new(path)?))
    } else {
        Ok(Box::new(ZipSource::open(path)?))
    }
}

/// Assets read from a ZIP archive held in memory.
pub struct ZipSource {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl ZipSource {
    /// Read a ZIP file (e.g. `versions/1.20.4/1.20.4.jar`) from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Wrap ZIP data already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        log::debug!("Opened archive with {} entries", archive.len());
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }
}

impl AssetSource for ZipSource {
    fn read_asset(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = match archive.by_name(path) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        Ok(Some(data))
    }

    fn list_assets(&self) -> Result<Vec<String>> {
        let archive = self.archive.borrow();
        Ok(archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect())
    }
}

/// Assets read from an unpacked directory (the directory that contains `assets/`).
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.join("assets").is_dir() {
            return Err(ColorGenError::InvalidAssetSource(format!(
                "No assets directory found in {}",
                root.display()
            )));
        }

        Ok(Self { root })
    }
}

impl AssetSource for DirSource {
    fn read_asset(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Ok(None);
        }
        Ok(Some(std::fs::read(full)?))
    }

    fn list_assets(&self) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        list_files_recursive(&self.root, &self.root.join("assets"), &mut paths)?;
        paths.sort();
        Ok(paths)
    }
}

/// Collect files below `dir` as '/'-separated paths relative to `base`.
fn list_files_recursive(base: &Path, dir: &Path, out: &mut Vec<String>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            list_files_recursive(base, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(base) {
            out.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(())
}

/// Assets held in a map, for tests and for callers that already extracted
/// the documents they need.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    assets: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert raw bytes at an archive path.
    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.assets.insert(path.into(), data.into());
    }

    /// Add a blockstate document for a block name.
    pub fn with_blockstate(mut self, block_name: &str, json: &str) -> Self {
        self.insert(blockstate_path(block_name), json);
        self
    }

    /// Add a model document for a model location.
    pub fn with_model(mut self, model: &str, json: &str) -> Self {
        self.insert(model_path(model), json);
        self
    }

    /// Add a texture, encoded as PNG.
    pub fn with_texture(mut self, texture: &str, data: &TextureData) -> Result<Self> {
        let png = data.to_png()?;
        self.insert(texture_path(texture), png);
        Ok(self)
    }
}

impl AssetSource for MemorySource {
    fn read_asset(&self, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.assets.get(path).cloned())
    }

    fn list_assets(&self) -> Result<Vec<String>> {
        Ok(self.assets.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored);
            for (name, data) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data).unwrap();
            }
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_zip_source_reads_assets() {
        let data = build_zip(&[
            ("assets/minecraft/blockstates/stone.json", br#"{"variants":{}}"#),
            ("assets/minecraft/models/block/stone.json", b"{}"),
            ("pack.mcmeta", b"{}"),
        ]);
        let source = ZipSource::from_bytes(data).unwrap();

        assert_eq!(
            source
                .read_asset("assets/minecraft/blockstates/stone.json")
                .unwrap()
                .as_deref(),
            Some(&br#"{"variants":{}}"#[..])
        );
        assert!(source
            .read_asset("assets/minecraft/blockstates/dirt.json")
            .unwrap()
            .is_none());
        assert_eq!(source.list_assets().unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_zip() {
        assert!(matches!(
            ZipSource::from_bytes(b"definitely not a zip".to_vec()),
            Err(ColorGenError::Zip(_))
        ));
    }

    #[test]
    fn test_dir_source() {
        let dir = tempfile::tempdir().unwrap();
        let models = dir.path().join("assets/minecraft/models/block");
        std::fs::create_dir_all(&models).unwrap();
        std::fs::write(models.join("stone.json"), b"{}").unwrap();

        let source = DirSource::new(dir.path()).unwrap();
        assert_eq!(
            source
                .read_asset("assets/minecraft/models/block/stone.json")
                .unwrap(),
            Some(b"{}".to_vec())
        );
        assert!(source
            .read_asset("assets/minecraft/models/block/dirt.json")
            .unwrap()
            .is_none());
        assert_eq!(
            source.list_assets().unwrap(),
            vec!["assets/minecraft/models/block/stone.json".to_string()]
        );
    }

    #[test]
    fn test_dir_without_assets_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            DirSource::new(dir.path()),
            Err(ColorGenError::InvalidAssetSource(_))
        ));
    }

    #[test]
    fn test_open_source_picks_zip_for_files() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("client.jar");
        std::fs::write(
            &jar,
            build_zip(&[("assets/minecraft/models/block/a.json", b"{}")]),
        )
        .unwrap();

        let source = open_source(&jar).unwrap();
        assert!(source
            .read_asset("assets/minecraft/models/block/a.json")
            .unwrap()
            .is_some());
    }
}
