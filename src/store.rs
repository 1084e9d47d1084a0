use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

use crate::encode::encode;

/// Filesystem persistence for one archive session: pages at the folder
/// root, assets under `assets/`.
#[derive(Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: &Path) -> Result<Self> {
        let base_dir = base_dir.to_path_buf();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", base_dir))?;

        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Persists one page's rewritten HTML as
    /// `<base>/<encode(url.path())>.html`, overwriting any previous copy.
    pub fn save_page(&self, url: &Url, html: &str) -> Result<PathBuf> {
        let file_name = format!("{}.html", encode(url.path()));
        let file_path = self.base_dir.join(file_name);
        self.write_file(&file_path, html.as_bytes())?;
        Ok(file_path)
    }

    /// Persists one asset's bytes as `<base>/assets/<encode(url)>`.
    /// Encoded names may collide for distinct URLs; last write wins.
    pub fn save_asset(&self, url: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.base_dir.join("assets").join(encode(url));
        self.write_file(&file_path, content)?;
        Ok(file_path)
    }

    fn write_file(&self, file_path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let mut file = fs::File::create(file_path)
            .with_context(|| format!("Failed to create file: {:?}", file_path))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }
}
