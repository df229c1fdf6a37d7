use lbol_stats::{CharacterDataset, DataError, DataLoader, Lang};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DATASET_SUFFIX: &str = "_data.json";

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Reads datasets and locale documents from a static asset tree laid out
/// like the web bundle: `data/<Character>_data.json` and
/// `locales/<lang>.json`.
#[derive(Debug, Clone)]
pub struct FsDataLoader {
    root: PathBuf,
}

impl FsDataLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn dataset_path(&self, character: &str) -> PathBuf {
        self.root
            .join("data")
            .join(format!("{character}{DATASET_SUFFIX}"))
    }

    pub fn locale_path(&self, lang: Lang) -> PathBuf {
        self.root.join("locales").join(format!("{}.json", lang.code()))
    }

    /// Characters with a dataset file, sorted by name.
    ///
    /// # Errors
    /// Returns an error when the data directory cannot be listed.
    pub fn characters(&self) -> Result<Vec<String>, LoaderError> {
        let dir = self.root.join("data");
        let entries = fs::read_dir(&dir).map_err(|source| LoaderError::Io {
            path: dir.clone(),
            source,
        })?;
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(|name| name.strip_suffix(DATASET_SUFFIX))
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

fn read(path: &Path) -> Result<String, LoaderError> {
    log::debug!("reading {}", path.display());
    fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl DataLoader for FsDataLoader {
    type Error = LoaderError;

    fn load_dataset(&self, character: &str) -> Result<CharacterDataset, Self::Error> {
        let text = read(&self.dataset_path(character))?;
        Ok(CharacterDataset::from_json(&text)?)
    }

    fn load_locale(&self, lang: Lang) -> Result<Value, Self::Error> {
        let text = read(&self.locale_path(lang))?;
        serde_json::from_str(&text).map_err(|err| LoaderError::Data(err.into()))
    }
}
