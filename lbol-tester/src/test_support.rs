use lbol_stats::{Dashboard, Lang, ReportEngine};
use std::path::PathBuf;

use crate::loader::FsDataLoader;

/// The web crate's static asset tree.
pub fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../lbol-web/static")
}

pub fn dashboard() -> Dashboard {
    ReportEngine::new(FsDataLoader::new(assets_dir()))
        .load_dashboard("CirnoA", Lang::En)
        .unwrap()
}
