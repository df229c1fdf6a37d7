//! URLs of the dataset and locale documents.
//!
//! Builds served from a sub-path (GitHub Pages, `/lbol`) set `PUBLIC_URL` at
//! compile time; everything else is root-anchored.

const STATIC_DIR: &str = "static";

/// Deployment prefix of the bundled `static/` tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AssetRoot<'a> {
    prefix: &'a str,
}

impl<'a> AssetRoot<'a> {
    fn new(public_url: &'a str) -> Self {
        Self {
            prefix: public_url.trim().trim_end_matches('/'),
        }
    }

    fn compiled() -> Self {
        Self::new(option_env!("PUBLIC_URL").unwrap_or_default())
    }

    fn join(self, dir: &str, file: &str) -> String {
        format!("{}/{STATIC_DIR}/{dir}/{file}", self.prefix)
    }
}

/// Location of a character's dataset, e.g. `/static/data/CirnoA_data.json`.
#[must_use]
pub fn dataset_path(character: &str) -> String {
    AssetRoot::compiled().join("data", &format!("{character}_data.json"))
}

/// Location of a locale document, e.g. `/static/locales/ja.json`.
#[must_use]
pub fn locale_path(code: &str) -> String {
    AssetRoot::compiled().join("locales", &format!("{code}.json"))
}
