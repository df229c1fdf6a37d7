mod bundle;
mod format;
mod locales;
mod render;

pub use bundle::{current, current_lang, install, set_lang};
pub use format::{fmt_fixed, fmt_pct, fmt_signed};
pub use locales::embedded;
pub use render::{t, title, tr};
