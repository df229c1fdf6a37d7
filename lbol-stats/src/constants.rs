//! Centralized tuning constants for the report engine.
//!
//! Visual tiers, marker sizing, ranking sizes and interaction delays live
//! here so the dashboard can only be retuned through reviewed code changes,
//! not through the upstream JSON assets.

// Visual state tiers -------------------------------------------------------
pub const OPACITY_FILTERED_OUT: f64 = 0.05;
pub const OPACITY_FOCUSED: f64 = 1.0;
pub const OPACITY_SYNERGY: f64 = 0.9;
pub const OPACITY_FADED: f64 = 0.1;
pub const OPACITY_BASELINE: f64 = 0.7;

pub const OUTLINE_FOCUSED: u8 = 3;
pub const OUTLINE_SYNERGY: u8 = 1;
pub const OUTLINE_NONE: u8 = 0;

pub const LABEL_HIDDEN_CSS: &str = "#ddd";
pub const LABEL_DARK_CSS: &str = "#333";
pub const LABEL_FADED_CSS: &str = "#ccc";
pub const LABEL_BASELINE_CSS: &str = "#555";
pub const OUTLINE_COLOR_CSS: &str = "black";

// Filter defaults ----------------------------------------------------------
pub const ATTENTION_SLIDER_MIN: f64 = 30.0;
pub const ATTENTION_SLIDER_MAX: f64 = 90.0;
pub const TENDENCY_SLIDER_MIN: f64 = -3.0;
pub const TENDENCY_SLIDER_MAX: f64 = 3.0;
pub const TENDENCY_SLIDER_STEP: f64 = 0.05;

// Graph geometry -----------------------------------------------------------
pub const AXIS_RANGE: (f64, f64) = (30.0, 70.0);
pub const DEVIATION_CENTER: f64 = 50.0;
pub const GUIDE_CIRCLE_RADII: [f64; 3] = [5.0, 10.0, 15.0];
pub const MARKER_MAX_DIAMETER: f64 = 40.0;
pub const MARKER_MIN_DIAMETER: f64 = 4.0;
pub const GRAPH_HEIGHT_PX: u32 = 800;

// Distribution plots -------------------------------------------------------
pub const DISTRIBUTION_AXIS: (f64, f64) = (25.0, 75.0);
pub const DISTRIBUTION_TICKS: [f64; 5] = [30.0, 40.0, 50.0, 60.0, 70.0];
pub const DEVIATION_PER_IQR: f64 = 10.0;

// Color scale --------------------------------------------------------------
pub const HEAT_ALPHA: f64 = 0.4;

// Rankings -----------------------------------------------------------------
pub const ATTENTION_TOP_N: usize = 40;
pub const ADOPTION_TOP_N: usize = 20;
pub const ACT1_TOP_N: usize = 20;
pub const ACT4_TOP_N: usize = 40;
pub const TENDENCY_TOP_N: usize = 20;
pub const EVENT_LOG_TOP_N: usize = 20;
pub const TENDENCY_MIN_ADOPTION_RATE: f64 = 0.05;

// Detail panel -------------------------------------------------------------
pub const ATTACK_TENDENCY_GOOD: f64 = 0.25;
pub const ATTACK_TENDENCY_BAD: f64 = -0.8;
pub const DEFENSE_TENDENCY_GOOD: f64 = 0.25;
pub const DEFENSE_TENDENCY_BAD: f64 = -1.0;
pub const TENDENCY_STAR_STRONG: f64 = 0.75;
pub const TENDENCY_STAR_WEAK: f64 = 0.5;
pub const WIKI_BASE_JA: &str = "https://wikiwiki.jp/tohokoyoya/";
pub const WIKI_BASE_EN: &str = "https://lbol.miraheze.org/wiki/";
pub const RUN_LOG_BASE: &str = "https://lbol-logs.github.io";

// Interaction timing -------------------------------------------------------
pub const DETAIL_HIDE_DELAY_MS: u32 = 300;
pub const ROUTE_NODE_HOVER_DELAY_MS: u32 = 400;
pub const MODE_SWITCH_SETTLE_MS: u32 = 50;

// Route flowchart ----------------------------------------------------------
pub const ROUTE_ACTS: [u8; 4] = [1, 2, 3, 4];
pub const SHOP_OTHER_EPSILON: f64 = 0.001;

// Dataset defaults ---------------------------------------------------------
pub const DEFAULT_CHARACTER: &str = "CirnoA";
pub const DEFAULT_LANG: &str = "ja";
