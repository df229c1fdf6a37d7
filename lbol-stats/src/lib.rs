//! LBoL report engine
//!
//! Platform-agnostic core of the LBoL card statistics dashboard: the JSON
//! data model, card classification, filtering, graph projection, rankings
//! and the detail/table/flowchart view models. Rendering happens behind the
//! [`ChartSink`] trait and data access behind [`DataLoader`].

pub mod constants;
pub mod dashboard;
pub mod data;
pub mod delay;
pub mod detail;
pub mod enemy;
pub mod error;
pub mod exhibit;
pub mod filter;
pub mod interaction;
pub mod numbers;
pub mod projection;
pub mod ranking;
pub mod route;
pub mod scale;
pub mod spotlight;
pub mod text;

#[cfg(test)]
mod test_support;

use std::rc::Rc;

pub use dashboard::{Dashboard, EventOutcome, GraphEvent};
pub use data::{
    CardAggregateRecord, CardType, CharacterDataset, CombatType, Medal, Rarity, Situation,
    SituationalRecord,
};
pub use delay::{CancelableDelay, DelayTicket};
pub use detail::{DetailBody, DetailView};
pub use enemy::{EnemyTable, SortColumn, SortDirection, SortState};
pub use error::{DataError, TextError};
pub use exhibit::{ExhibitCategory, ExhibitFilter, ExhibitTable};
pub use filter::{
    CombineMode, FilterState, HighlightState, MedalFloor, PointRecord, RarityFilter,
    TendencyRange, VisualState, evaluate, filters_match,
};
pub use interaction::{InteractionState, PointRef, RouteHover};
pub use projection::{PlotSpec, ProjectedGraph, SeriesOverride, ViewMode};
pub use ranking::{RankedReport, ReportId, ReportSet, top_n_by};
pub use route::{NodeDetail, NodeType, RouteFlow};
pub use spotlight::{SpotlightCategory, SpotlightReport, SpotlightThresholds, classify};
pub use text::{Lang, UiText};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the dataset of one character, e.g. `CirnoA`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be read or decoded.
    fn load_dataset(&self, character: &str) -> Result<CharacterDataset, Self::Error>;

    /// Load a locale document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or is not JSON.
    fn load_locale(&self, lang: Lang) -> Result<serde_json::Value, Self::Error>;
}

/// The charting collaborator: creates the scatter plot once and restyles it
/// per event.
pub trait ChartSink {
    type Error;

    /// Create the plot from scratch.
    ///
    /// # Errors
    ///
    /// Returns an error when the chart library rejects the plot spec.
    fn create_plot(&mut self, spec: &PlotSpec) -> Result<(), Self::Error>;

    /// Apply per-series visual overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when the chart library rejects the update.
    fn restyle(&mut self, overrides: &[SeriesOverride]) -> Result<(), Self::Error>;

    /// Re-fit the plot to its container.
    ///
    /// # Errors
    ///
    /// Returns an error when the chart library fails to resize.
    fn resize(&mut self) -> Result<(), Self::Error>;
}

/// Immutable per-page context shared by every view.
#[derive(Debug, Clone, PartialEq)]
pub struct AppContext {
    pub lang: Lang,
    pub dataset: Rc<CharacterDataset>,
    pub text: Rc<UiText>,
    pub thresholds: SpotlightThresholds,
}

impl AppContext {
    #[must_use]
    pub fn new(lang: Lang, dataset: CharacterDataset, text: UiText) -> Self {
        Self {
            lang,
            dataset: Rc::new(dataset),
            text: Rc::new(text),
            thresholds: SpotlightThresholds::default(),
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: SpotlightThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Localized title with the dataset's character and version filled in.
    #[must_use]
    pub fn title(&self, key: &str) -> String {
        self.text.title(key, &self.dataset.metadata)
    }
}

/// Loads datasets and locale documents into an [`AppContext`].
pub struct ReportEngine<L>
where
    L: DataLoader,
{
    data_loader: L,
}

impl<L> ReportEngine<L>
where
    L: DataLoader,
{
    pub const fn new(data_loader: L) -> Self {
        Self { data_loader }
    }

    /// Load everything one page needs.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset or either locale document cannot be
    /// loaded.
    pub fn load_context(&self, character: &str, lang: Lang) -> Result<AppContext, L::Error> {
        let dataset = self.data_loader.load_dataset(character)?;
        let translations = self.data_loader.load_locale(lang)?;
        let fallback = match lang {
            Lang::En => translations.clone(),
            Lang::Ja => self.data_loader.load_locale(Lang::En)?,
        };
        log::debug!("loaded context for {character} ({})", lang.code());
        Ok(AppContext::new(
            lang,
            dataset,
            UiText::new(lang, translations, fallback),
        ))
    }

    /// Load a context and build the dashboard on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub fn load_dashboard(&self, character: &str, lang: Lang) -> Result<Dashboard, L::Error> {
        self.load_context(character, lang).map(Dashboard::new)
    }
}
