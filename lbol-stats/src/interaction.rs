//! Event handling for the card graph and the route flowchart.
//!
//! Handlers mutate [`InteractionState`] and report whether the chart needs
//! a restyle; the caller then pushes [`InteractionState::overrides`] to its
//! chart sink.

use crate::data::CharacterDataset;
use crate::delay::{CancelableDelay, DelayTicket};
use crate::detail::DetailView;
use crate::filter::{FilterState, HighlightState, PointRecord};
use crate::projection::{ProjectedGraph, SeriesOverride, ViewMode, partners_of};
use crate::text::Lang;

/// A plotted point as `(series, point)` indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRef {
    pub series: usize,
    pub point: usize,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    filter: FilterState,
    highlight: HighlightState,
    mode: ViewMode,
    pinned: Option<PointRef>,
    detail: Option<DetailView>,
    hide_delay: CancelableDelay,
}

impl InteractionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub const fn pinned(&self) -> Option<PointRef> {
        self.pinned
    }

    #[must_use]
    pub const fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    #[must_use]
    pub const fn hide_pending(&self) -> bool {
        self.hide_delay.is_pending()
    }

    /// Replace the filter controls. Any highlight or pin is dropped so the
    /// graph shows the plain filtered tiers.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.highlight.clear();
        self.pinned = None;
    }

    /// Pointer entered a point. Ignored while another point is pinned.
    pub fn hover(
        &mut self,
        graph: &ProjectedGraph,
        dataset: &CharacterDataset,
        lang: Lang,
        at: PointRef,
    ) -> bool {
        if self.pinned.is_some() {
            return false;
        }
        let Some(point) = graph.point_record(dataset, at.series, at.point) else {
            return false;
        };
        self.hide_delay.cancel();
        self.show(dataset, &point, lang);
        true
    }

    /// Pointer left a point: arm the hide delay unless something is pinned.
    pub fn unhover(&mut self) -> Option<DelayTicket> {
        if self.pinned.is_some() || self.detail.is_none() {
            return None;
        }
        Some(self.hide_delay.arm())
    }

    pub fn panel_enter(&mut self) {
        self.hide_delay.cancel();
    }

    pub fn panel_leave(&mut self) -> Option<DelayTicket> {
        self.unhover()
    }

    /// Hide delay elapsed. Returns `true` when the detail was dismissed.
    pub fn hide_elapsed(&mut self, ticket: DelayTicket) -> bool {
        if !self.hide_delay.fire(ticket) {
            return false;
        }
        self.detail = None;
        self.highlight.clear();
        true
    }

    /// Click toggles the pin: the same point unpins, another point re-pins.
    pub fn click(
        &mut self,
        graph: &ProjectedGraph,
        dataset: &CharacterDataset,
        lang: Lang,
        at: PointRef,
    ) -> bool {
        if self.pinned == Some(at) {
            self.dismiss();
            return true;
        }
        let Some(point) = graph.point_record(dataset, at.series, at.point) else {
            return false;
        };
        self.hide_delay.cancel();
        self.pinned = Some(at);
        self.show(dataset, &point, lang);
        true
    }

    /// Drop the pin, the detail and the highlight.
    pub fn dismiss(&mut self) {
        self.pinned = None;
        self.detail = None;
        self.highlight.clear();
        self.hide_delay.cancel();
    }

    /// Show a card picked from a ranking. Looks in the current mode first,
    /// then falls back to the card's aggregate record.
    pub fn select_card(
        &mut self,
        graph: &ProjectedGraph,
        dataset: &CharacterDataset,
        lang: Lang,
        name: &str,
    ) -> bool {
        let located = graph.locate(name, self.mode);
        let point = match located {
            Some((series, point)) => graph.point_record(dataset, series, point),
            None => dataset.aggregate(name).map(PointRecord::Aggregate),
        };
        let Some(point) = point else {
            log::debug!("select_card: {name} is not plotted");
            return false;
        };
        self.hide_delay.cancel();
        if self.pinned.is_some() {
            self.pinned = located.map(|(series, point)| PointRef { series, point });
        }
        self.show(dataset, &point, lang);
        true
    }

    /// Switch between aggregate and situational view; clears hover and pin.
    pub fn switch_mode(&mut self, mode: ViewMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.dismiss();
        true
    }

    #[must_use]
    pub fn overrides(
        &self,
        graph: &ProjectedGraph,
        dataset: &CharacterDataset,
    ) -> Vec<SeriesOverride> {
        graph.overrides(dataset, self.mode, &self.filter, &self.highlight)
    }

    fn show(&mut self, dataset: &CharacterDataset, point: &PointRecord<'_>, lang: Lang) {
        let name = point.name();
        self.highlight = HighlightState::focus(name, partners_of(dataset, name));
        self.detail = Some(DetailView::build(point, lang));
    }
}

/// Hover-delayed node detail on the route flowchart.
#[derive(Debug, Clone, Default)]
pub struct RouteHover {
    delay: CancelableDelay,
    pending: Option<String>,
    shown: Option<String>,
}

impl RouteHover {
    pub fn enter(&mut self, node_id: &str) -> DelayTicket {
        self.pending = Some(node_id.to_string());
        self.delay.arm()
    }

    pub fn leave(&mut self) {
        self.delay.cancel();
        self.pending = None;
        self.shown = None;
    }

    /// Delay elapsed: the node to show, if the ticket is still current.
    pub fn elapsed(&mut self, ticket: DelayTicket) -> Option<&str> {
        if !self.delay.fire(ticket) {
            return None;
        }
        self.shown = self.pending.take();
        self.shown.as_deref()
    }

    #[must_use]
    pub fn shown(&self) -> Option<&str> {
        self.shown.as_deref()
    }
}
