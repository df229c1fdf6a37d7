//! One loaded dashboard: reports, projected graph and interaction state,
//! wired to a [`ChartSink`].

use crate::delay::DelayTicket;
use crate::filter::FilterState;
use crate::interaction::{InteractionState, PointRef};
use crate::projection::{ProjectedGraph, SeriesOverride, ViewMode};
use crate::ranking::ReportSet;
use crate::{AppContext, ChartSink};

/// UI events routed to the card graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    Hover(PointRef),
    Unhover,
    Click(PointRef),
    /// Pan or zoom; drops a pinned point.
    Relayout,
    /// Close button on the detail panel.
    Dismiss,
    PanelEnter,
    PanelLeave,
    HideElapsed(DelayTicket),
    SetFilter(FilterState),
    SwitchMode(ViewMode),
    /// A card name activated in a ranking or spotlight list.
    SelectCard(String),
}

/// What the caller has to do after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub restyle: bool,
    /// Schedule a timer and feed the ticket back as [`GraphEvent::HideElapsed`].
    pub hide_after: Option<DelayTicket>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    ctx: AppContext,
    reports: ReportSet,
    graph: ProjectedGraph,
    state: InteractionState,
}

impl Dashboard {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        let reports = ReportSet::build(&ctx.dataset, &ctx.thresholds);
        let graph = ProjectedGraph::build(&ctx.dataset, ctx.lang);
        log::debug!(
            "dashboard ready: {} rankable cards, {} series",
            reports.rankable_count,
            graph.series.len()
        );
        Self {
            ctx,
            reports,
            graph,
            state: InteractionState::new(),
        }
    }

    #[must_use]
    pub const fn context(&self) -> &AppContext {
        &self.ctx
    }

    #[must_use]
    pub const fn reports(&self) -> &ReportSet {
        &self.reports
    }

    #[must_use]
    pub const fn graph(&self) -> &ProjectedGraph {
        &self.graph
    }

    #[must_use]
    pub const fn state(&self) -> &InteractionState {
        &self.state
    }

    #[must_use]
    pub fn overrides(&self) -> Vec<SeriesOverride> {
        self.state.overrides(&self.graph, &self.ctx.dataset)
    }

    /// Create the plot and apply the initial visual state.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn render<S: ChartSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.create_plot(&self.graph.plot_spec(self.state.mode(), &self.ctx.text))?;
        sink.restyle(&self.overrides())
    }

    pub fn handle(&mut self, event: GraphEvent) -> EventOutcome {
        let (graph, dataset, lang) = (&self.graph, &*self.ctx.dataset, self.ctx.lang);
        let state = &mut self.state;
        let restyle = |restyle| EventOutcome {
            restyle,
            hide_after: None,
        };
        match event {
            GraphEvent::Hover(at) => restyle(state.hover(graph, dataset, lang, at)),
            GraphEvent::Click(at) => restyle(state.click(graph, dataset, lang, at)),
            GraphEvent::Unhover => EventOutcome {
                restyle: false,
                hide_after: state.unhover(),
            },
            GraphEvent::PanelEnter => {
                state.panel_enter();
                EventOutcome::default()
            }
            GraphEvent::PanelLeave => EventOutcome {
                restyle: false,
                hide_after: state.panel_leave(),
            },
            GraphEvent::HideElapsed(ticket) => restyle(state.hide_elapsed(ticket)),
            GraphEvent::Relayout => {
                let pinned = state.pinned().is_some();
                if pinned {
                    state.dismiss();
                }
                restyle(pinned)
            }
            GraphEvent::Dismiss => {
                let shown = state.detail().is_some() || state.pinned().is_some();
                state.dismiss();
                restyle(shown)
            }
            GraphEvent::SetFilter(filter) => {
                state.set_filter(filter);
                restyle(true)
            }
            GraphEvent::SwitchMode(mode) => restyle(state.switch_mode(mode)),
            GraphEvent::SelectCard(name) => {
                restyle(state.select_card(graph, dataset, lang, &name))
            }
        }
    }

    /// Handle an event and push the resulting visuals to `sink`.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn dispatch<S: ChartSink>(
        &mut self,
        event: GraphEvent,
        sink: &mut S,
    ) -> Result<EventOutcome, S::Error> {
        let outcome = self.handle(event);
        if outcome.restyle {
            sink.restyle(&self.overrides())?;
        }
        Ok(outcome)
    }
}
