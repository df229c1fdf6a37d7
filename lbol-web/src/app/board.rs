use lbol_stats::{Dashboard, EventOutcome, GraphEvent};
use std::cell::RefCell;
use std::rc::Rc;
use yew::Callback;

/// Element the card scatter plot is drawn into.
pub const GRAPH_ELEMENT_ID: &str = "card-graph";

/// Shared handle to the page's [`Dashboard`].
///
/// Components dispatch events through it; the owning component re-renders
/// through `redraw` after every event.
#[derive(Clone)]
pub struct BoardHandle {
    board: Rc<RefCell<Option<Dashboard>>>,
    redraw: Callback<()>,
    timers: Rc<RefCell<PendingTimers<Timer>>>,
}

#[cfg(target_arch = "wasm32")]
type Timer = gloo_timers::callback::Timeout;

/// Off-browser nothing fires; the slot only records the requested delay.
#[cfg(not(target_arch = "wasm32"))]
type Timer = u32;

/// Follow-up timers a board event can arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Hide,
    Settle,
}

/// At most one live timer per kind. Re-arming drops the previous one, and a
/// dropped `Timeout` is cleared.
struct PendingTimers<T> {
    hide: Option<T>,
    settle: Option<T>,
}

impl<T> Default for PendingTimers<T> {
    fn default() -> Self {
        Self {
            hide: None,
            settle: None,
        }
    }
}

impl<T> PendingTimers<T> {
    /// Keep `timer` as the live timer of `kind`, returning the one it replaces.
    fn arm(&mut self, kind: TimerKind, timer: T) -> Option<T> {
        let slot = match kind {
            TimerKind::Hide => &mut self.hide,
            TimerKind::Settle => &mut self.settle,
        };
        slot.replace(timer)
    }

    #[cfg(test)]
    fn live(&self) -> usize {
        usize::from(self.hide.is_some()) + usize::from(self.settle.is_some())
    }
}

impl PartialEq for BoardHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.board, &other.board)
    }
}

impl BoardHandle {
    #[must_use]
    pub fn new(board: Rc<RefCell<Option<Dashboard>>>, redraw: Callback<()>) -> Self {
        Self {
            board,
            redraw,
            timers: Rc::default(),
        }
    }

    pub fn install(&self, board: Dashboard) {
        self.board.replace(Some(board));
        self.redraw.emit(());
    }

    /// Run `f` against the dashboard, if one is loaded.
    pub fn with<R>(&self, f: impl FnOnce(&Dashboard) -> R) -> Option<R> {
        self.board.try_borrow().ok()?.as_ref().map(f)
    }

    /// Handle an event, push the new visuals to the plot and arm any
    /// follow-up timer.
    pub fn dispatch(&self, event: GraphEvent) {
        self.run(event, true);
    }

    /// Handle an event while the plot is not mounted; the next
    /// [`Self::draw`] picks up the new state.
    pub fn dispatch_offscreen(&self, event: GraphEvent) {
        self.run(event, false);
    }

    fn run(&self, event: GraphEvent, plotted: bool) {
        let switching = matches!(event, GraphEvent::SwitchMode(_));
        let outcome = {
            let Ok(mut slot) = self.board.try_borrow_mut() else {
                log::warn!("dashboard busy; dropped {event:?}");
                return;
            };
            let Some(board) = slot.as_mut() else {
                return;
            };
            if plotted {
                apply(board, event)
            } else {
                board.handle(event)
            }
        };
        if let Some(ticket) = outcome.hide_after {
            self.schedule(TimerKind::Hide, lbol_stats::constants::DETAIL_HIDE_DELAY_MS, move |handle| {
                handle.dispatch(GraphEvent::HideElapsed(ticket));
            });
        }
        if plotted && switching && outcome.restyle {
            self.schedule(TimerKind::Settle, lbol_stats::constants::MODE_SWITCH_SETTLE_MS, |handle| {
                handle.resize();
            });
        }
        self.redraw.emit(());
    }

    /// Create the plot from the current state.
    pub fn draw(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            let mut sink = crate::plotly::PlotlySink::new(GRAPH_ELEMENT_ID);
            if let Some(Err(err)) = self.with(|board| board.render(&mut sink)) {
                log::error!("{err}");
            }
        }
    }

    fn resize(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            use lbol_stats::ChartSink;
            if let Err(err) = crate::plotly::PlotlySink::new(GRAPH_ELEMENT_ID).resize() {
                log::warn!("{err}");
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule(&self, kind: TimerKind, delay_ms: u32, action: impl FnOnce(&Self) + 'static) {
        let handle = self.clone();
        let timer = Timer::new(delay_ms, move || action(&handle));
        // The replaced timer is cleared as it drops.
        drop(self.timers.borrow_mut().arm(kind, timer));
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule(&self, kind: TimerKind, delay_ms: u32, _action: impl FnOnce(&Self) + 'static) {
        log::trace!("{kind:?} timer of {delay_ms} ms skipped off-browser");
        self.timers.borrow_mut().arm(kind, delay_ms);
    }
}

#[cfg(target_arch = "wasm32")]
fn apply(board: &mut Dashboard, event: GraphEvent) -> EventOutcome {
    let mut sink = crate::plotly::PlotlySink::new(GRAPH_ELEMENT_ID);
    board.dispatch(event, &mut sink).unwrap_or_else(|err| {
        log::error!("{err}");
        EventOutcome::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn apply(board: &mut Dashboard, event: GraphEvent) -> EventOutcome {
    board.handle(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::bootstrap::{PrefetchedDocs, build_dashboard};
    use crate::app::state::PageParams;
    use lbol_stats::{Lang, ViewMode};
    use std::cell::Cell;

    fn handle() -> (BoardHandle, Rc<Cell<usize>>) {
        let docs = PrefetchedDocs::new(
            "CirnoA",
            include_str!("../../static/data/CirnoA_data.json").to_string(),
        )
        .with_locale(Lang::En, include_str!("../../static/locales/en.json").to_string());
        let params = PageParams::from_query(None, Some("en".into()));
        let redraws = Rc::new(Cell::new(0));
        let counter = Rc::clone(&redraws);
        let handle = BoardHandle::new(
            Rc::new(RefCell::new(None)),
            Callback::from(move |()| counter.set(counter.get() + 1)),
        );
        handle.install(build_dashboard(&params, docs).unwrap());
        (handle, redraws)
    }

    #[test]
    fn events_update_state_and_redraw() {
        let (handle, redraws) = handle();
        assert_eq!(redraws.get(), 1);
        handle.dispatch(GraphEvent::SelectCard("氷符".into()));
        assert_eq!(
            handle.with(|b| b.state().detail().map(|d| d.name.clone())),
            Some(Some("氷符".to_string()))
        );
        handle.dispatch(GraphEvent::SwitchMode(ViewMode::Situational(0)));
        assert_eq!(
            handle.with(|b| b.state().mode()),
            Some(ViewMode::Situational(0))
        );
        assert!(handle.with(|b| b.state().detail().is_none()).unwrap_or(false));
        assert_eq!(redraws.get(), 3);

        handle.dispatch_offscreen(GraphEvent::SelectCard("ショット".into()));
        assert_eq!(
            handle.with(|b| b.state().detail().map(|d| d.name.clone())),
            Some(Some("ショット".to_string()))
        );
        assert_eq!(redraws.get(), 4);
    }

    #[test]
    fn rearming_a_timer_replaces_the_live_one() {
        let mut timers = PendingTimers::default();
        assert_eq!(timers.arm(TimerKind::Hide, 1), None);
        assert_eq!(timers.arm(TimerKind::Hide, 2), Some(1));
        assert_eq!(timers.arm(TimerKind::Settle, 3), None);
        assert_eq!(timers.live(), 2);
        for _ in 0..10 {
            timers.arm(TimerKind::Hide, 4);
        }
        assert_eq!(timers.live(), 2);
        assert_eq!(timers.hide, Some(4));
    }

    #[test]
    fn repeated_unhover_keeps_one_hide_timer() {
        let (handle, _) = handle();
        handle.dispatch(GraphEvent::SelectCard("氷符".into()));
        for _ in 0..3 {
            handle.dispatch(GraphEvent::Unhover);
        }
        let timers = handle.timers.borrow();
        assert_eq!(timers.live(), 1);
        assert_eq!(timers.hide, Some(lbol_stats::constants::DETAIL_HIDE_DELAY_MS));
    }

    #[test]
    fn empty_handle_ignores_events() {
        let handle = BoardHandle::new(Rc::new(RefCell::new(None)), Callback::noop());
        handle.dispatch(GraphEvent::Unhover);
        assert!(handle.with(|_| ()).is_none());
        assert!(handle == handle.clone());
    }
}
