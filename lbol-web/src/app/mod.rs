pub mod board;
pub mod bootstrap;
pub mod state;
pub mod view;

pub use board::BoardHandle;
pub use state::{LoadState, PageParams};

use crate::components::Tab;
use lbol_stats::Dashboard;
use yew::prelude::*;

/// Root component: loads the dashboard, then shows the tabbed views.
#[function_component(App)]
pub fn app() -> Html {
    let load = use_state(LoadState::default);
    let tab = use_state(Tab::default);
    let board = use_mut_ref(|| None::<Dashboard>);
    let redraw = use_force_update();
    let handle = BoardHandle::new(board, Callback::from(move |()| redraw.force_update()));

    #[cfg(target_arch = "wasm32")]
    bootstrap::use_bootstrap(&handle, &load);

    view::render_app(&load, &handle, &tab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn app_starts_in_loading_state() {
        crate::i18n::set_lang(lbol_stats::Lang::En);
        let html = block_on(LocalServerRenderer::<App>::new().render());
        assert!(html.contains("Loading data"));
    }
}
