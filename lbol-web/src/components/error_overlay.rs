use crate::i18n::tr;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub message: AttrValue,
}

/// Full-page notice shown when start-up loading fails.
#[function_component(ErrorOverlay)]
pub fn error_overlay(p: &Props) -> Html {
    html! {
        <div class="error-overlay" role="alert">
            <p>{ tr("load_error", &[("error", p.message.as_str())]) }</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::set_lang;
    use futures::executor::block_on;
    use lbol_stats::Lang;
    use yew::LocalServerRenderer;

    #[test]
    fn overlay_names_the_failure() {
        set_lang(Lang::En);
        let props = Props {
            message: "HTTP 404".into(),
        };
        let html = block_on(LocalServerRenderer::<ErrorOverlay>::with_props(props).render());
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("Failed to load data: HTTP 404"));
    }
}
