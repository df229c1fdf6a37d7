//! Plotly bindings: the browser-side [`ChartSink`].
//!
//! Plot specs and restyle updates are built as JSON here (host-testable) and
//! handed to `Plotly.newPlot` / `Plotly.restyle` through `serde-wasm-bindgen`.

use lbol_stats::{ChartSink, PlotSpec, PointRef, SeriesOverride};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    fn new_plot(id: &str, data: JsValue, layout: JsValue, config: JsValue)
    -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = Plotly, js_name = restyle, catch)]
    fn restyle_traces(id: &str, update: JsValue, indices: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["Plotly", "Plots"], js_name = resize, catch)]
    fn resize_plot(id: &str) -> Result<JsValue, JsValue>;
}

#[derive(Debug, thiserror::Error)]
pub enum PlotlyError {
    #[error("Plotly.{op} failed: {message}")]
    Call { op: &'static str, message: String },
    #[error("could not convert plot data: {0}")]
    Convert(#[from] serde_wasm_bindgen::Error),
}

fn call_error(op: &'static str) -> impl Fn(JsValue) -> PlotlyError {
    move |err| PlotlyError::Call {
        op,
        message: crate::dom::js_error_message(&err),
    }
}

/// Plotly trace objects for a plot spec.
#[must_use]
pub fn traces_json(spec: &PlotSpec) -> Value {
    Value::Array(
        spec.traces
            .iter()
            .map(|trace| {
                json!({
                    "type": "scatter",
                    "mode": "markers+text",
                    "name": trace.name,
                    "x": trace.x,
                    "y": trace.y,
                    "text": trace.text,
                    "customdata": trace.customdata,
                    "textposition": "top center",
                    "hoverinfo": "none",
                    "visible": trace.visible,
                    "marker": {
                        "color": trace.color,
                        "size": trace.size,
                        "line": { "color": "black", "width": 0 },
                    },
                })
            })
            .collect(),
    )
}

#[must_use]
pub fn layout_json(spec: &PlotSpec) -> Value {
    let layout = &spec.layout;
    let shapes: Vec<Value> = layout
        .guide_circles
        .iter()
        .map(|c| {
            json!({
                "type": "circle",
                "xref": "x",
                "yref": "y",
                "x0": c.x0,
                "y0": c.y0,
                "x1": c.x1,
                "y1": c.y1,
                "line": { "color": "rgba(128, 128, 128, 0.3)", "dash": "dot" },
                "layer": "below",
            })
        })
        .collect();
    json!({
        "height": layout.height,
        "hovermode": "closest",
        "showlegend": true,
        "xaxis": { "title": { "text": layout.x_title }, "range": [layout.x_range.0, layout.x_range.1] },
        "yaxis": { "title": { "text": layout.y_title }, "range": [layout.y_range.0, layout.y_range.1] },
        "shapes": shapes,
    })
}

/// `Plotly.restyle` update object plus the trace indices it targets.
#[must_use]
pub fn restyle_json(overrides: &[SeriesOverride]) -> (Value, Vec<usize>) {
    let update = json!({
        "visible": overrides.iter().map(|o| o.visible).collect::<Vec<_>>(),
        "marker.opacity": overrides.iter().map(|o| o.opacity.clone()).collect::<Vec<_>>(),
        "marker.line.width": overrides.iter().map(|o| o.outline_width.clone()).collect::<Vec<_>>(),
        "marker.line.color": overrides.iter().map(|o| o.outline_color.clone()).collect::<Vec<_>>(),
        "textfont.color": overrides.iter().map(|o| o.label_color.clone()).collect::<Vec<_>>(),
    });
    (update, overrides.iter().map(|o| o.series).collect())
}

fn to_js(value: &Value) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

/// Chart sink drawing into the element with `element_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotlySink {
    element_id: String,
}

impl PlotlySink {
    #[must_use]
    pub fn new(element_id: &str) -> Self {
        Self {
            element_id: element_id.to_string(),
        }
    }

    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }
}

impl ChartSink for PlotlySink {
    type Error = PlotlyError;

    fn create_plot(&mut self, spec: &PlotSpec) -> Result<(), Self::Error> {
        let config = json!({ "responsive": true, "displayModeBar": false });
        new_plot(
            &self.element_id,
            to_js(&traces_json(spec))?,
            to_js(&layout_json(spec))?,
            to_js(&config)?,
        )
        .map_err(call_error("newPlot"))?;
        log::debug!("plot created with {} traces", spec.traces.len());
        Ok(())
    }

    fn restyle(&mut self, overrides: &[SeriesOverride]) -> Result<(), Self::Error> {
        if overrides.is_empty() {
            return Ok(());
        }
        let (update, indices) = restyle_json(overrides);
        restyle_traces(&self.element_id, to_js(&update)?, to_js(&json!(indices))?)
            .map_err(call_error("restyle"))?;
        Ok(())
    }

    fn resize(&mut self) -> Result<(), Self::Error> {
        resize_plot(&self.element_id).map_err(call_error("Plots.resize"))?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct EventPoint {
    #[serde(rename = "curveNumber")]
    curve_number: usize,
    #[serde(rename = "pointNumber")]
    point_number: usize,
}

/// Hover/click payload; only the point indices are read.
#[derive(Debug, Deserialize)]
pub struct EventData {
    #[serde(default)]
    points: Vec<EventPoint>,
}

impl EventData {
    #[must_use]
    pub fn first_point(&self) -> Option<PointRef> {
        self.points.first().map(|p| PointRef {
            series: p.curve_number,
            point: p.point_number,
        })
    }
}

/// First `(series, point)` of a JSON event payload.
#[must_use]
pub fn event_point(data: &Value) -> Option<PointRef> {
    EventData::deserialize(data).ok()?.first_point()
}

#[cfg(target_arch = "wasm32")]
pub use listeners::on_plot_event;

#[cfg(target_arch = "wasm32")]
mod listeners {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    /// Attach `handler` to a Plotly event (`plotly_hover`, `plotly_click`, ...)
    /// of the plot element. The handler receives the first point of the
    /// payload, if any. The closure lives as long as the page.
    ///
    /// # Errors
    /// Returns an error when the element is missing or is not a Plotly plot.
    pub fn on_plot_event(
        element_id: &str,
        event: &str,
        handler: impl Fn(Option<PointRef>) + 'static,
    ) -> Result<(), JsValue> {
        let element = crate::dom::document()?
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str("plot element missing"))?;
        let on = js_sys::Reflect::get(&element, &JsValue::from_str("on"))?
            .dyn_into::<js_sys::Function>()?;
        let closure = Closure::<dyn Fn(JsValue)>::new(move |data: JsValue| {
            let point = serde_wasm_bindgen::from_value::<EventData>(data)
                .ok()
                .and_then(|d| d.first_point());
            handler(point);
        });
        on.call2(&element, &JsValue::from_str(event), closure.as_ref())?;
        closure.forget();
        Ok(())
    }
}
