//! Property checks run against a loaded [`Dashboard`].
//!
//! Every check works on its own clone of the dashboard and returns the list
//! of violations it found; an empty list is a pass.

use lbol_stats::constants::OPACITY_FILTERED_OUT;
use lbol_stats::{
    Dashboard, EnemyTable, FilterState, GraphEvent, MedalFloor, PointRef, SortColumn,
    SortDirection, SortState, ViewMode, filters_match,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::sink::RecordingSink;

type CheckFn = fn(&Dashboard) -> Vec<String>;

pub const CHECKS: [(&str, &str, CheckFn); 8] = [
    (
        "series-layout",
        "one series per card type and view mode",
        series_layout,
    ),
    (
        "mode-visibility",
        "only the active mode's series are visible",
        mode_visibility,
    ),
    (
        "filter-idempotence",
        "applying the same filter twice changes nothing",
        filter_idempotence,
    ),
    (
        "filter-precedence",
        "filtered-out points stay dimmed while a card is hovered",
        filter_precedence,
    ),
    (
        "hide-delay",
        "stale hide timers never close the detail panel",
        hide_delay,
    ),
    (
        "mode-switch",
        "switching the view mode clears the pin and the detail",
        mode_switch,
    ),
    (
        "spotlight-exclusive",
        "every card lands in at most one spotlight category",
        spotlight_exclusive,
    ),
    (
        "enemy-sort",
        "enemy table sorting toggles and orders rows",
        enemy_sort,
    ),
];

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub description: String,
    pub passed: bool,
    pub failures: Vec<String>,
    pub elapsed_ms: f64,
}

/// Run the checks whose names are in `selected` (all when it is empty).
pub fn run_checks(board: &Dashboard, selected: &[String], verbose: bool) -> Vec<CheckResult> {
    CHECKS
        .iter()
        .filter(|(name, _, _)| selected.is_empty() || selected.iter().any(|s| s == name))
        .map(|(name, description, check)| {
            let started = Instant::now();
            let failures = check(board);
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            if verbose {
                log::info!("{name}: {} failure(s) in {elapsed_ms:.2} ms", failures.len());
            }
            CheckResult {
                name: (*name).to_string(),
                description: (*description).to_string(),
                passed: failures.is_empty(),
                failures,
                elapsed_ms,
            }
        })
        .collect()
}

/// Names of checks in `selected` that do not exist.
#[must_use]
pub fn unknown_checks(selected: &[String]) -> Vec<String> {
    selected
        .iter()
        .filter(|s| !CHECKS.iter().any(|(name, _, _)| name == s))
        .cloned()
        .collect()
}

fn first_point(board: &Dashboard, mode: ViewMode) -> Option<PointRef> {
    let graph = board.graph();
    graph.series_range(mode).find_map(|series| {
        graph
            .series
            .get(series)
            .filter(|s| !s.points.is_empty())
            .map(|_| PointRef { series, point: 0 })
    })
}

fn series_layout(board: &Dashboard) -> Vec<String> {
    let graph = board.graph();
    let mut failures = Vec::new();
    let expected = graph.types.len() * (1 + graph.situations.len());
    if graph.series.len() != expected {
        failures.push(format!(
            "{} series for {} types and {} situations, expected {expected}",
            graph.series.len(),
            graph.types.len(),
            graph.situations.len()
        ));
    }
    let mut sink = RecordingSink::default();
    let Ok(()) = board.render(&mut sink);
    match sink.plots.first() {
        Some(spec) if spec.traces.len() == graph.series.len() => {}
        Some(spec) => failures.push(format!(
            "plot has {} traces for {} series",
            spec.traces.len(),
            graph.series.len()
        )),
        None => failures.push("render created no plot".to_string()),
    }
    if sink.last_restyle().map(<[_]>::len) != Some(graph.series.len()) {
        failures.push("initial restyle does not cover every series".to_string());
    }
    failures
}

fn mode_visibility(board: &Dashboard) -> Vec<String> {
    let mut board = board.clone();
    let width = board.graph().types.len();
    let modes = std::iter::once(ViewMode::Aggregate)
        .chain((0..board.graph().situations.len()).map(ViewMode::Situational));
    let mut failures = Vec::new();
    for mode in modes {
        board.handle(GraphEvent::SwitchMode(mode));
        let visible: Vec<bool> = board.overrides().iter().map(|o| o.visible).collect();
        if visible != board.graph().visibility(mode) {
            failures.push(format!("{mode:?}: visibility does not match the mode"));
        }
        let shown = visible.iter().filter(|v| **v).count();
        if shown != width {
            failures.push(format!("{mode:?}: {shown} visible series, expected {width}"));
        }
    }
    failures
}

fn strict_filter() -> FilterState {
    FilterState {
        medal_floor: MedalFloor::SilverOrBetter,
        attention_threshold: 50.0,
        ..FilterState::default()
    }
}

fn filter_idempotence(board: &Dashboard) -> Vec<String> {
    let mut board = board.clone();
    board.handle(GraphEvent::SetFilter(strict_filter()));
    let once = board.overrides();
    board.handle(GraphEvent::SetFilter(strict_filter()));
    if once == board.overrides() {
        Vec::new()
    } else {
        vec!["second application of the filter changed the overrides".to_string()]
    }
}

fn filter_precedence(board: &Dashboard) -> Vec<String> {
    let mut board = board.clone();
    let filter = strict_filter();
    board.handle(GraphEvent::SetFilter(filter.clone()));
    if let Some(at) = first_point(&board, ViewMode::Aggregate) {
        board.handle(GraphEvent::Hover(at));
    }
    let dataset = &board.context().dataset;
    let graph = board.graph();
    let mut failures = Vec::new();
    for over in board.overrides().iter().filter(|o| o.visible) {
        for (idx, opacity) in over.opacity.iter().enumerate() {
            let Some(point) = graph.point_record(dataset, over.series, idx) else {
                continue;
            };
            let excluded = !filters_match(&point, &filter);
            if excluded && (*opacity - OPACITY_FILTERED_OUT).abs() > f64::EPSILON {
                failures.push(format!(
                    "{} fails the filter but has opacity {opacity}",
                    point.name()
                ));
            }
        }
    }
    failures
}

fn hide_delay(board: &Dashboard) -> Vec<String> {
    let mut board = board.clone();
    let Some(at) = first_point(&board, ViewMode::Aggregate) else {
        return Vec::new();
    };
    let mut failures = Vec::new();
    board.handle(GraphEvent::Hover(at));
    let Some(stale) = board.handle(GraphEvent::Unhover).hide_after else {
        return vec!["unhover armed no hide timer".to_string()];
    };
    board.handle(GraphEvent::PanelEnter);
    board.handle(GraphEvent::HideElapsed(stale));
    if board.state().detail().is_none() {
        failures.push("a cancelled timer closed the detail panel".to_string());
    }
    let current = board.handle(GraphEvent::PanelLeave).hide_after;
    board.handle(GraphEvent::HideElapsed(stale));
    if board.state().detail().is_none() {
        failures.push("a superseded timer closed the detail panel".to_string());
    }
    match current {
        Some(ticket) => {
            board.handle(GraphEvent::HideElapsed(ticket));
            if board.state().detail().is_some() {
                failures.push("the current timer left the detail panel open".to_string());
            }
        }
        None => failures.push("leaving the panel armed no hide timer".to_string()),
    }
    failures
}

fn mode_switch(board: &Dashboard) -> Vec<String> {
    let mut board = board.clone();
    if board.graph().situations.is_empty() {
        log::debug!("mode-switch: dataset has no situations");
        return Vec::new();
    }
    let Some(at) = first_point(&board, ViewMode::Aggregate) else {
        return Vec::new();
    };
    board.handle(GraphEvent::Click(at));
    if board.state().pinned() != Some(at) {
        return vec!["click did not pin the point".to_string()];
    }
    board.handle(GraphEvent::SwitchMode(ViewMode::Situational(0)));
    let mut failures = Vec::new();
    if board.state().pinned().is_some() {
        failures.push("pin survived the mode switch".to_string());
    }
    if board.state().detail().is_some() {
        failures.push("detail survived the mode switch".to_string());
    }
    failures
}

fn spotlight_exclusive(board: &Dashboard) -> Vec<String> {
    let dataset = &board.context().dataset;
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    let mut failures = Vec::new();
    for entries in board.reports().spotlight.groups.values() {
        for entry in entries {
            *seen.entry(entry.name.as_str()).or_default() += 1;
            if !dataset.aggregate(&entry.name).is_some_and(|r| r.is_rankable()) {
                failures.push(format!("{} is not rankable", entry.name));
            }
        }
    }
    failures.extend(
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, count)| format!("{name} appears in {count} categories")),
    );
    failures
}

fn enemy_sort(board: &Dashboard) -> Vec<String> {
    let mut failures = Vec::new();
    let mut state = SortState::default();
    let first = state.activate(SortColumn::Encounters);
    let second = state.activate(SortColumn::Encounters);
    let other = state.activate(SortColumn::Name);
    if (first, second, other)
        != (
            SortDirection::Ascending,
            SortDirection::Descending,
            SortDirection::Ascending,
        )
    {
        failures.push(format!("sort directions went {first:?}, {second:?}, {other:?}"));
    }

    let ctx = board.context();
    let mut table = EnemyTable::build(&ctx.dataset, &ctx.dataset.metadata.character, ctx.lang);
    table.sort(SortColumn::Encounters, SortDirection::Descending);
    if table
        .rows
        .windows(2)
        .any(|pair| pair[0].encounters < pair[1].encounters)
    {
        failures.push("rows are not ordered by encounters".to_string());
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dashboard;

    #[test]
    fn bundled_dataset_passes_every_check() {
        let results = run_checks(&dashboard(), &[], false);
        assert_eq!(results.len(), CHECKS.len());
        for result in &results {
            assert!(result.passed, "{}: {:?}", result.name, result.failures);
        }
    }

    #[test]
    fn selection_limits_the_run() {
        let selected = vec!["hide-delay".to_string()];
        let results = run_checks(&dashboard(), &selected, false);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "hide-delay");
    }

    #[test]
    fn unknown_names_are_reported() {
        let selected = vec!["series-layout".to_string(), "nope".to_string()];
        assert_eq!(unknown_checks(&selected), vec!["nope".to_string()]);
    }

    #[test]
    fn first_point_skips_empty_series() {
        let board = dashboard();
        let at = first_point(&board, ViewMode::Aggregate).unwrap();
        assert!(!board.graph().series[at.series].points.is_empty());
    }
}
