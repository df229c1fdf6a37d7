//! Aggregate and per-situation point sets with a stable series layout.
//!
//! Series are laid out as `[aggregate types..][situation 0 types..]
//! [situation 1 types..]..`, one series per card type present in the
//! aggregate view. Situations without cards of a type keep an empty
//! placeholder series, so switching modes only toggles visibility.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::constants::{
    AXIS_RANGE, DEVIATION_CENTER, GRAPH_HEIGHT_PX, GUIDE_CIRCLE_RADII, MARKER_MAX_DIAMETER,
    MARKER_MIN_DIAMETER, OUTLINE_COLOR_CSS,
};
use crate::data::{CardType, CharacterDataset, Situation};
use crate::filter::{FilterState, HighlightState, PointRecord, evaluate};
use crate::text::{Lang, UiText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Aggregate,
    /// Index into the dataset's ordered situations.
    Situational(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    /// Canonical card name.
    pub name: String,
    pub label: String,
    /// HP deviation.
    pub x: f64,
    /// Turn deviation.
    pub y: f64,
    pub size: f64,
    /// Index into the source collection (graph records or situational rows).
    pub source: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub card_type: CardType,
    pub situation: Option<usize>,
    pub points: Vec<PlotPoint>,
}

impl Series {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.points.is_empty()
    }
}

/// Per-series visual attributes pushed to the chart on every event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesOverride {
    pub series: usize,
    pub visible: bool,
    pub opacity: Vec<f64>,
    pub outline_width: Vec<u8>,
    pub outline_color: Vec<&'static str>,
    pub label_color: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceSpec {
    pub name: String,
    pub color: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub size: Vec<f64>,
    pub text: Vec<String>,
    pub customdata: Vec<String>,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideCircle {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSpec {
    pub x_title: String,
    pub y_title: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub height: u32,
    pub center: f64,
    pub guide_circles: Vec<GuideCircle>,
}

/// Everything the chart needs to draw the scatter plot from scratch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub traces: Vec<TraceSpec>,
    pub layout: LayoutSpec,
}

fn aggregate_diameter(fights: f64, max_fights: f64) -> f64 {
    if max_fights <= 0.0 {
        return MARKER_MIN_DIAMETER;
    }
    (MARKER_MAX_DIAMETER * (fights.max(0.0) / max_fights).sqrt()).max(MARKER_MIN_DIAMETER)
}

fn situational_diameter(fights: f64, max_fights: f64) -> f64 {
    if max_fights <= 0.0 {
        return MARKER_MIN_DIAMETER;
    }
    (fights / max_fights * MARKER_MAX_DIAMETER).max(MARKER_MIN_DIAMETER)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectedGraph {
    pub types: Vec<CardType>,
    pub situations: Vec<Situation>,
    pub series: Vec<Series>,
}

impl ProjectedGraph {
    #[must_use]
    pub fn build(dataset: &CharacterDataset, lang: Lang) -> Self {
        let records = dataset.graph_records();
        let types: Vec<CardType> = CardType::ALL
            .into_iter()
            .filter(|t| records.iter().any(|r| r.card_type == *t))
            .collect();
        let situations = dataset.metadata.ordered_situations.clone();
        let mut series = Vec::with_capacity(types.len() * (1 + situations.len()));

        let max_fights = records
            .iter()
            .map(|r| r.total_fights_with)
            .fold(0.0_f64, f64::max);
        for card_type in &types {
            let points = records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.card_type == *card_type)
                .filter_map(|(idx, r)| {
                    Some(PlotPoint {
                        name: r.name.clone(),
                        label: r.display_name(lang).to_string(),
                        x: r.hp_deviation?,
                        y: r.turn_deviation?,
                        size: aggregate_diameter(r.total_fights_with, max_fights),
                        source: idx,
                    })
                })
                .collect();
            series.push(Series {
                card_type: *card_type,
                situation: None,
                points,
            });
        }

        for (sit_idx, situation) in situations.iter().enumerate() {
            let rows: Vec<(usize, _)> = dataset
                .sit_data
                .iter()
                .enumerate()
                .filter(|(_, r)| !r.is_starter && r.situation() == *situation)
                .collect();
            let max_fights = rows
                .iter()
                .map(|(_, r)| r.fights_with)
                .fold(0.0_f64, f64::max);
            for card_type in &types {
                let points = rows
                    .iter()
                    .filter(|(_, r)| r.card_type == *card_type)
                    .filter_map(|(idx, r)| {
                        Some(PlotPoint {
                            name: r.name.clone(),
                            label: r.display_name(lang).to_string(),
                            x: r.hp_deviation?,
                            y: r.turn_deviation?,
                            size: situational_diameter(r.fights_with, max_fights),
                            source: *idx,
                        })
                    })
                    .collect();
                series.push(Series {
                    card_type: *card_type,
                    situation: Some(sit_idx),
                    points,
                });
            }
        }
        log::debug!(
            "projected {} series for {} types and {} situations",
            series.len(),
            types.len(),
            situations.len()
        );
        Self {
            types,
            situations,
            series,
        }
    }

    /// Series indices that belong to `mode`; empty for an unknown situation.
    #[must_use]
    pub fn series_range(&self, mode: ViewMode) -> Range<usize> {
        let width = self.types.len();
        match mode {
            ViewMode::Aggregate => 0..width,
            ViewMode::Situational(idx) if idx < self.situations.len() => {
                let start = width * (idx + 1);
                start..start + width
            }
            ViewMode::Situational(_) => 0..0,
        }
    }

    #[must_use]
    pub fn visibility(&self, mode: ViewMode) -> Vec<bool> {
        let range = self.series_range(mode);
        (0..self.series.len()).map(|idx| range.contains(&idx)).collect()
    }

    /// Find a card among the series of `mode`: `(series, point)` indices.
    #[must_use]
    pub fn locate(&self, name: &str, mode: ViewMode) -> Option<(usize, usize)> {
        self.series_range(mode).find_map(|series_idx| {
            self.series
                .get(series_idx)?
                .points
                .iter()
                .position(|p| p.name == name)
                .map(|point_idx| (series_idx, point_idx))
        })
    }

    #[must_use]
    pub fn point(&self, series: usize, point: usize) -> Option<&PlotPoint> {
        self.series.get(series)?.points.get(point)
    }

    /// Resolve a plotted point back to its records.
    #[must_use]
    pub fn point_record<'a>(
        &self,
        dataset: &'a CharacterDataset,
        series: usize,
        point: usize,
    ) -> Option<PointRecord<'a>> {
        let owner = self.series.get(series)?;
        let plotted = owner.points.get(point)?;
        match owner.situation {
            None => dataset
                .graph_records()
                .get(plotted.source)
                .map(PointRecord::Aggregate),
            Some(_) => {
                let record = dataset.sit_data.get(plotted.source)?;
                Some(PointRecord::Situational {
                    record,
                    aggregate: dataset.aggregate(&record.name),
                })
            }
        }
    }

    /// Visual overrides for every series; series outside `mode` are hidden.
    #[must_use]
    pub fn overrides(
        &self,
        dataset: &CharacterDataset,
        mode: ViewMode,
        filter: &FilterState,
        highlight: &HighlightState,
    ) -> Vec<SeriesOverride> {
        let active = self.series_range(mode);
        self.series
            .iter()
            .enumerate()
            .map(|(series_idx, series)| {
                let states: Vec<_> = if active.contains(&series_idx) {
                    (0..series.points.len())
                        .filter_map(|p| self.point_record(dataset, series_idx, p))
                        .map(|point| evaluate(&point, filter, highlight))
                        .collect()
                } else {
                    Vec::new()
                };
                SeriesOverride {
                    series: series_idx,
                    visible: active.contains(&series_idx),
                    opacity: states.iter().map(|s| s.opacity).collect(),
                    outline_width: states.iter().map(|s| s.outline_width).collect(),
                    outline_color: states.iter().map(|_| OUTLINE_COLOR_CSS).collect(),
                    label_color: states.iter().map(|s| s.label_color.css()).collect(),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn plot_spec(&self, mode: ViewMode, text: &UiText) -> PlotSpec {
        let active = self.series_range(mode);
        let traces = self
            .series
            .iter()
            .enumerate()
            .map(|(idx, series)| TraceSpec {
                name: series.card_type.label(text.lang()).to_string(),
                color: series.card_type.color(),
                x: series.points.iter().map(|p| p.x).collect(),
                y: series.points.iter().map(|p| p.y).collect(),
                size: series.points.iter().map(|p| p.size).collect(),
                text: series.points.iter().map(|p| p.label.clone()).collect(),
                customdata: series.points.iter().map(|p| p.name.clone()).collect(),
                visible: active.contains(&idx),
            })
            .collect();
        let guide_circles = GUIDE_CIRCLE_RADII
            .iter()
            .map(|r| GuideCircle {
                x0: DEVIATION_CENTER - r,
                y0: DEVIATION_CENTER - r,
                x1: DEVIATION_CENTER + r,
                y1: DEVIATION_CENTER + r,
            })
            .collect();
        PlotSpec {
            traces,
            layout: LayoutSpec {
                x_title: text.get_or("graph_xaxis", "HP Deviation"),
                y_title: text.get_or("graph_yaxis", "Turn Deviation"),
                x_range: AXIS_RANGE,
                y_range: AXIS_RANGE,
                height: GRAPH_HEIGHT_PX,
                center: DEVIATION_CENTER,
                guide_circles,
            },
        }
    }

    #[must_use]
    pub fn situation(&self, mode: ViewMode) -> Option<Situation> {
        match mode {
            ViewMode::Aggregate => None,
            ViewMode::Situational(idx) => self.situations.get(idx).copied(),
        }
    }
}

/// Co-occurrence partners of a card, by canonical name.
#[must_use]
pub fn partners_of<'a>(dataset: &'a CharacterDataset, name: &str) -> &'a [String] {
    dataset
        .aggregate(name)
        .map_or(&[], |r| r.partners.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CombatType, Rarity};
    use crate::test_support::{record, situational};

    fn dataset() -> CharacterDataset {
        let mut a = record("A", CardType::Attack, Rarity::Common);
        a.total_fights_with = 100.0;
        let mut b = record("B", CardType::Attack, Rarity::Common);
        b.total_fights_with = 25.0;
        let mut c = record("C", CardType::Skill, Rarity::Rare);
        c.total_fights_with = 0.0;
        c.partners = vec!["A".into()];

        let mut s1 = situational("A", CardType::Attack, 1, CombatType::Enemy);
        s1.fights_with = 10.0;
        let mut s2 = situational("B", CardType::Attack, 1, CombatType::Enemy);
        s2.fights_with = 5.0;
        let mut starter = situational("C", CardType::Skill, 1, CombatType::Enemy);
        starter.is_starter = true;
        let mut s3 = situational("C", CardType::Skill, 4, CombatType::Boss);
        s3.fights_with = 0.0;

        let mut dataset = CharacterDataset {
            agg_data_full: vec![a, b, c],
            sit_data: vec![s1, s2, starter, s3],
            ..CharacterDataset::default()
        };
        dataset.metadata.ordered_situations = vec![
            Situation::new(1, CombatType::Enemy),
            Situation::new(4, CombatType::Boss),
        ];
        dataset.finish_load();
        dataset
    }

    #[test]
    fn series_layout_is_stable_with_placeholders() {
        let graph = ProjectedGraph::build(&dataset(), Lang::Ja);
        assert_eq!(graph.types, vec![CardType::Attack, CardType::Skill]);
        assert_eq!(graph.series.len(), 2 * (1 + 2));
        // Act 1 Enemy has no non-starter skills, Act 4 Boss no attacks.
        assert!(graph.series[3].is_placeholder());
        assert!(graph.series[4].is_placeholder());
        assert_eq!(graph.series[5].points.len(), 1);
        assert_eq!(graph.visibility(ViewMode::Situational(1)), vec![
            false, false, false, false, true, true
        ]);
        assert_eq!(graph.series_range(ViewMode::Situational(9)), 0..0);
    }

    #[test]
    fn marker_sizes_follow_volume() {
        let graph = ProjectedGraph::build(&dataset(), Lang::Ja);
        let attack = &graph.series[0].points;
        assert!((attack[0].size - 40.0).abs() < 1e-9);
        assert!((attack[1].size - 20.0).abs() < 1e-9);
        assert!((graph.series[1].points[0].size - MARKER_MIN_DIAMETER).abs() < 1e-9);

        let situational = &graph.series[2].points;
        assert!((situational[0].size - 40.0).abs() < 1e-9);
        assert!((situational[1].size - 20.0).abs() < 1e-9);
        // Zero maximum falls back to the minimum diameter.
        assert!((graph.series[5].points[0].size - MARKER_MIN_DIAMETER).abs() < 1e-9);
    }

    #[test]
    fn locate_and_resolve_points_per_mode() {
        let data = dataset();
        let graph = ProjectedGraph::build(&data, Lang::Ja);
        assert_eq!(graph.locate("B", ViewMode::Aggregate), Some((0, 1)));
        assert_eq!(graph.locate("B", ViewMode::Situational(0)), Some((2, 1)));
        assert_eq!(graph.locate("B", ViewMode::Situational(1)), None);

        let resolved = graph.point_record(&data, 5, 0).unwrap();
        assert_eq!(resolved.name(), "C");
        assert!(resolved.aggregate().is_some());
        assert_eq!(partners_of(&data, "C"), ["A".to_string()]);
    }

    #[test]
    fn overrides_cover_every_series_and_hide_inactive() {
        let data = dataset();
        let graph = ProjectedGraph::build(&data, Lang::Ja);
        let highlight = HighlightState::focus("A", &[]);
        let overrides =
            graph.overrides(&data, ViewMode::Aggregate, &FilterState::default(), &highlight);
        assert_eq!(overrides.len(), graph.series.len());
        assert_eq!(overrides[0].opacity, vec![1.0, 0.1]);
        assert_eq!(overrides[0].outline_width, vec![3, 0]);
        assert!(!overrides[2].visible);
        assert!(overrides[2].opacity.is_empty());
    }

    #[test]
    fn plot_spec_uses_fixed_axes_and_guides() {
        let graph = ProjectedGraph::build(&dataset(), Lang::En);
        let spec = graph.plot_spec(ViewMode::Aggregate, &UiText::default());
        assert_eq!(spec.traces.len(), graph.series.len());
        assert_eq!(spec.traces[0].color, "#E57373");
        assert_eq!(spec.layout.x_range, (30.0, 70.0));
        assert_eq!(spec.layout.guide_circles.len(), 3);
        assert!((spec.layout.guide_circles[2].x0 - 35.0).abs() < 1e-9);
        assert!(spec.traces[0].visible && !spec.traces[2].visible);
    }
}
