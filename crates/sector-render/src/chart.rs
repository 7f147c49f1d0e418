//! SVG panel geometry for sector index charts
//!
//! Each sector gets one panel: a polyline of its index values, a dashed
//! guide at the base value, value ticks on the left and month ticks along
//! the bottom. Only coordinates are computed here; the markup lives in the
//! dashboard template.

use chrono::{Datelike, NaiveDate};
use sector_core::{BASE_VALUE, SectorIndex};
use serde::Serialize;

pub const PANEL_WIDTH: f64 = 1200.0;
pub const PANEL_HEIGHT: f64 = 280.0;
const PAD_LEFT: f64 = 56.0;
const PAD_RIGHT: f64 = 72.0;
const PAD_TOP: f64 = 40.0;
const PAD_BOTTOM: f64 = 32.0;
const Y_TICKS: usize = 5;

/// Labelled position on an axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// Everything needed to draw one sector panel
#[derive(Debug, Clone, Serialize)]
pub struct ChartPanel {
    pub title: String,
    pub color: String,
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_right: f64,
    pub plot_top: f64,
    pub plot_bottom: f64,
    /// `x,y` pairs for the polyline `points` attribute
    pub points: String,
    /// Vertical position of the base value guide
    pub base_y: f64,
    pub y_ticks: Vec<AxisTick>,
    pub x_ticks: Vec<AxisTick>,
    pub last_x: f64,
    pub last_y: f64,
    pub last_label: String,
}

/// Height of the stacked figure for a number of panels
pub fn figure_height(panels: usize) -> f64 {
    panels as f64 * PANEL_HEIGHT
}

/// Lay out the panel for one sector
pub fn panel(sector: &SectorIndex) -> ChartPanel {
    let points = sector.series.points();
    let (min_v, max_v) = value_extent(sector.series.extent());
    let xs = x_positions(points.len());

    let coords: Vec<(f64, f64)> = xs
        .iter()
        .zip(points)
        .map(|(&x, p)| (x, scale_value(p.value, min_v, max_v)))
        .collect();

    let points_attr = coords
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");

    let (last_x, last_y) = coords.last().copied().unwrap_or((PAD_LEFT, PAD_TOP));
    let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();

    ChartPanel {
        title: sector.name.clone(),
        color: sector.color.clone(),
        width: PANEL_WIDTH,
        height: PANEL_HEIGHT,
        plot_left: PAD_LEFT,
        plot_right: PANEL_WIDTH - PAD_RIGHT,
        plot_top: PAD_TOP,
        plot_bottom: PANEL_HEIGHT - PAD_BOTTOM,
        points: points_attr,
        base_y: scale_value(BASE_VALUE, min_v, max_v),
        y_ticks: value_ticks(min_v, max_v),
        x_ticks: month_ticks(&dates, &xs),
        last_x,
        last_y,
        last_label: format!("{:.1}", sector.series.last().value),
    }
}

/// Value range to plot, always including the base value
fn value_extent((lo, hi): (f64, f64)) -> (f64, f64) {
    let mut min_v = lo.min(BASE_VALUE);
    let mut max_v = hi.max(BASE_VALUE);

    if !min_v.is_finite() || !max_v.is_finite() {
        return (BASE_VALUE - 1.0, BASE_VALUE + 1.0);
    }

    // widen flat ranges
    if (max_v - min_v).abs() < f64::EPSILON {
        let adjust = min_v.abs() * 0.1;
        return (min_v - adjust, max_v + adjust);
    }

    let margin = (max_v - min_v) * 0.05;
    min_v -= margin;
    max_v += margin;
    (min_v, max_v)
}

fn scale_value(value: f64, min_v: f64, max_v: f64) -> f64 {
    let inner_height = PANEL_HEIGHT - PAD_TOP - PAD_BOTTOM;
    if (max_v - min_v).abs() < f64::EPSILON {
        return PAD_TOP + inner_height / 2.0;
    }

    let norm = (value - min_v) / (max_v - min_v);
    PAD_TOP + (1.0 - norm) * inner_height
}

fn x_positions(len: usize) -> Vec<f64> {
    let inner_width = PANEL_WIDTH - PAD_LEFT - PAD_RIGHT;
    match len {
        0 => Vec::new(),
        1 => vec![PAD_LEFT + inner_width / 2.0],
        _ => (0..len)
            .map(|i| PAD_LEFT + inner_width * (i as f64 / (len - 1) as f64))
            .collect(),
    }
}

fn value_ticks(min_v: f64, max_v: f64) -> Vec<AxisTick> {
    (0..Y_TICKS)
        .map(|i| {
            let value = min_v + (max_v - min_v) * i as f64 / (Y_TICKS - 1) as f64;
            AxisTick {
                position: scale_value(value, min_v, max_v),
                label: format!("{value:.0}"),
            }
        })
        .collect()
}

/// One tick at the first trading date of each month
fn month_ticks(dates: &[NaiveDate], xs: &[f64]) -> Vec<AxisTick> {
    let mut ticks = Vec::new();
    let mut last_month: Option<(i32, u32)> = None;

    for (date, &x) in dates.iter().zip(xs) {
        let key = (date.year(), date.month());
        if last_month == Some(key) {
            continue;
        }
        last_month = Some(key);
        ticks.push(AxisTick {
            position: x,
            label: date.format("%b %Y").to_string(),
        });
    }

    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use sector_core::{IndexPoint, IndexSeries};

    fn sector(values: &[f64]) -> SectorIndex {
        let start = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &value)| IndexPoint {
                date: start + chrono::Days::new(i as u64),
                value,
            })
            .collect();
        SectorIndex::new("AI & Semis", "#76b900", IndexSeries::new(points).unwrap())
    }

    #[test]
    fn test_figure_height() {
        assert_eq!(figure_height(5), 1400.0);
        assert_eq!(figure_height(0), 0.0);
    }

    #[test]
    fn test_panel_geometry() {
        let panel = panel(&sector(&[100.0, 120.0, 80.0, 110.0]));

        let coords: Vec<(f64, f64)> = panel
            .points
            .split(' ')
            .map(|pair| {
                let (x, y) = pair.split_once(',').unwrap();
                (x.parse().unwrap(), y.parse().unwrap())
            })
            .collect();

        assert_eq!(coords.len(), 4);
        assert!((coords[0].0 - panel.plot_left).abs() < 0.01);
        assert!((coords[3].0 - panel.plot_right).abs() < 0.01);
        // Highest value sits nearest the top, lowest nearest the bottom
        assert!(coords[1].1 < coords[3].1);
        assert!(coords[2].1 > coords[0].1);
        assert!(coords.iter().all(|(_, y)| *y >= panel.plot_top && *y <= panel.plot_bottom));
        assert_eq!(panel.last_label, "110.0");
        assert!((panel.base_y - coords[0].1).abs() < 0.01);
    }

    #[test]
    fn test_month_ticks() {
        let panel = panel(&sector(&[100.0, 101.0, 102.0, 103.0, 104.0]));
        let labels: Vec<&str> = panel.x_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 2025", "Feb 2025"]);
    }

    #[test]
    fn test_flat_series_is_centered() {
        let panel = panel(&sector(&[100.0, 100.0, 100.0]));
        let mid = PAD_TOP + (PANEL_HEIGHT - PAD_TOP - PAD_BOTTOM) / 2.0;
        assert!((panel.base_y - mid).abs() < 1e-9);
        assert_eq!(panel.y_ticks.len(), Y_TICKS);
    }
}
