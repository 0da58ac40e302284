//! Chart geometry. Everything here is pre-computed so the templates only
//! place shapes.

use std::f64::consts::PI;

use diagnosense_core::chart::{ChartRecord, RADAR_DOMAIN, format_percent};
use serde::Serialize;

use crate::styles::ChartStyles;

const MARGIN_TOP: f64 = 20.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 40.0;
const MARGIN_LEFT: f64 = 40.0;
const RADAR_RINGS: [f64; 4] = [25.0, 50.0, 75.0, 100.0];

fn px(v: f64) -> String {
    format!("{v:.2}")
}

#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
    pub color: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarGroup {
    pub label: String,
    pub label_x: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tick {
    pub y: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarChart {
    pub width: String,
    pub height: String,
    pub plot_left: String,
    pub plot_right: String,
    pub baseline: String,
    pub label_y: String,
    pub ticks: Vec<Tick>,
    pub groups: Vec<BarGroup>,
    pub legend: Vec<LegendEntry>,
}

/// Lay out a grouped bar chart: one group per record, positive bar then
/// negative bar, on a fixed 0–100 axis. Bar heights use the unrounded
/// percentages.
pub fn bar_chart(records: &[ChartRecord], styles: &ChartStyles) -> BarChart {
    let plot_w = styles.bar_width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = styles.bar_height - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;
    let group_w = if records.is_empty() {
        plot_w
    } else {
        plot_w / records.len() as f64
    };
    let bar_w = group_w * 0.3;

    let groups = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let group_x = MARGIN_LEFT + group_w * i as f64;
            let first_x = group_x + (group_w - 2.0 * bar_w) / 2.0;
            let series = [
                (record.positive, &styles.positive_color),
                (record.negative, &styles.negative_color),
            ];
            let bars = series
                .iter()
                .enumerate()
                .map(|(j, (value, color))| {
                    let h = value.clamp(0.0, 100.0) / 100.0 * plot_h;
                    Bar {
                        x: px(first_x + bar_w * j as f64),
                        y: px(baseline - h),
                        width: px(bar_w),
                        height: px(h),
                        color: (*color).clone(),
                        value: format_percent(*value),
                    }
                })
                .collect();
            BarGroup {
                label: record.category.clone(),
                label_x: px(group_x + group_w / 2.0),
                bars,
            }
        })
        .collect();

    let ticks = [0.0, 25.0, 50.0, 75.0, 100.0]
        .iter()
        .map(|t| Tick {
            y: px(baseline - t / 100.0 * plot_h),
            label: format!("{t}"),
        })
        .collect();

    BarChart {
        width: px(styles.bar_width),
        height: px(styles.bar_height),
        plot_left: px(MARGIN_LEFT),
        plot_right: px(MARGIN_LEFT + plot_w),
        baseline: px(baseline),
        label_y: px(baseline + 20.0),
        ticks,
        groups,
        legend: legend(records, styles),
    }
}

fn legend(records: &[ChartRecord], styles: &ChartStyles) -> Vec<LegendEntry> {
    match records.first() {
        Some(r) => vec![
            LegendEntry {
                name: r.outcomes.positive.to_string(),
                color: styles.positive_color.clone(),
            },
            LegendEntry {
                name: r.outcomes.negative.to_string(),
                color: styles.negative_color.clone(),
            },
        ],
        None => Vec::new(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarAxis {
    pub x: String,
    pub y: String,
    pub label: String,
    pub label_x: String,
    pub label_y: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarSeries {
    pub name: String,
    pub color: String,
    pub points: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarChart {
    pub size: String,
    pub cx: String,
    pub cy: String,
    pub fill_opacity: f64,
    pub rings: Vec<String>,
    pub axes: Vec<RadarAxis>,
    pub series: Vec<RadarSeries>,
    pub legend: Vec<LegendEntry>,
}

/// Geometry shared by every shape on one radar chart.
struct RadarFrame {
    cx: f64,
    cy: f64,
    radius: f64,
    spokes: usize,
}

impl RadarFrame {
    /// Position of `value` on spoke `i`, at most `r` from the center.
    fn point(&self, i: usize, value: f64, r: f64) -> (f64, f64) {
        let (lo, hi) = RADAR_DOMAIN;
        let angle = -PI / 2.0 + 2.0 * PI * i as f64 / self.spokes.max(1) as f64;
        let scaled = ((value - lo) / (hi - lo)).clamp(0.0, 1.0) * r;
        (self.cx + scaled * angle.cos(), self.cy + scaled * angle.sin())
    }

    fn polygon(&self, values: impl Iterator<Item = f64>) -> String {
        values
            .enumerate()
            .map(|(i, v)| {
                let (x, y) = self.point(i, v, self.radius);
                format!("{},{}", px(x), px(y))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lay out a radar chart with one spoke per record and the radial axis
/// fixed to [`RADAR_DOMAIN`].
pub fn radar_chart(records: &[ChartRecord], styles: &ChartStyles) -> RadarChart {
    let size = styles.radar_size;
    let frame = RadarFrame {
        cx: size / 2.0,
        cy: size / 2.0,
        radius: size * 0.35,
        spokes: records.len(),
    };
    let hi = RADAR_DOMAIN.1;

    let rings = RADAR_RINGS
        .iter()
        .map(|ring| frame.polygon(records.iter().map(|_| *ring)))
        .collect();

    let axes = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let (x, y) = frame.point(i, hi, frame.radius);
            let (lx, ly) = frame.point(i, hi, frame.radius + 24.0);
            RadarAxis {
                x: px(x),
                y: px(y),
                label: record.category.clone(),
                label_x: px(lx),
                label_y: px(ly),
            }
        })
        .collect();

    let series = match records.first() {
        Some(first) => vec![
            RadarSeries {
                name: first.outcomes.positive.to_string(),
                color: styles.positive_color.clone(),
                points: frame.polygon(records.iter().map(|r| r.positive)),
            },
            RadarSeries {
                name: first.outcomes.negative.to_string(),
                color: styles.negative_color.clone(),
                points: frame.polygon(records.iter().map(|r| r.negative)),
            },
        ],
        None => Vec::new(),
    };

    RadarChart {
        size: px(size),
        cx: px(frame.cx),
        cy: px(frame.cy),
        fill_opacity: styles.fill_opacity,
        rings,
        axes,
        series,
        legend: legend(records, styles),
    }
}
