//! SVG line chart comparing the strategy with its benchmark.
//!
//! Both curves share one set of axes. The x axis is calendar time across the
//! union of both curves' dates; the y axis spans both curves and always
//! includes zero.

use crate::domain::metrics::CurvePoint;
use chrono::NaiveDate;

pub const CHART_TITLE: &str = "Pairs Trading Strategy vs. Benchmark";
pub const STRATEGY_LABEL: &str = "Pairs Trading Strategy";

const CHART_WIDTH: f64 = 1200.0;
const CHART_HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 50.0;
const Y_TICKS: usize = 5;

const STRATEGY_COLOR: &str = "#1f77b4";
const BENCHMARK_COLOR: &str = "#ff7f0e";

pub struct Series<'a> {
    pub label: &'a str,
    pub color: &'a str,
    pub points: &'a [CurvePoint],
}

struct Frame {
    first: NaiveDate,
    span_days: f64,
    min: f64,
    max: f64,
}

impl Frame {
    fn fit(series: &[Series]) -> Option<Self> {
        let all = || series.iter().flat_map(|s| s.points.iter());
        let first = all().map(|p| p.date).min()?;
        let last = all().map(|p| p.date).max()?;
        let min = all().map(|p| p.value).fold(0.0, f64::min);
        let max = all().map(|p| p.value).fold(0.0, f64::max);
        let (min, max) = if max - min < 1.0 {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        Some(Self {
            first,
            span_days: ((last - first).num_days() as f64).max(1.0),
            min,
            max,
        })
    }

    fn x(&self, date: NaiveDate) -> f64 {
        let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        MARGIN_LEFT + ((date - self.first).num_days() as f64 / self.span_days) * plot_width
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        MARGIN_TOP + plot_height - ((value - self.min) / (self.max - self.min)) * plot_height
    }

    fn date_at(&self, fraction: f64) -> NaiveDate {
        self.first + chrono::Duration::days((self.span_days * fraction).round() as i64)
    }
}

fn path_data(frame: &Frame, points: &[CurvePoint]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        d.push_str(&format!("{} {:.1} {:.1}", cmd, frame.x(p.date), frame.y(p.value)));
    }
    d
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the strategy and benchmark curves. Returns an empty string when
/// neither curve has any points.
pub fn generate_comparison_svg(
    strategy: &[CurvePoint],
    benchmark_label: &str,
    benchmark: &[CurvePoint],
) -> String {
    let series = [
        Series {
            label: STRATEGY_LABEL,
            color: STRATEGY_COLOR,
            points: strategy,
        },
        Series {
            label: benchmark_label,
            color: BENCHMARK_COLOR,
            points: benchmark,
        },
    ];
    render(CHART_TITLE, &series)
}

pub fn render(title: &str, series: &[Series]) -> String {
    let Some(frame) = Frame::fit(series) else {
        return String::new();
    };

    let plot_bottom = CHART_HEIGHT - MARGIN_BOTTOM;
    let plot_right = CHART_WIDTH - MARGIN_RIGHT;

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"##,
        CHART_WIDTH, CHART_HEIGHT, CHART_WIDTH, CHART_HEIGHT
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"30\" text-anchor=\"middle\" font-size=\"18\" fill=\"#222\">{}</text>\n",
        CHART_WIDTH / 2.0,
        escape(title)
    ));

    for i in 0..=Y_TICKS {
        let value = frame.min + (frame.max - frame.min) * i as f64 / Y_TICKS as f64;
        let y = frame.y(value);
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{:.1}\" x2=\"{}\" y2=\"{:.1}\" stroke=\"#eee\" stroke-width=\"1\"/>\n",
            MARGIN_LEFT, y, plot_right, y
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\" fill=\"#666\">{:.1}%</text>\n",
            MARGIN_LEFT - 6.0,
            y + 4.0,
            value
        ));
    }

    let zero = frame.y(0.0);
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{:.1}\" x2=\"{}\" y2=\"{:.1}\" stroke=\"#999\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT, zero, plot_right, zero
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, plot_bottom
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT, plot_bottom, plot_right, plot_bottom
    ));

    for fraction in [0.0, 0.5, 1.0] {
        let date = frame.date_at(fraction);
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{}\" text-anchor=\"middle\" font-size=\"11\" fill=\"#666\">{}</text>\n",
            frame.x(date),
            plot_bottom + 20.0,
            date
        ));
    }

    for s in series.iter().filter(|s| !s.points.is_empty()) {
        svg.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"/>\n",
            path_data(&frame, s.points),
            s.color
        ));
    }

    for (i, s) in series.iter().enumerate() {
        let y = MARGIN_TOP + 15.0 + i as f64 * 18.0;
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{:.1}\" x2=\"{}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"3\"/>\n",
            MARGIN_LEFT + 15.0,
            y,
            MARGIN_LEFT + 40.0,
            y,
            s.color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{:.1}\" font-size=\"12\" fill=\"#222\">{}</text>\n",
            MARGIN_LEFT + 48.0,
            y + 4.0,
            escape(s.label)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}
