//! Chart.js configuration model
//!
//! These types serialize to the object passed as the second argument of
//! `new Chart(ctx, config)`. Unset optional fields are left out of the JSON so
//! the renderer falls back to its own defaults.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Chart type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
}

/// RGBA colour, serialized as a CSS `rgba(...)` string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha
    pub const fn alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Dashboard palette
pub mod palette {
    use super::Rgba;

    pub const BLUE: Rgba = Rgba::new(54, 162, 235, 1.0);
    pub const RED: Rgba = Rgba::new(255, 99, 132, 1.0);
    pub const TEAL: Rgba = Rgba::new(75, 192, 192, 1.0);
    pub const YELLOW: Rgba = Rgba::new(255, 206, 86, 1.0);
    pub const ORANGE: Rgba = Rgba::new(255, 159, 64, 1.0);
    pub const PURPLE: Rgba = Rgba::new(153, 102, 255, 1.0);
    pub const GREY: Rgba = Rgba::new(201, 203, 207, 1.0);

    /// Colours cycled through for per-point backgrounds
    pub const CYCLE: [Rgba; 7] = [TEAL, YELLOW, RED, BLUE, ORANGE, PURPLE, GREY];
}

/// A single colour or one colour per data point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(Rgba),
    PerPoint(Vec<Rgba>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: ColorSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Rgba>,
    pub border_width: u32,
    #[serde(rename = "yAxisID", skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: Some(label.into()),
            data,
            background_color: ColorSpec::Single(palette::GREY.alpha(0.7)),
            border_color: None,
            border_width: 2,
            y_axis_id: None,
            tension: None,
        }
    }

    /// Dataset without a legend label, as used by doughnut charts
    pub fn unlabeled(data: Vec<f64>) -> Self {
        Self {
            label: None,
            ..Self::new("", data)
        }
    }

    /// Filled bars: translucent background, opaque border
    pub fn color(mut self, color: Rgba) -> Self {
        self.background_color = ColorSpec::Single(color.alpha(0.7));
        self.border_color = Some(color);
        self
    }

    /// Line series: opaque stroke, faint fill
    pub fn stroke(mut self, color: Rgba) -> Self {
        self.background_color = ColorSpec::Single(color.alpha(0.2));
        self.border_color = Some(color);
        self
    }

    /// One translucent background per point, cycling the palette
    pub fn per_point_colors(mut self) -> Self {
        let colors = (0..self.data.len())
            .map(|i| palette::CYCLE[i % palette::CYCLE.len()].alpha(0.7))
            .collect();
        self.background_color = ColorSpec::PerPoint(colors);
        self.border_color = None;
        self
    }

    pub fn axis(mut self, axis: impl Into<String>) -> Self {
        self.y_axis_id = Some(axis.into());
        self
    }

    pub fn tension(mut self, tension: f64) -> Self {
        self.tension = Some(tension);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: String,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub draw_on_chart_area: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub max_ticks_limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
    Top,
    Bottom,
}

/// One entry of `options.scales`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

impl Scale {
    /// Axis with a visible title
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Some(AxisTitle {
                display: true,
                text: text.into(),
            }),
            ..Self::default()
        }
    }

    /// Displayed linear axis on one side of the chart
    pub fn linear(position: Position, text: impl Into<String>) -> Self {
        Self {
            kind: Some("linear".to_string()),
            display: Some(true),
            position: Some(position),
            ..Self::titled(text)
        }
    }

    pub fn begin_at_zero(mut self) -> Self {
        self.begin_at_zero = Some(true);
        self
    }

    /// Keep grid lines off the plot area, for secondary axes
    pub fn without_grid(mut self) -> Self {
        self.grid = Some(Grid {
            draw_on_chart_area: false,
        });
        self
    }

    pub fn max_ticks(mut self, limit: u32) -> Self {
        self.ticks = Some(Ticks {
            max_ticks_limit: limit,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scales: BTreeMap<String, Scale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: true,
            index_axis: None,
            interaction: None,
            scales: BTreeMap::new(),
            plugins: None,
        }
    }
}

/// Complete chart configuration handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn builder(kind: ChartKind) -> ChartConfigBuilder {
        ChartConfigBuilder::new(kind)
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Every field serializes to plain JSON, so this cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Builder for [`ChartConfig`]
pub struct ChartConfigBuilder {
    config: ChartConfig,
}

impl ChartConfigBuilder {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            config: ChartConfig {
                kind,
                data: ChartData {
                    labels: Vec::new(),
                    datasets: Vec::new(),
                },
                options: ChartOptions::default(),
            },
        }
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.data.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.config.data.datasets.push(dataset);
        self
    }

    pub fn scale(mut self, axis: impl Into<String>, scale: Scale) -> Self {
        self.config.options.scales.insert(axis.into(), scale);
        self
    }

    /// Tooltips and hover show every dataset at the hovered index
    pub fn index_interaction(mut self) -> Self {
        self.config.options.interaction = Some(Interaction {
            mode: "index".to_string(),
            intersect: false,
        });
        self
    }

    /// Lay bars out horizontally
    pub fn horizontal(mut self) -> Self {
        self.config.options.index_axis = Some("y".to_string());
        self
    }

    pub fn legend_position(mut self, position: Position) -> Self {
        self.config.options.plugins = Some(Plugins {
            legend: Legend {
                display: None,
                position: Some(position),
            },
        });
        self
    }

    pub fn hide_legend(mut self) -> Self {
        self.config.options.plugins = Some(Plugins {
            legend: Legend {
                display: Some(false),
                position: None,
            },
        });
        self
    }

    pub fn build(self) -> ChartConfig {
        self.config
    }
}
