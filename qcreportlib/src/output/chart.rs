//! Chart specs handed to the visualization collaborator.
//!
//! A [`Chart`] describes what to draw, not how: kind, title, axis labels and
//! the data (named series, box statistics, or a heatmap grid). Drawing is left
//! to a [`ChartRenderer`]. The bundled [`JsonChartRenderer`] writes the spec
//! as `graph.json` for an external plotting tool to consume.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::data::record::Value;
use crate::Result;

/// File name of the rendered chart artifact.
pub const CHART_FILE: &str = "graph.json";

/// What kind of plot the data calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    BoxPlot,
    Heatmap,
}

/// One (x, y) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: Value,
    pub y: f64,
}

/// A named sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<Point>,
}

impl Series {
    /// Pair up x and y values; extra values on either side are dropped.
    pub fn new(label: impl Into<String>, xs: Vec<Value>, ys: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            points: xs.into_iter().zip(ys).map(|(x, y)| Point { x, y }).collect(),
        }
    }
}

/// Precomputed box-and-whisker statistics for one position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub label: Value,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
}

/// Grid of values; `cells[row][column]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub rows: Vec<Value>,
    pub columns: Vec<Value>,
    pub cells: Vec<Vec<Option<f64>>>,
}

/// Complete description of one plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub boxes: Vec<BoxStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<Heatmap>,
}

impl Chart {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            series: Vec::new(),
            boxes: Vec::new(),
            heatmap: None,
        }
    }

    /// Builder: set axis labels
    pub fn axes(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    /// Builder: add a series
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Builder: set box statistics
    pub fn boxes(mut self, boxes: Vec<BoxStats>) -> Self {
        self.boxes = boxes;
        self
    }

    /// Builder: set heatmap grid
    pub fn heatmap(mut self, heatmap: Heatmap) -> Self {
        self.heatmap = Some(heatmap);
        self
    }
}

/// Turns a chart spec into one artifact inside a module directory.
pub trait ChartRenderer {
    /// Render `chart` into `dir`, returning the artifact path.
    fn render(&self, chart: &Chart, dir: &Path) -> Result<PathBuf>;
}

/// Writes the chart spec as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonChartRenderer;

impl ChartRenderer for JsonChartRenderer {
    fn render(&self, chart: &Chart, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CHART_FILE);
        let json = serde_json::to_string_pretty(chart).map_err(std::io::Error::from)?;
        fs::write(&path, json + "\n")?;
        Ok(path)
    }
}
