// File: src/render.rs
use crate::core::error::{AlphabetError, Result};
use crate::core::types::{
    display_glyph, AlphabetTable, CorrelationResult, PositionPair, RegressionResult, SymbolMapping,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::{debug, info};

const MARKER_COLOR: RGBColor = RGBColor(31, 119, 180);
const LINE_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Explicit styling for one render call. Nothing here touches
/// process-wide plotting state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Font for the glyph labels at each point.
    pub label_font: String,
    /// Font for the title and axis descriptions.
    pub text_font: String,
    pub title_size: f64,
    pub axis_size: f64,
    pub label_size: f64,
    pub base_size: (u32, u32),
    pub stretch: f64,
    pub marker_radius: u32,
    pub label_offset: (f64, f64),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            label_font: "FreeMono".to_string(),
            text_font: "DejaVu Sans".to_string(),
            title_size: 24.0,
            axis_size: 16.0,
            label_size: 12.0,
            base_size: (640, 480),
            stretch: 1.3,
            marker_radius: 4,
            label_offset: (0.2, 0.2),
        }
    }
}

impl RenderConfig {
    pub fn figure_size(&self) -> (u32, u32) {
        let (w, h) = self.base_size;
        (
            (w as f64 * self.stretch).round() as u32,
            (h as f64 * self.stretch).round() as u32,
        )
    }
}

/// Where a rendered comparison goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Write a PNG, replacing any existing file at the path.
    Png(PathBuf),
    /// Keep the figure in memory as an SVG document.
    Svg,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    File(PathBuf),
    Svg(String),
}

/// Formats `value` with `digits` significant figures the way general
/// float formatting does, keeping at least one digit after the point in
/// fixed notation: 1.0, 0.5, 1.2e+01, 1e-05, 2.3e+04.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let digits = digits.max(1);
    if value == 0.0 {
        return "0.0".to_string();
    }

    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 - 1 {
        let mantissa = if mantissa.contains('.') {
            mantissa.trim_end_matches('0').trim_end_matches('.')
        } else {
            mantissa
        };
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.abs());
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    let mut fixed = format!("{value:.decimals$}");
    if fixed.contains('.') {
        let trimmed = fixed.trim_end_matches('0').len();
        fixed.truncate(trimmed);
    }
    if fixed.ends_with('.') {
        fixed.push('0');
    } else if !fixed.contains('.') {
        fixed.push_str(".0");
    }
    fixed
}

/// Legend text for the regression line, e.g. `ρ=-0.5,p=0.67`.
pub fn legend_label(correlation: &CorrelationResult) -> String {
    format!(
        "ρ={},p={}",
        format_significant(correlation.statistic, 2),
        format_significant(correlation.p_value, 2)
    )
}

/// Everything needed to draw one comparison, with every glyph already
/// resolved. Building this is where lookups fail, before any output exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub points: Vec<(f64, f64)>,
    pub labels: Vec<String>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub line: [(f64, f64); 2],
    pub legend: String,
}

impl Plot {
    pub fn new(
        source: &AlphabetTable,
        target: &AlphabetTable,
        pairs: &[PositionPair],
        regression: &RegressionResult,
        correlation: &CorrelationResult,
        mapping: Option<&SymbolMapping>,
    ) -> Result<Self> {
        if pairs.is_empty() {
            return Err(AlphabetError::EmptyAlignment {
                source_name: source.name.clone(),
                target_name: target.name.clone(),
            });
        }

        let labels = pairs
            .iter()
            .map(|pair| {
                // The label names the source letter at this position.
                let letter = source.letter_at(pair.source).unwrap_or(&pair.letter);
                display_glyph(letter, mapping).map(str::to_string)
            })
            .collect::<Result<Vec<_>>>()?;

        let points: Vec<(f64, f64)> = pairs
            .iter()
            .map(|p| (p.source as f64, p.target as f64))
            .collect();
        let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let y_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            title: format!("{} vs. {}", source.name, target.name),
            x_desc: format!("{} Ordering", source.name),
            y_desc: format!("{} Ordering", target.name),
            points,
            labels,
            x_range: (0.0, x_max + 1.0),
            y_range: (0.0, y_max + 2.0),
            line: [
                (x_min, regression.predict(x_min)),
                (x_max, regression.predict(x_max)),
            ],
            legend: legend_label(correlation),
        })
    }
}

fn draw<DB>(
    root: &DrawingArea<DB, Shift>,
    plot: &Plot,
    config: &RenderConfig,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let text_font = config.text_font.as_str();
    let label_font = config.label_font.as_str();

    let mut chart = ChartBuilder::on(root)
        .caption(&plot.title, (text_font, config.title_size))
        .margin(12)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            plot.x_range.0..plot.x_range.1,
            plot.y_range.0..plot.y_range.1,
        )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&plot.x_desc)
        .y_desc(&plot.y_desc)
        .axis_desc_style((text_font, config.axis_size))
        .draw()?;

    chart.draw_series(
        plot.points
            .iter()
            .map(|&xy| Circle::new(xy, config.marker_radius, MARKER_COLOR.filled())),
    )?;

    let (dx, dy) = config.label_offset;
    let label_style = TextStyle::from((label_font, config.label_size))
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    chart.draw_series(plot.points.iter().zip(&plot.labels).map(|(&(x, y), glyph)| {
        Text::new(glyph.clone(), (x + dx, y + dy), label_style.clone())
    }))?;

    chart
        .draw_series(LineSeries::new(plot.line, LINE_COLOR.stroke_width(2)))?
        .label(plot.legend.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], LINE_COLOR.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((text_font, config.label_size))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.4))
        .draw()?;

    root.present()?;
    Ok(())
}

fn render_error(err: Box<dyn Error>) -> AlphabetError {
    AlphabetError::Render(err.to_string())
}

/// Writes a PNG next to `path` and moves it into place only once fully
/// encoded, so a failed render never leaves a partial image behind.
fn write_png(plot: &Plot, config: &RenderConfig, path: &Path) -> Result<()> {
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let temp_file = Builder::new()
        .prefix(".alphabet-corr-")
        .suffix(".png")
        .tempfile_in(parent_dir)?;
    {
        let root = BitMapBackend::new(temp_file.path(), config.figure_size()).into_drawing_area();
        draw(&root, plot, config).map_err(render_error)?;
    }
    temp_file.persist(path).map_err(std::io::Error::from)?;
    Ok(())
}

fn write_svg(plot: &Plot, config: &RenderConfig) -> Result<String> {
    let mut document = String::new();
    {
        let root = SVGBackend::with_string(&mut document, config.figure_size()).into_drawing_area();
        draw(&root, plot, config).map_err(render_error)?;
    }
    Ok(document)
}

/// Draws alphabet comparisons with a fixed styling configuration.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders a scatter of the pairs with the regression line and the
    /// correlation legend. A missing glyph aborts before anything is drawn.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        source: &AlphabetTable,
        target: &AlphabetTable,
        pairs: &[PositionPair],
        regression: &RegressionResult,
        correlation: &CorrelationResult,
        mapping: Option<&SymbolMapping>,
        output: &RenderTarget,
    ) -> Result<RenderOutput> {
        let plot = Plot::new(source, target, pairs, regression, correlation, mapping)?;
        debug!(title = %plot.title, points = plot.points.len(), legend = %plot.legend, "Rendering comparison");
        match output {
            RenderTarget::Png(path) => {
                write_png(&plot, &self.config, path)?;
                info!(path = %path.display(), "Wrote comparison plot");
                Ok(RenderOutput::File(path.clone()))
            }
            RenderTarget::Svg => write_svg(&plot, &self.config).map(RenderOutput::Svg),
        }
    }
}
