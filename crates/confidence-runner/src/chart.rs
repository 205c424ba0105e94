//! 지표 차트 렌더링.
//!
//! 지표별 기술자를 한 행으로, 기술자의 패널을 열로 배치한 SVG 그리드를
//! 생성합니다.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use confidence_metrics::{PlotDescriptor, PlotPanel};
use tracing::info;

use crate::error::{Result, RunnerError};

/// 차트 렌더러 trait.
pub trait ChartRenderer: Send + Sync {
    /// 기술자 목록을 파일로 렌더링합니다.
    fn render(&self, plots: &[PlotDescriptor], path: &Path) -> Result<()>;
}

const PALETTE: [&str; 5] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"];

/// SVG 차트 렌더러.
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    /// 패널 하나의 너비 (px)
    pub panel_width: u32,
    /// 패널 하나의 높이 (px)
    pub panel_height: u32,
    /// 패널 여백 (px)
    pub margin: u32,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self {
            panel_width: 480,
            panel_height: 160,
            margin: 28,
        }
    }
}

impl SvgChartRenderer {
    /// SVG 문서 문자열을 생성합니다.
    pub fn to_svg(&self, plots: &[PlotDescriptor]) -> Result<String> {
        if plots.is_empty() {
            return Err(RunnerError::Chart("no plots to render".to_string()));
        }

        let columns = plots.iter().map(|p| p.panels.len()).max().unwrap_or(1).max(1) as u32;
        let cell_w = self.panel_width + self.margin * 2;
        let cell_h = self.panel_height + self.margin * 2;
        let width = cell_w * columns;
        let height = cell_h * plots.len() as u32;

        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = width,
            h = height
        )?;
        writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

        for (row, plot) in plots.iter().enumerate() {
            for (col, panel) in plot.panels.iter().enumerate() {
                let x = col as u32 * cell_w + self.margin;
                let y = row as u32 * cell_h + self.margin;
                self.write_panel(&mut svg, plot, panel, x, y)?;
            }
        }

        writeln!(svg, "</svg>")?;
        Ok(svg)
    }

    fn write_panel(
        &self,
        svg: &mut String,
        plot: &PlotDescriptor,
        panel: &PlotPanel,
        x: u32,
        y: u32,
    ) -> Result<()> {
        let (w, h) = (self.panel_width as f64, self.panel_height as f64);
        let transform = |v: f64| -> Option<f64> {
            if panel.log_scale {
                (v > 0.0).then(|| v.log10())
            } else {
                Some(v)
            }
        };

        let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
        for value in panel
            .lines
            .iter()
            .flat_map(|l| l.values.iter().flatten())
            .filter_map(|v| transform(*v))
        {
            low = low.min(value);
            high = high.max(value);
        }
        if !low.is_finite() || !high.is_finite() {
            (low, high) = (0.0, 1.0);
        } else if (high - low).abs() < f64::EPSILON {
            (low, high) = (low - 0.5, high + 0.5);
        }

        writeln!(
            svg,
            r##"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="none" stroke="#cccccc"/>"##
        )?;
        writeln!(
            svg,
            r#"<text x="{}" y="{}" font-size="11">{}</text>"#,
            x,
            y.saturating_sub(8),
            escape_xml(&format!("{}: {}", plot.title, panel.title))
        )?;

        let points = plot.index.len().max(2) as f64 - 1.0;
        for (i, line) in panel.lines.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let mut segment: Vec<String> = Vec::new();

            for (pos, value) in line.values.iter().enumerate() {
                match value.and_then(transform) {
                    Some(v) => {
                        let px = x as f64 + pos as f64 / points * w;
                        let py = y as f64 + h - (v - low) / (high - low) * h;
                        segment.push(format!("{:.1},{:.1}", px, py));
                    }
                    None => flush_segment(svg, &mut segment, color)?,
                }
            }
            flush_segment(svg, &mut segment, color)?;

            writeln!(
                svg,
                r#"<text x="{}" y="{}" font-size="9" fill="{}">{}</text>"#,
                x + 4,
                y + 12 + i as u32 * 11,
                color,
                escape_xml(&line.label)
            )?;
        }

        Ok(())
    }
}

fn flush_segment(svg: &mut String, segment: &mut Vec<String>, color: &str) -> Result<()> {
    if segment.len() > 1 {
        writeln!(
            svg,
            r#"<polyline fill="none" stroke="{}" stroke-width="0.8" points="{}"/>"#,
            color,
            segment.join(" ")
        )?;
    }
    segment.clear();
    Ok(())
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, plots: &[PlotDescriptor], path: &Path) -> Result<()> {
        let svg = self.to_svg(plots)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, svg.as_bytes())?;

        info!(
            path = %path.display(),
            bytes = svg.len(),
            "Chart saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use confidence_core::{DateIndex, Series};
    use confidence_metrics::PlotLine;

    fn index() -> DateIndex {
        DateIndex::new(
            (1..=4)
                .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_renders_one_row_per_plot() {
        let price = PlotDescriptor::new(
            "PiCycle",
            "Pi Cycle Top Indicator",
            index(),
            vec![
                PlotPanel::new("Price")
                    .log_scale()
                    .with_line(PlotLine::dense("Price", &[1.0, 10.0, 100.0, 1000.0])),
                PlotPanel::new("Value").with_line(PlotLine::new(
                    "PiCycle",
                    vec![None, Some(0.1), Some(0.5), Some(0.9)],
                )),
            ],
        );
        let fallback = PlotDescriptor::value_only(
            "2YMA",
            "2 Year Moving Average",
            &Series::new(index(), vec![None, None, Some(0.3), Some(0.3)]).unwrap(),
        );

        let svg = SvgChartRenderer::default().to_svg(&[price, fallback]).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 3);
        assert!(svg.contains("2 Year Moving Average (fallback)"));
    }

    #[test]
    fn test_gaps_split_lines() {
        let plot = PlotDescriptor::new(
            "X",
            "X",
            index(),
            vec![PlotPanel::new("Value").with_line(PlotLine::new(
                "X",
                vec![Some(0.1), Some(0.2), None, Some(0.4)],
            ))],
        );
        let svg = SvgChartRenderer::default().to_svg(&[plot]).unwrap();
        // 단일 점 구간은 그리지 않음
        assert_eq!(svg.matches("<polyline").count(), 1);
    }

    #[test]
    fn test_empty_plots_rejected() {
        assert!(SvgChartRenderer::default().to_svg(&[]).is_err());
    }
}
