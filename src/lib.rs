use plotters::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
pub mod plot;
pub mod realiterator;
pub mod spline;

use spline::CubicSpline;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const DEFAULT_REFERENCE_FILE: &str = "dip.dat";
pub const DEFAULT_OUTPUT_FILE: &str = "res.png";
pub const DEFAULT_STRIDE: usize = 8;
pub const DEFAULT_XS_TOKEN_INDEX: i64 = -1;

pub const ENERGY_LINE_OFFSET: usize = 1;
pub const XS_LINE_OFFSET: usize = 6;

pub const DENSE_STEP: f64 = 0.01;
pub const YAXIS_RANGE: (f64, f64) = (0.5, 7.0);
pub const CHART_TITLE: &str = "H";

/// The main struct for a cross-section series:
/// photon energies and the matching cross sections.
#[derive(Debug, Clone)]
pub struct EnergyXs {
    pub energy: Vec<f64>,
    pub xs: Vec<f64>,
}

impl EnergyXs {
    pub fn new(capacity: usize) -> EnergyXs {
        let energy: Vec<f64> = Vec::with_capacity(capacity);
        let xs: Vec<f64> = Vec::with_capacity(capacity);
        let series: EnergyXs = EnergyXs { energy, xs };
        series
    }

    /// Init an EnergyXs from a whitespace-delimited numeric table,
    /// taking column 0 as photon energy and column 2 as cross section.
    /// Blank lines and `#` comment lines are skipped, every other line
    /// must parse as a row of at least 3 numbers or the program aborts.
    pub fn from_table(fin: &Path) -> EnergyXs {
        let file = File::open(fin).unwrap();
        let buf = BufReader::new(file);
        let mut series = EnergyXs::new(100);
        for l in buf.lines() {
            let l_unwrap = l.unwrap();
            let l_trim = l_unwrap.trim();
            if l_trim.is_empty() || l_trim.starts_with('#') {
                continue;
            }
            let columns: Vec<f64> = l_trim
                .split_whitespace()
                .map(|w| w.parse().unwrap())
                .collect();
            if columns.len() < 3 {
                panic!("table row has {} columns, need at least 3", columns.len());
            }
            series.energy.push(columns[0]);
            series.xs.push(columns[2]);
        }
        series
    }

    /// Extracts one (energy, cross section) pair per complete block of
    /// `stride` lines: the energy is the last whitespace token of the line
    /// at offset 1, the cross section is the token at `xs_token_index`
    /// (negative counts from the end) of the line at offset 6.
    /// A trailing partial block is not indexed.
    pub fn from_lines(lines: &[String], stride: usize, xs_token_index: i64) -> EnergyXs {
        let mut series = EnergyXs::new(lines.len() / stride);
        for block in lines.chunks_exact(stride) {
            let words: Vec<&str> = block[ENERGY_LINE_OFFSET].split_whitespace().collect();
            series.energy.push(words.last().unwrap().parse().unwrap());
            let words: Vec<&str> = block[XS_LINE_OFFSET].split_whitespace().collect();
            series
                .xs
                .push(token_at(&words, xs_token_index).parse().unwrap());
        }
        series
    }

    /// Reads an input file into memory and extracts its series.
    /// With `strict` set, a line count that is not a multiple of the stride
    /// is an error instead of a silent truncation.
    pub fn from_blocks(fin: &Path, stride: usize, xs_token_index: i64, strict: bool) -> EnergyXs {
        let file = File::open(fin).unwrap();
        let buf = BufReader::new(file);
        let lines: Vec<String> = buf.lines().map(|l| l.unwrap()).collect();
        if strict && lines.len() % stride != 0 {
            panic!(
                "{}: {} lines is not a multiple of the stride {}",
                fin.to_str().unwrap(),
                lines.len(),
                stride
            );
        }
        EnergyXs::from_lines(&lines, stride, xs_token_index)
    }

    /// Natural cubic spline through the series knots;
    /// panics on unequal lengths or non-increasing energies.
    pub fn spline(&self) -> CubicSpline {
        CubicSpline::new(self.energy.clone(), self.xs.clone()).unwrap()
    }

    /// Densely sampled spline curve for drawing, stepping DENSE_STEP over
    /// [first energy, last energy).
    pub fn dense_curve(&self) -> Vec<(f64, f64)> {
        self.spline().dense_sample(DENSE_STEP)
    }
}

impl std::fmt::Display for EnergyXs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "energy, cross_section\n")?;
        for (e, x) in self.energy.iter().zip(self.xs.iter()) {
            write!(f, "{},{}\n", e, x)?
        }
        Ok(())
    }
}

/// Resolves a token index on a split line;
/// negative values count from the end, -1 being the last token.
pub fn token_at<'a>(words: &[&'a str], index: i64) -> &'a str {
    let i = if index < 0 {
        words.len() as i64 + index
    } else {
        index
    };
    assert!(
        0 <= i && (i as usize) < words.len(),
        "token index {} out of range for line with {} tokens",
        index,
        words.len()
    );
    words[i as usize]
}

/// Overlays the reference series and the input series on one chart:
/// raw data as circle markers, spline curves as lines.
/// The x range is pinned to the reference energies, the y range is fixed,
/// and the finished chart is written to fout (format from the extension).
pub fn plot_overlay(
    reference: &EnergyXs,
    inputs: &[(String, EnergyXs)],
    fout: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let xmin = *reference.energy.first().unwrap();
    let xmax = *reference.energy.last().unwrap();
    let (ymin, ymax) = YAXIS_RANGE;
    let root = BitMapBackend::new(fout, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(CHART_TITLE, ("sans-serif", 32))
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
    chart
        .configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
        .set_all_tick_mark_size(2)
        .label_style(("sans-serif", 20))
        .x_desc("photon energy")
        .y_desc("cross section")
        .draw()?;

    let mut series_list: Vec<(&str, &EnergyXs)> = vec![("numerical", reference)];
    for (label, series) in inputs {
        series_list.push((label.as_str(), series));
    }
    // markers and curve take separate palette slots, as in the usual
    // plotting color cycle
    for (i, (label, series)) in series_list.into_iter().enumerate() {
        let point_color = Palette99::pick(2 * i).to_rgba();
        let curve_color = Palette99::pick(2 * i + 1).to_rgba();
        chart
            .draw_series(
                series
                    .energy
                    .iter()
                    .zip(series.xs.iter())
                    .map(|(&x, &y)| Circle::new((x, y), 3, point_color.filled())),
            )?
            .label(label)
            .legend(move |(x, y)| Circle::new((x, y), 3, point_color.filled()));
        chart.draw_series(LineSeries::new(series.dense_curve(), &curve_color))?;
    }
    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;
    root.present()?;
    Ok(())
}
