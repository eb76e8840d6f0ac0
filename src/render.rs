//! Text rendering of simulation input and output.
//!
//! Provides the plain listings shown next to a simulation run and a text
//! Gantt chart: one labeled bar per slice on a shared time axis, with a
//! glyph per distinct process name.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::models::{ExecutionTimeline, ProcessId, ProcessSet};

/// Number of distinct glyphs before they repeat.
pub const PALETTE_SIZE: usize = 20;

const GLYPHS: [char; PALETTE_SIZE] = [
    '#', '=', '*', '+', '%', '@', 'o', 'x', '~', '&', '$', 's', 'v', '^', 'w', 'z', '8', '0', 'X',
    'O',
];

/// Spacing of numbered ticks on the time axis, in columns.
const TICK_SPACING: usize = 5;

/// Widest bar area [`GanttChart::render`] produces. Longer timelines are
/// drawn with several time units per column.
pub const MAX_COLUMNS: i64 = 120;

/// One line per process: `Process: P1, Arrival: 0, Burst: 5`.
pub fn input_listing(processes: &ProcessSet) -> String {
    let mut out = String::new();
    for p in processes {
        let _ = writeln!(
            out,
            "Process: {}, Arrival: {}, Burst: {}",
            p.name(),
            p.arrival_time(),
            p.burst_time()
        );
    }
    out
}

/// One line per slice: `Process: P1, Start: 0, End: 5`.
pub fn execution_listing(timeline: &ExecutionTimeline) -> String {
    let mut out = String::new();
    for s in timeline.slices() {
        let _ = writeln!(
            out,
            "Process: {}, Start: {}, End: {}",
            s.process_name, s.start_time, s.end_time
        );
    }
    out
}

/// A bar of the Gantt chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttBar {
    /// Process label.
    pub label: String,
    /// Process index in its set.
    pub process_id: ProcessId,
    /// Bar start on the time axis.
    pub start: i64,
    /// Bar end on the time axis.
    pub end: i64,
    /// Palette index, shared by every bar with the same label.
    pub color: usize,
}

/// Gantt chart layout for a timeline.
///
/// Bars keep dispatch order, one row each. Colors are assigned per
/// distinct name in first-appearance order and cycle after
/// [`PALETTE_SIZE`] names.
///
/// # Example
/// ```
/// use u_cpusim::algorithms::{Fifo, SchedulingAlgorithm};
/// use u_cpusim::models::ProcessSet;
/// use u_cpusim::render::GanttChart;
///
/// let set = ProcessSet::from_tuples(&[("P1", 0, 2), ("P2", 0, 1)]).unwrap();
/// let chart = GanttChart::from_timeline(&Fifo.schedule(&set));
/// assert_eq!(chart.bars().len(), 2);
/// assert_eq!(chart.axis_end(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttChart {
    title: String,
    bars: Vec<GanttBar>,
    axis_end: i64,
}

impl GanttChart {
    /// Lays out a chart for `timeline`.
    pub fn from_timeline(timeline: &ExecutionTimeline) -> Self {
        let mut colors: HashMap<&str, usize> = HashMap::new();
        let bars = timeline
            .slices()
            .iter()
            .map(|s| {
                let next = colors.len();
                let color = *colors.entry(s.process_name.as_str()).or_insert(next) % PALETTE_SIZE;
                GanttBar {
                    label: s.process_name.clone(),
                    process_id: s.process_id,
                    start: s.start_time,
                    end: s.end_time,
                    color,
                }
            })
            .collect();

        Self {
            title: format!("Gantt Chart ({})", timeline.algorithm()),
            bars,
            axis_end: timeline.makespan(),
        }
    }

    /// Chart title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Bars in dispatch order.
    pub fn bars(&self) -> &[GanttBar] {
        &self.bars
    }

    /// Right end of the shared time axis.
    pub fn axis_end(&self) -> i64 {
        self.axis_end
    }

    /// Distinct labels with their palette index, in first-appearance order.
    pub fn legend(&self) -> Vec<(&str, usize)> {
        let mut legend: Vec<(&str, usize)> = Vec::new();
        for bar in &self.bars {
            if !legend.iter().any(|(label, _)| *label == bar.label) {
                legend.push((bar.label.as_str(), bar.color));
            }
        }
        legend
    }

    /// Glyph drawn for a palette index.
    pub fn glyph(color: usize) -> char {
        GLYPHS[color % PALETTE_SIZE]
    }

    /// Time units drawn per column (1 unless the axis exceeds
    /// [`MAX_COLUMNS`]).
    pub fn units_per_column(&self) -> i64 {
        if self.axis_end <= MAX_COLUMNS {
            1
        } else {
            self.axis_end / MAX_COLUMNS + i64::from(self.axis_end % MAX_COLUMNS != 0)
        }
    }

    /// Renders the chart as text.
    ///
    /// One column per time unit up to [`MAX_COLUMNS`] units; beyond that
    /// each column covers [`units_per_column`](Self::units_per_column)
    /// units and is filled when a bar overlaps any part of it.
    pub fn render(&self) -> String {
        let width = self.bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
        let scale = self.units_per_column();
        let axis_end = self.axis_end.max(0);
        let columns = axis_end / scale + i64::from(axis_end % scale != 0);
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.title);
        for bar in &self.bars {
            let glyph = Self::glyph(bar.color);
            let row: String = (0..columns)
                .map(|c| {
                    let from = c.saturating_mul(scale);
                    let to = (c + 1).saturating_mul(scale);
                    if bar.start < to && from < bar.end {
                        glyph
                    } else {
                        ' '
                    }
                })
                .collect();
            let _ = writeln!(out, "{:<width$} |{row}|", bar.label);
        }

        let columns = usize::try_from(columns).unwrap_or(0);
        let mut ticks = vec![' '; columns + 1];
        for at in (0..=columns).step_by(TICK_SPACING) {
            let label = (at as i64).saturating_mul(scale).to_string();
            for (offset, ch) in label.chars().enumerate() {
                if at + offset >= ticks.len() {
                    ticks.push(ch);
                } else {
                    ticks[at + offset] = ch;
                }
            }
        }
        let ticks: String = ticks.into_iter().collect();
        let _ = writeln!(out, "{:width$}  {}", "", ticks.trim_end());

        out
    }
}

impl fmt::Display for GanttChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
