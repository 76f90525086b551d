//! Headless renderer: writes snapshots as text rows instead of drawing them.

use std::io::Write;

use clap::ValueEnum;
use df_sim::{Motion, Renderer, Snapshot, Stepper, TrackView};
use serde::Serialize;

use crate::error::CliError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Csv,
    Jsonl,
}

/// When the headless loop should stop.
#[derive(Clone, Copy, Debug)]
pub struct StopRule {
    pub max_frames: u64,
    pub until_settled: bool,
}

#[derive(Serialize)]
struct TrackRow {
    stepper: &'static str,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    settled: bool,
    points: usize,
}

impl From<&TrackView<'_>> for TrackRow {
    fn from(view: &TrackView<'_>) -> Self {
        Self {
            stepper: view.stepper.label(),
            x: view.state[0],
            y: view.state[1],
            vx: view.state[2],
            vy: view.state[3],
            settled: view.motion == Motion::Settled,
            points: view.trajectory.len(),
        }
    }
}

#[derive(Serialize)]
struct FrameRow {
    step: u64,
    t: f64,
    divergence: f64,
    tracks: [TrackRow; 2],
}

impl From<&Snapshot<'_>> for FrameRow {
    fn from(snap: &Snapshot<'_>) -> Self {
        Self {
            step: snap.step,
            t: snap.sim_time,
            divergence: snap.divergence_total,
            tracks: [(&snap.primary).into(), (&snap.secondary).into()],
        }
    }
}

pub struct TextRenderer<W: Write> {
    out: W,
    format: Format,
    every: u64,
    rule: StopRule,
    frames: u64,
    settled: bool,
    header_written: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, format: Format, every: u64, rule: StopRule) -> Self {
        Self {
            out,
            format,
            every: every.max(1),
            rule,
            frames: 0,
            settled: false,
            header_written: false,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn finish(mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    fn write_header(&mut self, snap: &Snapshot<'_>) -> std::io::Result<()> {
        let a = snap.primary.stepper.label();
        let b = snap.secondary.stepper.label();
        match self.format {
            Format::Table => writeln!(
                self.out,
                "{:>7} {:>8} | {:>10} {:>10} {:>3} | {:>10} {:>10} {:>3} | {:>12}",
                "step", "t [s]", format!("{a} x"), format!("{a} y"), "", format!("{b} x"),
                format!("{b} y"), "", "divergence"
            ),
            Format::Csv => writeln!(
                self.out,
                "step,t,{a}_x,{a}_y,{a}_vx,{a}_vy,{a}_settled,{b}_x,{b}_y,{b}_vx,{b}_vy,{b}_settled,divergence"
            ),
            Format::Jsonl => Ok(()),
        }
    }

    fn write_row(&mut self, snap: &Snapshot<'_>) -> Result<(), CliError> {
        let row = FrameRow::from(snap);
        match self.format {
            Format::Table => {
                let [a, b] = &row.tracks;
                writeln!(
                    self.out,
                    "{:>7} {:>8.3} | {:>10.3} {:>10.3} {:>3} | {:>10.3} {:>10.3} {:>3} | {:>12.6e}",
                    row.step,
                    row.t,
                    a.x,
                    a.y,
                    if a.settled { "S" } else { "" },
                    b.x,
                    b.y,
                    if b.settled { "S" } else { "" },
                    row.divergence
                )?;
            }
            Format::Csv => {
                let [a, b] = &row.tracks;
                writeln!(
                    self.out,
                    "{},{},{},{},{},{},{},{},{},{},{},{},{}",
                    row.step,
                    row.t,
                    a.x,
                    a.y,
                    a.vx,
                    a.vy,
                    a.settled,
                    b.x,
                    b.y,
                    b.vx,
                    b.vy,
                    b.settled,
                    row.divergence
                )?;
            }
            Format::Jsonl => {
                serde_json::to_writer(&mut self.out, &row)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = CliError;

    fn stop_requested(&mut self) -> bool {
        self.frames >= self.rule.max_frames || (self.rule.until_settled && self.settled)
    }

    fn present(&mut self, snapshot: &Snapshot<'_>) -> Result<(), Self::Error> {
        if !self.header_written {
            self.write_header(snapshot)?;
            self.header_written = true;
        }
        self.frames += 1;
        let newly_settled = snapshot.all_settled() && !self.settled;
        self.settled = snapshot.all_settled();
        // always keep the frame where motion stops
        if self.frames % self.every == 0 || newly_settled {
            self.write_row(snapshot)?;
        }
        Ok(())
    }
}
