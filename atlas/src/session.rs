//! Line-driven map session: the CLI stand-in for clicking on the map canvas.
//!
//! Each input line is one pointer event; each event prints one JSON line with
//! the outcome, the zoom state and the markers that are now visible.

use anyhow::{anyhow, Result};
use atlas_core::Company;
use company_sqlite::Db;
use map_engine::{ClickOutcome, MapEngine};
use std::io::{BufRead, Write};
use tracing::debug;

#[derive(Debug, PartialEq)]
enum Event {
    Click(f64, f64),
    DoubleClick(f64, f64),
    Reset,
    Show,
    Refresh,
    Quit,
}

fn parse_event(line: &str) -> Result<Event> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or_default().to_ascii_lowercase();
    let mut coord = || -> Result<(f64, f64)> {
        let x = parts.next().ok_or_else(|| anyhow!("{cmd} needs X Y"))?;
        let y = parts.next().ok_or_else(|| anyhow!("{cmd} needs X Y"))?;
        Ok((x.parse()?, y.parse()?))
    };
    Ok(match cmd.as_str() {
        "click" => {
            let (x, y) = coord()?;
            Event::Click(x, y)
        }
        "dblclick" | "double-click" => {
            let (x, y) = coord()?;
            Event::DoubleClick(x, y)
        }
        "reset" => Event::Reset,
        "show" => Event::Show,
        "refresh" => Event::Refresh,
        "quit" | "exit" => Event::Quit,
        other => return Err(anyhow!("unknown command: {other}")),
    })
}

fn snapshot(engine: &MapEngine, outcome: Option<&ClickOutcome>, selected: Option<&Company>) -> serde_json::Value {
    serde_json::json!({
        "outcome": outcome,
        "selected": selected,
        "zoom": engine.zoom(),
        "title": engine.title(),
        "bounds": engine.visible_bounds(),
        "visible": engine.visible_markers(),
    })
}

pub fn run(db: &Db, engine: &mut MapEngine, input: impl BufRead, mut out: impl Write) -> Result<()> {
    engine.set_companies(&db.list_all()?);
    writeln!(out, "{}", serde_json::to_string(&snapshot(engine, None, None))?)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = match parse_event(line) {
            Ok(e) => e,
            Err(e) => {
                writeln!(out, "{}", serde_json::json!({ "error": e.to_string() }))?;
                continue;
            }
        };
        debug!(?event, "map event");
        let outcome = match event {
            Event::Click(x, y) => Some(engine.click(x, y)),
            Event::DoubleClick(x, y) => Some(engine.double_click(x, y)),
            Event::Reset => Some(engine.reset()),
            Event::Show => None,
            Event::Refresh => {
                engine.set_companies(&db.list_all()?);
                None
            }
            Event::Quit => break,
        };
        let selected = match &outcome {
            Some(ClickOutcome::Selected { id }) => db.get(*id)?,
            _ => None,
        };
        let snap = snapshot(engine, outcome.as_ref(), selected.as_ref());
        writeln!(out, "{}", serde_json::to_string(&snap)?)?;
    }
    Ok(())
}
