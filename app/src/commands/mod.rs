//! Implementations of the `lumen` subcommands.
//!
//! Every command writes to the `out` writer it is given, either as text or
//! as pretty JSON, and returns its report so callers and tests can inspect
//! it without parsing output.

use crate::error::AppResult;
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;

pub mod a11y;
pub mod theme;

pub use a11y::{check_colors, navigate, profile, NavigationReport, NavigationStep, ProfileReport};
pub use theme::{ThemeReport, ThemeSession, ThemeSource};

/// Write `report` as pretty JSON or through its `Display` impl.
pub fn write_report<T>(out: &mut dyn Write, json: bool, report: &T) -> AppResult<()>
where
    T: Serialize + Display,
{
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else {
        write!(out, "{report}")?;
    }
    Ok(())
}
