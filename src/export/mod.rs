// src/export/mod.rs

//! CSV export of probability curves.
//!
//! Format: a header line `x,e,mu,tau`, then one row per sample,
//! `x,P_e,P_mu,P_tau`, with `x = i · (x_final / len)`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::core::Result;
use crate::simulation::ProbabilityCurve;

/// File name used when none is configured.
pub const DEFAULT_FILENAME: &str = "nu.csv";

/// Header line of the export format.
pub const HEADER: &str = "x,e,mu,tau";

/// Writes `curve` in CSV form to any writer.
pub fn write_csv<W: Write>(curve: &ProbabilityCurve, mut out: W) -> std::io::Result<()> {
    writeln!(out, "{}", HEADER)?;
    for (i, p) in curve.points().iter().enumerate() {
        writeln!(out, "{},{},{},{}", curve.x_at(i), p[0], p[1], p[2])?;
    }
    out.flush()
}

/// Writes `curve` to the file at `path`, creating or truncating it.
///
/// Failure to create or write the file is logged and returned as
/// `NeutoscError::Io`; nothing is partially reported as success.
pub fn export_csv(curve: &ProbabilityCurve, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "couldn't create export file");
        e
    })?;
    write_csv(curve, BufWriter::new(file)).map_err(|e| {
        error!(path = %path.display(), error = %e, "failed writing export file");
        e
    })?;
    info!(path = %path.display(), rows = curve.len(), "saved probability curve");
    Ok(path.to_path_buf())
}
