//! Chart export utility.
//!
//! Writes the compiled-in SCORE2/SCORE2-OP charts as a JSON chart file that
//! `VITALSCORE_TABLES` can load, and prints its SHA-256 for
//! `VITALSCORE_TABLES_SHA256`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin export_tables -- --out charts.json [--version <label>]
//! ```
//!
//! `--version` relabels the exported set, e.g. before editing values for a
//! local chart revision.

use std::env;
use std::fs;
use std::path::PathBuf;

use vitalscore::adapters::digest::{canonical_json, sha256_hex_bytes};
use vitalscore::adapters::score2_tables::build_official_tables;
use vitalscore::domain::{Regime, TableSet};

fn usage() -> String {
    "Usage: export_tables --out <path> [--version <label>]".to_string()
}

fn parse_args() -> Result<(PathBuf, Option<String>), String> {
    let mut args = env::args().skip(1);
    let mut out: Option<PathBuf> = None;
    let mut version: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out = Some(PathBuf::from(args.next().ok_or_else(usage)?)),
            "--version" => {
                let v = args.next().ok_or_else(usage)?;
                if v.trim().is_empty() {
                    return Err("--version must not be blank".to_string());
                }
                version = Some(v);
            }
            _ => return Err(usage()),
        }
    }

    Ok((out.ok_or_else(usage)?, version))
}

fn main() -> Result<(), String> {
    let (out, version) = parse_args()?;

    let tables = build_official_tables().map_err(|e| format!("Embedded charts invalid: {e}"))?;
    let tables = match version {
        Some(label) => TableSet::new(
            label,
            tables.region(),
            tables.table(Regime::Standard).clone(),
            tables.table(Regime::Elderly).clone(),
        )
        .map_err(|e| e.to_string())?,
        None => tables,
    };

    let bytes = canonical_json(&tables).map_err(|e| e.to_string())?;
    fs::write(&out, &bytes).map_err(|e| format!("Failed to write {out:?}: {e}"))?;

    println!("Wrote charts: {out:?} (version {})", tables.version());
    println!("VITALSCORE_TABLES_SHA256={}", sha256_hex_bytes(&bytes));
    Ok(())
}
