//! Reading record batches and writing rendered output.
//!
//! Batches arrive as JSON or YAML sequences of mappings, or as CSV with a
//! header row (every cell read as a string). The `-` path reads stdin or
//! writes stdout.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::value::{Record, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Yaml,
    Csv,
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

/// Explicit format wins; otherwise by extension, defaulting to JSON.
pub fn resolve_input_format(path: &Path, provided: Option<InputFormat>) -> InputFormat {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            InputFormat::Yaml
        }
        Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
        _ => InputFormat::Json,
    })
}

fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if is_dash(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Opening input file {path:?}"))?,
        )))
    }
}

pub fn read_records(path: &Path, format: InputFormat) -> Result<Vec<Record>> {
    let reader = open_input(path)?;
    let records = match format {
        InputFormat::Json => serde_json::from_reader(reader)
            .with_context(|| format!("Parsing JSON records from {path:?}"))?,
        InputFormat::Yaml => serde_yaml::from_reader(reader)
            .with_context(|| format!("Parsing YAML records from {path:?}"))?,
        InputFormat::Csv => read_csv_records(reader)
            .with_context(|| format!("Parsing CSV records from {path:?}"))?,
    };
    Ok(records)
}

fn read_csv_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .double_quote(true)
        .flexible(false)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(key, cell)| (key.to_string(), Value::from(cell)))
                .collect(),
        );
    }
    Ok(records)
}

pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) if !is_dash(p) => Ok(Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        ))),
        _ => Ok(Box::new(io::stdout())),
    }
}
