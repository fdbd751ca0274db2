use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use log::info;

use crate::{
    cli::{DetectArgs, OutputFormat, TranslateArgs},
    io_utils,
    model_list::ModelList,
    registry::SchemaRegistry,
    translator::Translator,
    value::Record,
};

pub fn execute(args: &TranslateArgs) -> Result<()> {
    let records = read_batch(&args.input, args.input_format)?;
    let registry = load_registry(&args.definitions)?;

    let mut builder = Translator::builder(&args.record_type)
        .registry(&registry)
        .raw_data(records);
    if let Some(name) = &args.schema {
        builder = builder.schema_name(name);
    }
    let translator = builder
        .build()
        .with_context(|| format!("Preparing translation into '{}'", args.record_type))?;

    let report = translator.translate_report(None)?;
    if args.strict {
        if let Some(first) = report.diagnostics.first() {
            bail!(
                "{} record(s) failed translation; first failure at {first}",
                report.dropped()
            );
        }
    }

    let rendered = render(&report.models, args.format)?;
    let mut output = io_utils::open_output(args.output.as_deref())?;
    output
        .write_all(rendered.as_bytes())
        .and_then(|_| output.flush())
        .with_context(|| "Writing translated models".to_string())?;

    info!(
        "Translated {} record(s) into '{}' ({} dropped)",
        report.accepted(),
        args.record_type,
        report.dropped()
    );
    Ok(())
}

pub fn detect(args: &DetectArgs) -> Result<()> {
    let records = read_batch(&args.input, args.input_format)?;
    let registry = load_registry(&args.definitions)?;
    let translator = Translator::builder(&args.record_type)
        .registry(&registry)
        .raw_data(records)
        .build()?;
    let schema = translator.input_schema();
    println!("{}", schema.display_name());
    info!(
        "Detected schema {} (priority {}) for '{}'",
        schema.display_name(),
        schema.priority(),
        args.record_type
    );
    Ok(())
}

pub(crate) fn load_registry(definitions: &[PathBuf]) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::with_builtins();
    for path in definitions {
        registry
            .load_definitions(path)
            .with_context(|| format!("Loading schema definitions from {path:?}"))?;
        info!("Loaded schema definitions from {path:?}");
    }
    Ok(registry)
}

fn read_batch(path: &Path, provided: Option<io_utils::InputFormat>) -> Result<Vec<Record>> {
    let format = io_utils::resolve_input_format(path, provided);
    let records = io_utils::read_records(path, format)?;
    info!("Read {} record(s) from {path:?} as {format:?}", records.len());
    Ok(records)
}

fn render(models: &ModelList, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Table => format!("{}\n", models.to_table()),
        OutputFormat::Json => format!("{}\n", models.to_json()?),
        OutputFormat::Yaml => models.to_yaml()?,
        OutputFormat::Csv => models.to_frame().to_csv()?,
    };
    Ok(rendered)
}
