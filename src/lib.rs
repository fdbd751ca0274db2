pub mod cli;
pub mod error;
pub mod frame;
pub mod io_utils;
pub mod mapper;
pub mod mapping;
pub mod model;
pub mod model_list;
pub mod registry;
pub mod schema;
pub mod schema_cmd;
pub mod table;
pub mod transform;
pub mod translate_cmd;
pub mod translator;
pub mod value;
pub mod vendors;

pub use error::Error;
pub use mapper::DataMapper;
pub use mapping::Mapping;
pub use model::{FieldSpec, Model, RecordType};
pub use model_list::ModelList;
pub use registry::SchemaRegistry;
pub use schema::InputSchema;
pub use transform::Transform;
pub use translator::{Diagnostic, Translation, Translator};
pub use value::{FieldType, Record, Value};

use std::{env, sync::OnceLock};

use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("net_model_translator", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Translate(args) => translate_cmd::execute(&args),
        Commands::Detect(args) => translate_cmd::detect(&args),
        Commands::Schemas(args) => schema_cmd::execute(&args),
    }
}
