use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use verbo_config::data::DataConfig;
use verbo_config::log::LogConfig;
use verbo_core::ConjugationEngine;
use verbo_lang_spanish::SpanishLoader;

pub mod commands;
pub mod drill;
pub mod profile;

#[derive(Parser)]
#[command(name = "verbo", about = "Spanish verb conjugation and drills")]
struct Cli {
    /// Config file (defaults to ./verbo.json, then environment)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding verbs.json, conjugations.json and patterns.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Conjugate a verb; every person unless --person is given
    Conjugate {
        infinitive: String,
        #[arg(default_value = "presente")]
        tense: String,
        #[arg(long)]
        person: Option<String>,
    },

    /// Print the paradigm for one tense as a table
    Table { infinitive: String, tense: String },

    /// Check an answer
    Check {
        infinitive: String,
        tense: String,
        person: String,
        answer: String,
    },

    /// Multiple-choice drill
    Drill {
        /// quick, exam or custom
        #[arg(long, default_value = "custom")]
        mode: String,
        /// Question count for custom mode
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Comma-joined tags; any one qualifies a verb
        #[arg(long)]
        tags: Option<String>,
    },

    /// List tenses with their explanations
    Tenses,

    /// Find verbs by English meaning
    Search { english: String },

    /// Check the loaded tables for authoring problems
    Audit,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = profile::load_config(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data.content_dir = Some(dir.display().to_string());
    }

    init_tracing(&config.log);

    if matches!(cli.command, Command::Audit) {
        return commands::audit(&config.data, cli.json);
    }

    let engine = load_engine(&config.data)?;
    commands::run(cli.command, &engine, &config, cli.json)
}

fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

pub fn loader(data: &DataConfig) -> anyhow::Result<SpanishLoader> {
    let loader = SpanishLoader::assemble(
        data.content_dir.as_deref().map(Path::new),
        data.additional_override_paths.as_slice(),
    )?;
    Ok(loader)
}

fn load_engine(data: &DataConfig) -> anyhow::Result<ConjugationEngine> {
    let engine = loader(data)?.finish()?;
    tracing::info!("Engine ready with {} verbs", engine.lexicon().len());
    Ok(engine)
}
