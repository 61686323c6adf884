//! Utilitário de terminal para curadoria do dataset NLU (frases, sentimentos e personagens)

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dataset_core::{
    assembler::{create_document, splice_document, InvalidEntryPolicy, SessionConfig, SessionReport},
    document::DatasetDocument,
    error::DatasetError,
    input::{LineSource, PromptedLines},
    summary::{distinct_characters, summarize},
    synonyms::{read_synonyms, write_synonym_section, SynonymReport},
    text::{to_lower, to_upper},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "nlu-dataset",
    version,
    about = "Build rasa_nlu training data from hand-labelled phrases. Without a subcommand, asks which mode to run."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Discard an invalid phrase and keep prompting instead of aborting the session
    #[arg(long, global = true)]
    skip_invalid: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new document (replaces the file if it exists)
    New {
        #[arg(env = "NLU_DATASET_FILE")]
        file: PathBuf,
    },
    /// Append examples to a document created earlier
    Append {
        #[arg(env = "NLU_DATASET_FILE")]
        file: PathBuf,
    },
    /// Rewrite the entity synonym section
    Synonyms {
        #[arg(env = "NLU_DATASET_FILE")]
        file: PathBuf,
        /// Canonical character name (repeatable)
        #[arg(long = "character", value_name = "NAME")]
        characters: Vec<String>,
        /// File with one canonical character name per line
        #[arg(long, value_name = "PATH")]
        characters_file: Option<PathBuf>,
    },
    /// Print counts of examples, sentiments and character mentions
    Summary {
        #[arg(env = "NLU_DATASET_FILE")]
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Logs vão para stderr; stdout fica com os prompts
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SessionConfig {
        on_invalid_entry: if cli.skip_invalid {
            InvalidEntryPolicy::Skip
        } else {
            InvalidEntryPolicy::Abort
        },
    };

    let stdin = io::stdin();
    let mut input = PromptedLines::new(stdin.lock(), io::stdout());

    match cli.command {
        Some(Command::New { file }) => print_session(create_document(&file, &mut input, &config)?),
        Some(Command::Append { file }) => print_session(splice_document(&file, &mut input, &config)?),
        Some(Command::Synonyms {
            file,
            characters,
            characters_file,
        }) => {
            let mut names = characters;
            if let Some(path) = characters_file {
                names.extend(read_names_file(&path)?);
            }
            print_synonyms(run_synonyms(&file, names, &mut input)?)
        }
        Some(Command::Summary { file, json }) => run_summary(&file, json)?,
        None => run_menu(&mut input, &config)?,
    }
    Ok(())
}

/// Menu interativo: escolhe o modo pelo número e depois pede o caminho do arquivo.
fn run_menu<S: LineSource>(input: &mut S, config: &SessionConfig) -> Result<()> {
    let selection = input.read_line(
        "Would you like to make a new file or add on to an existing one?\n\
         1. New File\n\
         2. Existing File\n\
         3. Entity Synonyms",
        "a mode number",
    )?;
    let mode: i64 = selection
        .trim()
        .parse()
        .map_err(|_| DatasetError::MalformedNumericInput { input: selection.clone() })?;

    let file = PathBuf::from(input.read_line("\nEnter relative file path", "a file path")?);

    match mode {
        1 => print_session(create_document(&file, input, config)?),
        2 => print_session(splice_document(&file, input, config)?),
        3 => {
            let mut names = Vec::new();
            loop {
                let name = input.read_line("Enter a character name, or an empty line to finish", "a character name")?;
                if name.is_empty() {
                    break;
                }
                names.push(name);
            }
            print_synonyms(run_synonyms(&file, names, input)?)
        }
        other => return Err(DatasetError::InvalidModeSelection(other).into()),
    }
    Ok(())
}

/// Nomes canônicos de um arquivo, um por linha; linhas em branco são ignoradas.
fn read_names_file(path: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(path).map_err(|source| DatasetError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut names = Vec::new();
    for line in io::BufReader::new(file).lines() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Nomes em maiúsculas e sinônimos em minúsculas, alinhados com os `value` dos spans.
/// Sem nomes, usa os personagens já anotados no documento.
fn run_synonyms<S: LineSource>(file: &Path, names: Vec<String>, input: &mut S) -> Result<SynonymReport> {
    let mut names: Vec<String> = names.iter().map(|n| to_upper(n)).collect();
    if names.is_empty() {
        names = distinct_characters(&DatasetDocument::load(file)?);
        info!(count = names.len(), "no names given, using characters found in examples");
    }

    let report = write_synonym_section(file, &names[..], |name| {
        Ok(read_synonyms(input, name)?.iter().map(|s| to_lower(s)).collect())
    })?;
    Ok(report)
}

fn run_summary(file: &Path, json: bool) -> Result<()> {
    let summary = summarize(&DatasetDocument::load(file)?);
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
    } else {
        write!(out, "{summary}")?;
    }
    Ok(())
}

fn print_session(report: SessionReport) {
    println!(
        "\n{}: {} example(s) added, {} skipped, {} total",
        report.path.display(),
        report.added,
        report.skipped,
        report.total_examples
    );
}

fn print_synonyms(report: SynonymReport) {
    println!(
        "\n{}: {} synonym record(s), {} synonym(s)",
        report.path.display(),
        report.records,
        report.synonyms
    );
}
