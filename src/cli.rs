//! CLI definitions and entry point

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use patscan::output::{KindInfo, OutputMode, TokenListing, TokenRecord, VocabularyReport};
use patscan::scanner::{RuleId, Token, Tokenizer};
use patscan::vocabulary::Vocabulary;

/// patscan - Pattern-driven lexical scanner
#[derive(Parser, Debug)]
#[command(
    name = "patscan",
    version,
    about = "Pattern-driven lexical scanner",
    long_about = "Tokenize input with a vocabulary of regex and literal patterns.\n\n\
                  The longest match wins; equal-length matches go to the token declared first.\n\
                  Skip kinds (whitespace, comments) are consumed but not listed."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tokenize a file and list its tokens
    Tokenize {
        /// File to tokenize ("-" for stdin)
        file: PathBuf,

        /// Vocabulary file (TOML)
        #[arg(short = 't', long)]
        vocabulary: PathBuf,

        /// Only try these token kinds (skip kinds are always tried)
        #[arg(short, long, value_delimiter = ',')]
        kinds: Vec<String>,

        /// Also list skipped spans
        #[arg(short, long)]
        skipped: bool,
    },

    /// Validate a vocabulary file and list its kinds in priority order
    Check {
        /// Vocabulary file (TOML)
        vocabulary: PathBuf,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Command::Tokenize {
            file,
            vocabulary,
            kinds,
            skipped,
        } => tokenize(&file, &vocabulary, &kinds, skipped, output_mode),
        Command::Check { vocabulary } => check(&vocabulary, output_mode),
    }
}

fn load_vocabulary(path: &Path) -> anyhow::Result<Vocabulary> {
    Vocabulary::load(path).with_context(|| format!("failed to load vocabulary {}", path.display()))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).context("failed to read stdin");
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn tokenize(
    file: &Path,
    vocabulary: &Path,
    kinds: &[String],
    show_skipped: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let vocab = load_vocabulary(vocabulary)?;
    let kinds = vocab.ids(kinds)?;
    let input = read_input(file)?;

    let mut tokenizer = Tokenizer::with_input(vocab.table(), &input);
    let mut tokens = Vec::new();
    loop {
        // Locate before committing so the counters resume from the cursor
        let next = tokenizer.look_ahead(&kinds)?;
        let location = tokenizer.locate(next.start())?;
        let token = tokenizer.scan(&kinds)?;
        if tokenizer.is_stalled(&token) {
            anyhow::bail!("{} matched empty text at {location}", vocab.name(token.kind()));
        }
        let done = token.is_empty();
        tokens.push(record(&vocab, &token, location.line, location.column));
        if done {
            break;
        }
    }

    let skipped = if show_skipped {
        tokenizer
            .skipped_tokens()
            .iter()
            .map(|t| -> anyhow::Result<TokenRecord> {
                let location = tokenizer.locate(t.start())?;
                Ok(record(&vocab, t, location.line, location.column))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    } else {
        Vec::new()
    };

    let unrecognized = tokens.iter().filter(|t| t.kind == "UNDETERMINED" && t.start < t.end).count();
    let listing = TokenListing {
        source: file.display().to_string(),
        tokens,
        skipped,
        unrecognized,
    };
    listing.render(mode);

    if unrecognized > 0 {
        anyhow::bail!("{unrecognized} unrecognized character(s)");
    }
    Ok(())
}

fn record(vocab: &Vocabulary, token: &Token<'_, RuleId>, line: u32, column: u32) -> TokenRecord {
    TokenRecord {
        kind: vocab.name(token.kind()).to_string(),
        start: token.start(),
        end: token.end(),
        line,
        column,
        text: token.text().to_string(),
    }
}

fn check(vocabulary: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let vocab = load_vocabulary(vocabulary)?;
    let table = vocab.table();
    let kinds = table
        .patterns()
        .iter()
        .map(|p| KindInfo {
            priority: p.priority(),
            name: vocab.name(p.kind()).to_string(),
            skip: table.is_skip(p.kind()),
        })
        .collect();

    VocabularyReport {
        source: vocabulary.display().to_string(),
        kinds,
    }
    .render(mode);
    Ok(())
}
