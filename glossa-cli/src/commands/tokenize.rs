//! `glossa-tokenize`: tokenize sentences with the tokenizer bound to a
//! language

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glossa_core::{
    embedded_table, load_table_file, Capabilities, RoutingTable, TokenizerBinding,
};

use crate::input::open_input;
use crate::logging::LoggingArgs;
use crate::output::open_output;

/// Tokenize one sentence per line for a language
#[derive(Debug, Parser)]
#[command(name = "glossa-tokenize", version, about)]
pub struct TokenizeArgs {
    /// Language code (e.g. en, nb, zh-Hant)
    #[arg(value_name = "LANG", required_unless_present = "list")]
    pub lang: Option<String>,

    /// Input sentences (default: stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output tokens, space-separated (default: stdout)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Routing table replacing the built-in one
    #[arg(long, value_name = "FILE", env = "GLOSSA_ROUTING")]
    pub routing: Option<PathBuf>,

    /// Print every known language with its tokenizer and warnings
    #[arg(long)]
    pub list: bool,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl TokenizeArgs {
    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        self.logging.init()?;

        let custom;
        let (table, capabilities) = match &self.routing {
            Some(path) => {
                let table = load_table_file(path)
                    .with_context(|| format!("Failed to load routing table: {}", path.display()))?;
                let capabilities = Capabilities::probe(&table);
                custom = (table, capabilities);
                (&custom.0, &custom.1)
            }
            None => (
                embedded_table().context("Built-in routing table is invalid")?,
                Capabilities::embedded(),
            ),
        };

        let writer = open_output(self.output.as_deref())?;
        if self.list {
            return list_languages(table, capabilities, writer);
        }

        let lang = self.lang.as_deref().unwrap_or_default();
        let binding = TokenizerBinding::new(lang, table, capabilities);
        log::info!(
            "Tokenizer for '{}': {} {:?}",
            binding.language(),
            binding.backend_id(),
            binding.warning_codes()
        );

        let reader = open_input(self.input.as_deref())?;
        tokenize_lines(&binding, reader, writer)
    }
}

/// One output line per input line, tokens joined by single spaces
pub fn tokenize_lines<R: BufRead, W: Write>(
    binding: &TokenizerBinding,
    mut reader: R,
    mut writer: W,
) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let tokens = binding.tokenize(line.trim_end_matches(['\r', '\n']));
        writeln!(writer, "{}", tokens.join(" "))?;
    }
    writer.flush()?;
    Ok(())
}

fn list_languages<W: Write>(
    table: &RoutingTable,
    capabilities: &Capabilities,
    mut writer: W,
) -> Result<()> {
    for code in table.known_languages() {
        let selection = TokenizerBinding::select(code, table, capabilities);
        let codes: Vec<String> = selection.warnings.iter().map(|w| w.code()).collect();
        writeln!(writer, "{}\t{}\t{}", code, selection.backend_id, codes.join(","))?;
    }
    writer.flush()?;
    Ok(())
}
