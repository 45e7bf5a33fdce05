//! the args for running cxc

use cx_cli_common::LoggingArgs;
use cxc::TypeAlias;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Translates cx source into c")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// The source file to translate
    #[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,
    /// Write the translated program here instead of to stdout
    #[clap(short = 'o', long = "output", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Print the parsed syntax tree as json
    #[clap(long)]
    pub dump_ast: bool,
    /// Print every scanned token
    #[clap(long)]
    pub dump_tokens: bool,
    /// Stop after semantic analysis, without writing the program
    #[clap(long)]
    pub check: bool,
    /// Write type aliases as the c keywords they stand for
    #[clap(long)]
    pub translate_types: bool,
    /// Add or replace a type alias.
    ///
    /// Can be used multiple times.
    #[clap(long = "type-alias", value_name = "ALIAS=KEYWORD")]
    pub type_aliases: Vec<TypeAlias>,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}
