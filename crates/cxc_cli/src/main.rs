use crate::args::Args;
use clap::Parser;
use cxc::{Compilation, CompileError, Compiler};
use eyre::WrapErr;
use owo_colors::{OwoColorize, Stream};
use std::fs;
use std::process::ExitCode;
use tracing::metadata::LevelFilter;
use tracing::{debug, trace};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

mod args;

/// Input file could not be read
const EXIT_NO_INPUT: u8 = 66;
/// Input file could not be scanned
const EXIT_DATA_ERR: u8 = 65;
/// Some diagnostic was reported, or parsing was aborted
const EXIT_DIAGNOSTICS: u8 = 1;

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting cxc with args: {args:?}");
    debug!("cxc version: {}", env!("CARGO_PKG_VERSION"));

    let compiler = Compiler::builder()
        .type_aliases(args.type_aliases.iter().cloned())
        .translate_type_aliases(args.translate_types)
        .dump_tokens(args.dump_tokens)
        .dump_ast(args.dump_ast)
        .emit(!args.check)
        .build();

    let compilation = match compiler.compile_path(&args.file) {
        Ok(compilation) => compilation,
        Err(error) => {
            report(&error);
            return Ok(ExitCode::from(exit_code(&error)));
        }
    };

    if let Some(tokens) = &compilation.tokens {
        println!("{tokens}");
    }
    if let Some(ast) = &compilation.ast {
        println!("{ast:#}");
    }
    for diagnostic in &compilation.diagnostics {
        eprintln!("{diagnostic}");
    }

    if let Some(output) = &compilation.output {
        match &args.output {
            Some(path) => {
                fs::write(path, output)
                    .wrap_err_with(|| format!("could not write {}", path.display()))?;
                debug!("wrote translation to {}", path.display());
            }
            None => print!("{output}"),
        }
    }

    debug!(
        "finished with {} diagnostic(s), aborted: {}",
        compilation.diagnostics.len(),
        compilation.aborted
    );
    Ok(ExitCode::from(status(&compilation)))
}

/// The exit status of a translation that could not run to the end
fn exit_code(error: &CompileError) -> u8 {
    match error {
        CompileError::Io { .. } => EXIT_NO_INPUT,
        CompileError::Lex(_) => EXIT_DATA_ERR,
    }
}

/// The exit status of a translation that ran, successful only when nothing was reported
fn status(compilation: &Compilation) -> u8 {
    if compilation.is_clean() {
        0
    } else {
        EXIT_DIAGNOSTICS
    }
}

fn report(error: &CompileError) {
    eprintln!(
        "{}: {error}",
        "error".if_supports_color(Stream::Stderr, |text| text.red())
    );
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
