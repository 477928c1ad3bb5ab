mod config;

use std::process::ExitCode;

use anyhow::Context as _;
use camino::Utf8PathBuf;
use clap::Parser;
use config::StyleArgs;
use lpc_errors::{ParseError, Renderer};
use lpc_fmt::FormatOptions;
use lpc_inputs::SourceFile;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version, about = "Formatter for LPC source files")]
enum Options {
    /// Print the formatted files, or rewrite them in place with `--write`.
    Format {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
        #[arg(long)]
        write: bool,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Fail when any file is not formatted.
    Check {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
        #[command(flatten)]
        style: StyleArgs,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("LPCFMT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let renderer = Renderer::styled();
    let ok = match Options::parse() {
        Options::Format { paths, write, style } => {
            let options = style.load()?;
            run(&paths, &options, &renderer, |file, formatted| {
                if !write {
                    print!("{formatted}");
                } else if formatted != file.text() {
                    std::fs::write(file.path(), formatted)
                        .with_context(|| format!("failed to write `{}`", file.path()))?;
                    tracing::info!(path = %file.path(), "reformatted");
                }
                Ok(true)
            })?
        }
        Options::Check { paths, style } => {
            let options = style.load()?;
            run(&paths, &options, &renderer, |file, formatted| {
                let unchanged = formatted == file.text();
                if !unchanged {
                    eprintln!("{}: not formatted", file.path());
                }
                Ok(unchanged)
            })?
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Formats every path and hands the result to `on_formatted`. Parse errors
/// are reported and the remaining files are still processed.
fn run(
    paths: &[Utf8PathBuf],
    options: &FormatOptions,
    renderer: &Renderer,
    mut on_formatted: impl FnMut(&SourceFile, &str) -> anyhow::Result<bool>,
) -> anyhow::Result<bool> {
    let mut ok = true;
    for path in paths {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
        let file = SourceFile::new(path.clone(), text);

        match lpc_fmt::format(file.text(), options) {
            Ok(formatted) => ok &= on_formatted(&file, &formatted)?,
            Err(error) => {
                report(renderer, &file, &error);
                ok = false;
            }
        }
    }
    Ok(ok)
}

fn report(renderer: &Renderer, file: &SourceFile, error: &ParseError) {
    eprintln!("{}: {error}", file.location(error.offset()));
    eprintln!("{}", error.render(renderer, file.path().as_str(), file.text()));
}
