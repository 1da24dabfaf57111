//! protoc-gen-java-json - protoc plugin entry point
//!
//! Reads a `CodeGeneratorRequest` from stdin (or `--request`), writes the
//! `CodeGeneratorResponse` to stdout, and exits non-zero if generation failed.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use protojson_core::GeneratorConfig;
use protojson_plugin::{RawCodeGeneratorRequest, init_logging, respond, response};

#[derive(Parser)]
#[command(name = "protoc-gen-java-json")]
#[command(author, version, about = "protoc plugin generating org.json codecs and HTTP stubs for Java", long_about = None)]
struct Cli {
    /// Read the serialized request from a file instead of stdin
    #[arg(long)]
    request: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let input = read_request(cli.request.as_deref())?;
    let request =
        RawCodeGeneratorRequest::from_bytes(&input).context("Failed to decode CodeGeneratorRequest")?;

    let config = GeneratorConfig::from_parameter(request.parameter.as_deref())
        .and_then(|config| init_logging(&config.log_level).map(|()| config));
    let response = match config {
        Ok(config) => respond(&request, &config),
        Err(err) => response::failure(&err),
    };

    std::io::stdout()
        .write_all(&response::encode(&response))
        .context("Failed to write CodeGeneratorResponse")?;

    match response.error {
        Some(error) => {
            eprintln!("protoc-gen-java-json: {error}");
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

fn read_request(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read {path:?}")),
        None => {
            let mut input = Vec::new();
            std::io::stdin()
                .read_to_end(&mut input)
                .context("Failed to read CodeGeneratorRequest from stdin")?;
            Ok(input)
        }
    }
}
