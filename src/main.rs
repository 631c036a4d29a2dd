// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

//! Galatea CLI entrypoint.
//!
//! By default this opens the interactive diagram TUI with an empty session;
//! pass a `.sql`/`.txt` file to parse it on startup, or `--demo` for a
//! built-in schema that needs no parser service.

use std::error::Error;
use std::path::Path;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<schema-file>] [--parser-url <url>]\n  {program} --demo\n\n<schema-file> is a .sql or .txt file of CREATE TABLE statements; it is sent\nto the parser service on startup and merged into the diagram.\n\n--parser-url overrides the parser service endpoint (also settable via\n{env}; default {default}).\n\n--demo opens a built-in demo schema and cannot be combined with a schema\nfile.",
        env = galatea::ingest::ENDPOINT_ENV,
        default = galatea::ingest::DEFAULT_ENDPOINT,
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    schema_file: Option<String>,
    parser_url: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--parser-url" => {
                if options.parser_url.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                if url.trim().is_empty() {
                    return Err(());
                }
                options.parser_url = Some(url);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.schema_file.is_some() {
                    return Err(());
                }
                options.schema_file = Some(arg);
            }
        }
    }

    if options.demo && options.schema_file.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "galatea".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let parser = match options.parser_url {
            Some(url) => galatea::ingest::HttpSchemaParser::new(url),
            None => galatea::ingest::HttpSchemaParser::from_env(),
        };

        let session = if options.demo {
            galatea::tui::demo_session()
        } else {
            galatea::model::DiagramSession::new()
        };

        let initial_sql = match options.schema_file {
            Some(path) => Some(galatea::ingest::read_schema_file(Path::new(&path))?),
            None => None,
        };

        galatea::tui::run_with_session(session, parser, initial_sql)?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("galatea: {err}");
        std::process::exit(1);
    }
}
