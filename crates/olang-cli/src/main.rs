//! O language command-line driver
//!
//! Front-end-only pipeline: lex, parse, bind the class table, report
//! diagnostics. The first failure ends the run.

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use std::path::PathBuf;
use std::process::ExitCode;

use olang_checker::{Binder, ClassRegistry, Diagnostic};
use olang_parser::Parser;

#[derive(ClapParser)]
#[command(name = "olang")]
#[command(about = "O programming language front end", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and type-check a source file
    Check {
        /// Input file
        file: PathBuf,
        /// Emit diagnostics as JSON instead of rendered text
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved class table of a source file
    Describe {
        /// Input file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file, json } => check(&file, json).map(|_| ()),
        Commands::Describe { file } => describe(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Reported) => ExitCode::FAILURE,
        Err(Failure::Io(err)) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Either a diagnostic already shown to the user, or an I/O-level error.
enum Failure {
    Reported,
    Io(anyhow::Error),
}

fn check(file: &PathBuf, json: bool) -> Result<ClassRegistry, Failure> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))
        .map_err(Failure::Io)?;

    let mut files = SimpleFiles::new();
    let file_id = files.add(file.display().to_string(), source.clone());

    let report = |diagnostic: Diagnostic| -> Failure {
        if json {
            match diagnostic.to_json() {
                Ok(rendered) => println!("{}", rendered),
                Err(err) => eprintln!("error: {}", err),
            }
        } else if let Err(err) = diagnostic.emit(&files) {
            eprintln!("error: {}", err);
        }
        Failure::Reported
    };

    let parser = Parser::new(&source)
        .map_err(|err| report(Diagnostic::from_lex_error(&err, file_id)))?;

    let program = parser
        .parse()
        .map_err(|err| report(Diagnostic::from_parse_error(&err, file_id)))?;

    Binder::new()
        .bind_program(&program)
        .map_err(|err| report(Diagnostic::from_semantic_error(&err, file_id)))
}

fn describe(file: &PathBuf) -> Result<(), Failure> {
    let registry = check(file, false)?;

    for class in registry.source_classes() {
        println!("{}", registry.describe(class, true));
        let descriptor = registry.get(class);
        for field in &descriptor.fields {
            match &field.ty {
                Some(ty) => println!("    var {} : {}", field.name, ty),
                None => println!("    var {}", field.name),
            }
        }
        for constructor in &descriptor.constructors {
            println!(
                "    {}{}",
                registry
                    .get(class)
                    .render_constructor(&constructor.params),
                if constructor.synthesized {
                    " (default)"
                } else {
                    ""
                }
            );
        }
        for method in &descriptor.methods {
            println!("    {}", method);
        }
    }

    Ok(())
}
