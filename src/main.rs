//! Command line front end: runs one program file against the console.

use tracelang::trace::Node;
use tracelang::{pretty_error_message, run_file, ProgramState, RedeclarationPolicy, RunConfig};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Runs a program, printing its output. The syntax tree and semantic trace can be written out as JSON.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The program to run.
    path: PathBuf,

    /// Write the syntax tree to this file.
    #[arg(long)]
    syntax_out: Option<PathBuf>,

    /// Write the semantic trace to this file. Written even if the run fails.
    #[arg(long)]
    semantic_out: Option<PathBuf>,

    /// Print the final variables and functions.
    #[arg(long)]
    dump_state: bool,

    /// Make declaring a function name twice an error.
    #[arg(long)]
    strict_functions: bool,

    /// How deeply function calls may nest.
    #[arg(long, default_value_t = RunConfig::default().max_call_depth)]
    max_call_depth: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "tracelang=warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = RunConfig {
        redeclaration: if args.strict_functions { RedeclarationPolicy::Reject } else { RedeclarationPolicy::Overwrite },
        max_call_depth: args.max_call_depth,
    };

    let report = run_file(&args.path, &config, &mut std::io::stdin().lock(), &mut std::io::stdout().lock());

    let mut failed = false;

    if let (Some(path), Some(tree)) = (&args.syntax_out, &report.syntax_tree) {
        failed |= !write_tree(path, tree);
    }
    if let Some(path) = &args.semantic_out {
        failed |= !write_tree(path, &report.semantic_tree);
    }

    if args.dump_state {
        match serde_json::to_string_pretty(&state_json(&report.state)) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Could not serialize the program state: {err}");
                failed = true;
            }
        }
    }

    if let Err(err) = &report.result {
        eprintln!("{}\n", pretty_error_message(err));
        failed = true;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn state_json(state: &ProgramState) -> serde_json::Value {
    serde_json::json!({
        "variables": state.variables(),
        "functions": state.functions().keys().collect::<Vec<_>>(),
    })
}

/// Returns whether the tree was written. Failures are reported on stderr.
///
/// Trees are written compactly: a long program nests one level per statement, and indenting every level would
/// make the file grow with the square of the program's length.
fn write_tree(path: &Path, tree: &Node) -> bool {
    let written = File::create(path).map_err(|err| err.to_string()).and_then(|file| {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, tree).map_err(|err| err.to_string())?;
        writer.flush().map_err(|err| err.to_string())
    });

    match written {
        Ok(()) => true,
        Err(err) => {
            eprintln!("Could not write {}: {err}", path.display());
            false
        }
    }
}
