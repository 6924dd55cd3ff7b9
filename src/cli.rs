//! Command-line front end over the expansion engine.
//!
//! Templates are given as arguments; custom types load from a JSON file
//! of name → member arrays, and expression bindings are supplied as
//! `NAME=VALUE` pairs.

use std::{fs, path::PathBuf, process};

use clap::{Parser, Subcommand};
use miette::{miette, Report};

use crate::expansion::Expander;
use crate::host::{Bindings, StaticRegistry};
use crate::value::{Platform, Utterances, Value};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "utterance-engine",
    version,
    about = "Expands utterance templates into the concrete strings they denote."
)]
pub struct EngineArgs {
    #[command(subcommand)]
    pub command: ArgsCommand,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Expand templates and print one concrete utterance per line.
    Expand {
        #[arg(required = true)]
        templates: Vec<String>,
        #[command(flatten)]
        hosts: HostArgs,
    },
    /// Expand templates and prefix each line with an intent name.
    Export {
        /// The intent name to prefix each expanded utterance with.
        intent: String,
        #[arg(required = true)]
        templates: Vec<String>,
        /// Target platform for the export format.
        #[arg(long, value_enum, default_value = "alexa")]
        platform: Platform,
        #[command(flatten)]
        hosts: HostArgs,
    },
    /// Check a batch of templates for duplicates among their expansions.
    Validate {
        #[arg(required = true)]
        templates: Vec<String>,
        #[command(flatten)]
        hosts: HostArgs,
    },
}

/// Options configuring the two host collaborators.
#[derive(Debug, clap::Args)]
pub struct HostArgs {
    /// JSON file mapping custom type names to member arrays.
    #[arg(long)]
    pub types: Option<PathBuf>,
    /// NAME=VALUE binding for `{=NAME}` expressions; a comma-separated
    /// VALUE binds a list.
    #[arg(long = "bind")]
    pub bindings: Vec<String>,
}

/// The main entry point for the CLI.
pub fn run() {
    let args = EngineArgs::parse();
    if let Err(report) = run_command(args.command) {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

fn run_command(command: ArgsCommand) -> miette::Result<()> {
    match command {
        ArgsCommand::Expand { templates, hosts } => {
            let (env, registry) = build_hosts(&hosts)?;
            let expander = Expander::new(&env, &registry);
            for template in &templates {
                let expanded = expander
                    .unfold_utterance_string(template)
                    .map_err(Report::new)?;
                print_expansion(expanded);
            }
            Ok(())
        }

        ArgsCommand::Export {
            intent,
            templates,
            platform,
            hosts,
        } => {
            let (env, registry) = build_hosts(&hosts)?;
            let expander = Expander::new(&env, &registry);
            let utterances = Utterances::Many(templates);
            let exported = expander
                .export_intent_utterance_strings(&intent, Some(&utterances), platform)
                .map_err(Report::new)?;
            match exported {
                Some(lines) => {
                    for line in lines {
                        println!("{line}");
                    }
                }
                None => eprintln!("no export format for platform {platform:?}"),
            }
            Ok(())
        }

        ArgsCommand::Validate { templates, hosts } => {
            let (env, registry) = build_hosts(&hosts)?;
            let expander = Expander::new(&env, &registry);
            let utterances = Utterances::Many(templates);
            let valid = expander
                .validate_utterances(Some(&utterances))
                .map_err(Report::new)?;
            if valid {
                println!("no duplicate utterances");
                Ok(())
            } else {
                eprintln!("utterances contain duplicates");
                process::exit(1);
            }
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS - Host construction and output
// ============================================================================

fn build_hosts(args: &HostArgs) -> miette::Result<(Bindings, StaticRegistry)> {
    let registry = match &args.types {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| miette!("failed to read {}: {e}", path.display()))?;
            StaticRegistry::from_json(&json)
                .map_err(|e| miette!("failed to parse {}: {e}", path.display()))?
        }
        None => StaticRegistry::new(),
    };

    let mut env = Bindings::new();
    for binding in &args.bindings {
        let Some((name, value)) = binding.split_once('=') else {
            return Err(miette!("invalid --bind `{binding}`; expected NAME=VALUE"));
        };
        let value = if value.contains(',') {
            Value::List(value.split(',').map(str::to_string).collect())
        } else {
            Value::Scalar(value.to_string())
        };
        env.bind(name, value);
    }

    Ok((env, registry))
}

fn print_expansion(expanded: Value) {
    match expanded {
        Value::Scalar(line) => println!("{line}"),
        Value::List(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
    }
}
