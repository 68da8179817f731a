//! STACKFORGE CLI
//!
//! Builds deployment plans from the built-in stack definitions.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use stackforge_plan::{Compiler, Registry};

#[derive(Parser)]
#[command(name = "stackforge")]
#[command(about = "STACKFORGE - declarative infrastructure topology compiler", long_about = None)]
struct Cli {
    /// Tracing env filter
    #[arg(long, default_value = "stackforge=info")]
    log_filter: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in stacks
    Stacks,
    /// Build a stack and emit its plan as JSON
    Plan {
        /// Stack name
        #[arg(short, long)]
        stack: String,
        /// Write the plan here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print a stack's derived dependency edges
    Graph {
        /// Stack name
        #[arg(short, long)]
        stack: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Stacks => {
            for name in stackforge_stacks::available() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Plan { stack, output } => {
            let registry = load_stack(&stack)?;
            let built = Compiler::new().build(&registry)?;

            for warning in &built.warnings {
                tracing::warn!("{warning}");
            }

            let json = built.plan.to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    tracing::info!(resources = built.plan.len(), path = %path, "plan written");
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Commands::Graph { stack } => {
            let registry = load_stack(&stack)?;
            let graph = stackforge_plan::DependencyGraph::derive(&registry);
            for (dependent, dependency) in graph.edges() {
                println!("{dependent} -> {dependency}");
            }
            Ok(())
        }
    }
}

fn load_stack(name: &str) -> Result<Registry> {
    let registry = stackforge_stacks::build(name).ok_or_else(|| {
        eyre!(
            "unknown stack: {name} (available: {})",
            stackforge_stacks::available().join(", ")
        )
    })??;
    Ok(registry)
}
