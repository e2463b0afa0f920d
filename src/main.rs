use std::{
    fs::{self, create_dir_all},
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Parser, Subcommand};
use lexgen::{
    automaton::serialize::to_persisted, compile_rules, load_lexer, prenex_to_dfa,
};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexgen")]
#[command(about = "Compile token rules to DFAs and scan text with them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the DFA for one expression in prefix notation and dump it
    Dfa {
        /// File whose first line is the expression
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Compile a rule file and write its DFAs in the persisted format
    Compile {
        #[arg(short, long)]
        rules: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Scan an input file with DFAs written by `compile`
    Lex {
        #[arg(short, long)]
        lexer: PathBuf,

        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Compile a rule file and scan an input file with it
    Complete {
        #[arg(short, long)]
        rules: PathBuf,

        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Dfa { input, output } => {
            let source = fs::read_to_string(&input)?;
            let first_line = source.lines().next().unwrap_or_default();
            let dfa = prenex_to_dfa(first_line)?;
            info!("Built DFA in {:?}", start.elapsed());

            write_output(&output, &dfa.to_string())?;
        }
        Commands::Compile { rules, output } => {
            let lexer = compile_rules(&fs::read_to_string(&rules)?)?;
            info!(rules = lexer.dfas().len(), "Compiled rules in {:?}", start.elapsed());

            write_output(&output, &to_persisted(lexer.dfas()))?;
        }
        Commands::Lex {
            lexer,
            input,
            output,
        } => {
            let lexer = load_lexer(&fs::read_to_string(&lexer)?)?;
            info!(rules = lexer.dfas().len(), "Loaded DFAs in {:?}", start.elapsed());

            let scan_start = Instant::now();
            let result = lexer.scan(&fs::read_to_string(&input)?)?;
            info!("Scanned in {:?}", scan_start.elapsed());

            write_output(&output, &result)?;
        }
        Commands::Complete {
            rules,
            input,
            output,
        } => {
            let lexer = compile_rules(&fs::read_to_string(&rules)?)?;
            info!(rules = lexer.dfas().len(), "Compiled rules in {:?}", start.elapsed());

            let scan_start = Instant::now();
            let result = lexer.scan(&fs::read_to_string(&input)?)?;
            info!("Scanned in {:?}", scan_start.elapsed());

            write_output(&output, &result)?;
        }
    }

    info!("Total time: {:?}", start.elapsed());
    Ok(())
}

/// Writes `content` plus a trailing newline, creating parent directories.
fn write_output(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }

    fs::write(path, format!("{}\n", content))
}
