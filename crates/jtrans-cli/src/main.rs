use clap::{Parser, Subcommand};
use jtrans_driver::Driver;
use miette::Result;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jtrans")]
#[command(author, version, about = "Generate C++ headers with explicit vtables from a Java class AST")]
struct Cli {
    /// Project configuration (jtrans.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a C++ header from a JSON class AST
    Generate {
        /// AST file to translate
        input: PathBuf,

        /// Output header path (default: configured path, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check AST files for errors without writing a header
    Check {
        /// AST files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the parsed AST or the generated header
    Dump {
        /// AST file to dump
        file: PathBuf,

        /// What to dump
        #[arg(long, default_value = "ast")]
        format: DumpFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DumpFormat {
    /// Dump the parsed class AST
    Ast,
    /// Dump the generated header
    Header,
}

fn driver(config: Option<&Path>) -> Result<Driver> {
    match config {
        Some(path) => Driver::from_config_file(path),
        None => Ok(Driver::new()),
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let driver = driver(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate { input, output } => {
            let summary = driver.build(&input, output.as_deref())?;
            match summary.output {
                Some(path) => println!(
                    "Generated {} classes: {} -> {}",
                    summary.classes,
                    input.display(),
                    path.display()
                ),
                None => print!("{}", summary.header),
            }
        }

        Commands::Check { files } => {
            for file in &files {
                match driver.generate_file(file) {
                    Ok(_) => println!("{}: OK", file.display()),
                    Err(e) => {
                        eprintln!("{}: Error", file.display());
                        return Err(e);
                    }
                }
            }
        }

        Commands::Dump { file, format } => match format {
            DumpFormat::Ast => {
                let unit = driver.load_unit(&file)?;
                println!("{:#?}", unit);
            }
            DumpFormat::Header => {
                let header = driver.generate_file(&file)?;
                print!("{}", header);
            }
        },
    }

    Ok(())
}
