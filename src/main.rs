use clap::{Parser, Subcommand};
use docsite::{config, output, site};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Static documentation site builder for markdown notes")]
#[command(long_about = "\
Static documentation site builder for markdown notes

Your filesystem is the data source. Each configured category is a directory
of markdown files; every file becomes one HTML page and every directory
becomes one navigation group.

Content structure:

  source/
  ├── docsite.toml                 # Site config (optional)
  ├── assets/                      # Copied verbatim → <output>/assets/
  ├── notes/                       # Category \"notes\"
  │   ├── intro.md                 # → notes/intro.html, group \"Notes\"
  │   └── rust/
  │       ├── index.md             # Titled \"Rust\" after its directory
  │       └── ownership.md         # → group \"Notes / Rust\"
  └── practice/                    # Category \"practice\"
      └── getting-started.md       # Titled \"Getting Started\"

Every build wipes the output directory and regenerates the whole site.

Run 'docsite gen-config' to print a documented docsite.toml.")]
#[command(version)]
struct Cli {
    /// Source root containing the category directories
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory (default: `output_dir` from docsite.toml, under the source root)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log pipeline progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the full site (the default when no command is given)
    Build,
    /// Discover documents and print the navigation without writing anything
    Check {
        /// Print the site plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock docsite.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let config = config::load_config(&cli.source)?;
            let output_root = resolve_output(&cli.source, cli.output.as_deref(), &config);

            println!(
                "==> Building {} → {}",
                cli.source.display(),
                output_root.display()
            );
            let manifest = site::build(&cli.source, &output_root, &config)?;
            output::print_build_output(&manifest);
            println!("==> Build complete: {}", output_root.display());
        }
        Command::Check { json } => {
            let config = config::load_config(&cli.source)?;
            let output_root = resolve_output(&cli.source, cli.output.as_deref(), &config);
            let plan = site::plan(&cli.source, &output_root, &config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("==> Checking {}", cli.source.display());
                output::print_discovery_output(&plan);
                println!("==> Content is valid");
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// The `--output` flag is taken as given; the config value is relative to the source root.
fn resolve_output(source: &Path, flag: Option<&Path>, config: &config::SiteConfig) -> PathBuf {
    match flag {
        Some(path) => path.to_path_buf(),
        None => source.join(&config.output_dir),
    }
}
