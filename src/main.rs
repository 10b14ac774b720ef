use checkstyle_regen::config::ToolConfig;
use checkstyle_regen::fetch::fetch_repository;
use checkstyle_regen::generate::{generate_config, ParserInvocation};
use checkstyle_regen::workflow;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "checkstyle-regen")]
#[command(
    about = "Prepares Checkstyle diff-regression inputs: clones the upstream repository and runs the documentation parser"
)]
struct Cli {
    /// TOML configuration file; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FetchArgs {
    /// Upstream repository URL
    #[arg(long)]
    repo_url: Option<String>,

    /// Directory to clone into
    #[arg(long)]
    destination_dir: Option<PathBuf>,
}

#[derive(Args)]
struct GenerateArgs {
    /// Documentation XML file to parse
    #[arg(long)]
    xml_file: Option<PathBuf>,

    /// Module whose documentation section is extracted
    #[arg(short, long)]
    module: Option<String>,

    /// Path to the parser jar
    #[arg(long)]
    parser_jar: Option<PathBuf>,

    /// Java executable used to launch the parser
    #[arg(long)]
    java_bin: Option<String>,

    /// Time limit for the parse, in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone the upstream repository if it is not already present
    Fetch {
        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Run the documentation parser against an XML file for one module
    Generate {
        #[command(flatten)]
        generate: GenerateArgs,
    },
    /// Fetch the repository, then generate the config in one pass
    Run {
        #[command(flatten)]
        fetch: FetchArgs,
        #[command(flatten)]
        generate: GenerateArgs,
    },
}

impl FetchArgs {
    fn apply(self, config: &mut ToolConfig) {
        if let Some(repo_url) = self.repo_url {
            config.repo_url = repo_url;
        }
        if let Some(destination_dir) = self.destination_dir {
            config.destination_dir = destination_dir;
        }
    }
}

impl GenerateArgs {
    fn apply(self, config: &mut ToolConfig) {
        if let Some(xml_file) = self.xml_file {
            config.xml_file_path = xml_file;
        }
        if let Some(module) = self.module {
            config.module_name = module;
        }
        if let Some(parser_jar) = self.parser_jar {
            config.parser_jar = parser_jar;
        }
        if let Some(java_bin) = self.java_bin {
            config.java_bin = java_bin;
        }
        if let Some(timeout) = self.timeout {
            config.parse_timeout_secs = Some(timeout);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ToolConfig::from_file(path)?,
        None => ToolConfig::default(),
    };

    match cli.command {
        Commands::Fetch { fetch } => {
            fetch.apply(&mut config);
            config.validate()?;

            let outcome = fetch_repository(&config.repo_url, &config.destination_dir)?;
            info!(%outcome, "fetch complete");
        }
        Commands::Generate { generate } => {
            generate.apply(&mut config);
            config.validate()?;

            let invocation = ParserInvocation::new(
                &config.java_bin,
                &config.parser_jar,
                &config.xml_file_path,
                &config.module_name,
            );
            generate_config(&invocation, config.parse_timeout()).await?;
            println!("Generated config for module {}.", config.module_name);
        }
        Commands::Run { fetch, generate } => {
            fetch.apply(&mut config);
            generate.apply(&mut config);

            let report = workflow::run(&config).await?;
            println!(
                "Repository {}; config generated for module {}.",
                report.fetch_outcome, report.module_name
            );
        }
    }

    Ok(())
}
