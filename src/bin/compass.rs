//! Compass CLI binary.
//!
//! URL-safe text compression from the command line.
//!
//! # Commands
//!
//! - `compress` - Compress text to a URL-safe string
//! - `decompress` - Restore text from a URL-safe string
//! - `stats` - Show compression statistics
//! - `prompt` - Print a prompt chain as JSON

use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use compass::{
    config::{Config, LoggingConfig},
    is_encoded_format,
    prompts::{Modality, PromptChain},
    StrCompressor, VERSION,
};

#[derive(Parser)]
#[command(name = "compass")]
#[command(version = VERSION)]
#[command(about = "Compass - URL-safe text compression", long_about = None)]
struct Cli {
    /// Config file (default: <config_dir>/compass/config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress text to a URL-safe string
    Compress {
        /// Text input (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decompress a URL-safe string
    Decompress {
        /// Encoded input (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show compression statistics
    Stats {
        /// Text input (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print a prompt chain as JSON
    Prompt {
        /// Chain name (lang-detect, agent-name, description, tags, generation-title)
        chain: String,

        /// Text input (or - for stdin). For generation-title, one prompt per line.
        input: Option<String>,

        /// Target locale
        #[arg(short, long, default_value = "en-US")]
        locale: String,

        /// Modality for generation-title (image, video)
        #[arg(short, long, default_value = "image")]
        modality: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose);

    match cli.command {
        Commands::Compress {
            input,
            file,
            output,
        } => cmd_compress(&config, input, file, output),

        Commands::Decompress {
            input,
            file,
            output,
        } => cmd_decompress(&config, input, file, output),

        Commands::Stats { input, file } => cmd_stats(&config, input, file),

        Commands::Prompt {
            chain,
            input,
            locale,
            modality,
        } => cmd_prompt(&chain, input, &locale, &modality),
    }
}

fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn cmd_compress(
    config: &Config,
    input: Option<String>,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let content = read_input(input, file)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let encoded = runtime.block_on(async {
        let compressor = StrCompressor::build(&config.codec);
        compressor.compress_async(&content).await
    })?;

    write_output(output, &encoded)
}

fn cmd_decompress(
    config: &Config,
    input: Option<String>,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let content = read_input(input, file)?;
    let content = content.trim();

    if !is_encoded_format(content) {
        eprintln!("Warning: Input does not appear to be compass output");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let text = runtime.block_on(async {
        let compressor = StrCompressor::build(&config.codec);
        compressor.decompress_async(content).await
    })?;

    write_output(output, &text)
}

fn cmd_stats(config: &Config, input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<()> {
    let content = read_input(input, file)?;
    let compressor = StrCompressor::ready(&config.codec)?;
    let result = compressor.compress_with_stats(&content)?;

    println!("Compression Statistics:");
    println!("  Original:     {} bytes", result.original_bytes);
    println!("  Encoded:      {} bytes", result.encoded_bytes);
    println!("  Ratio:        {:.2}x", result.byte_ratio());

    let savings = result.original_bytes as i64 - result.encoded_bytes as i64;
    let pct = if result.original_bytes > 0 {
        (savings as f64 / result.original_bytes as f64) * 100.0
    } else {
        0.0
    };
    println!("  Saved:        {savings} bytes ({pct:.1}%)");

    Ok(())
}

fn cmd_prompt(
    chain: &str,
    input: Option<String>,
    locale: &str,
    modality: &str,
) -> anyhow::Result<()> {
    let chain = PromptChain::from_str(chain).map_err(anyhow::Error::msg)?;
    let modality = Modality::from_str(modality).map_err(anyhow::Error::msg)?;
    let content = read_input(input, None)?;

    let payload = chain.build(content.trim_end_matches('\n'), locale, modality);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn read_input(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(path) = file {
        Ok(std::fs::read_to_string(path)?)
    } else if let Some(s) = input {
        if s == "-" {
            read_stdin()
        } else {
            Ok(s)
        }
    } else {
        read_stdin()
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn write_output(output: Option<PathBuf>, content: &str) -> anyhow::Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}
