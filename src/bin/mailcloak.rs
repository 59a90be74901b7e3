//! mailcloak CLI
//!
//! Generate harvester-resistant mailto links, and encode/decode the radix
//! tokens they embed.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mailcloak::{render_page, Codec, LinkBuilder, LinkConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mailcloak")]
#[command(version)]
#[command(about = "Harvester-resistant mailto link generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an anchor tag for an email address
    Gen {
        /// Target email address (falls back to a placeholder when blank)
        #[arg(long, default_value = "")]
        email: String,

        /// Subject line
        #[arg(long, default_value = "")]
        subject: String,

        /// Message body
        #[arg(long, default_value = "")]
        message: String,

        /// Visible link text
        #[arg(long, default_value = "")]
        label: String,

        /// Use editable data attributes instead of an encoded token
        #[arg(long)]
        plain: bool,

        /// Wrap the anchor in a complete HTML document
        #[arg(long)]
        page: bool,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Encode text into a base-tagged radix token
    Encode {
        /// Text to encode
        text: String,

        /// Force a specific base (12-35) instead of a random one
        #[arg(long)]
        base: Option<u32>,
    },

    /// Decode a base-tagged radix token
    Decode {
        /// Token to decode
        token: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Gen {
            email,
            subject,
            message,
            label,
            plain,
            page,
            output,
            verbose,
        } => {
            gen_link(email, subject, message, label, plain, page, output, verbose)?;
        }
        Commands::Encode { text, base } => {
            encode_text(&text, base)?;
        }
        Commands::Decode { token } => {
            decode_token(&token)?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn gen_link(
    email: String,
    subject: String,
    message: String,
    label: String,
    plain: bool,
    page: bool,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let codec = Codec::new().with_verbose(if verbose { 1 } else { 0 });
    let builder = LinkBuilder::new().with_codec(codec);

    let markup = builder
        .build(&LinkConfig {
            email,
            subject,
            message,
            label,
            encrypt: !plain,
        })
        .context("Failed to build link")?;

    let rendered = if page { render_page(&markup) } else { markup };

    if let Some(output_path) = output {
        fs::write(&output_path, &rendered)
            .with_context(|| format!("Failed to write: {}", output_path.display()))?;

        if verbose {
            println!("Wrote: {} ({} bytes)", output_path.display(), rendered.len());
        }
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn encode_text(text: &str, base: Option<u32>) -> Result<()> {
    let codec = match base {
        Some(base) => Codec::new().with_base(base),
        None => Codec::new(),
    };

    let token = codec
        .encode(text)
        .context("Failed to encode text")?;
    println!("{}", token);

    Ok(())
}

fn decode_token(token: &str) -> Result<()> {
    let decoded = Codec::new()
        .decode(token)
        .context("Failed to decode token")?;
    println!("{}", decoded);

    Ok(())
}
