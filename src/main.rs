//! books-data - Book metadata lookup through the Amazon Product Advertising API

use anyhow::{Context, Result};
use books_data::commands::{ReviewCommand, ReviewOptions, SearchCommand};
use books_data::config::Config;
use books_data::ecode::ErrorCode;
use books_data::error::Error;
use books_data::paapi::Marketplace;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "books-data",
    version,
    about = "Search for books data by ASIN or ISBN",
    long_about = "Looks up book metadata with Amazon PA-API v5 and renders it as JSON or through a template."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// PA-API marketplace (e.g., webservices.amazon.co.jp or jp)
    #[arg(long, global = true)]
    marketplace: Option<String>,

    /// Associate (partner) tag
    #[arg(long, global = true)]
    associate_tag: Option<String>,

    /// PA-API access key
    #[arg(long, global = true)]
    access_key: Option<String>,

    /// PA-API secret key
    #[arg(long, global = true)]
    secret_key: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "BOOKS_DATA_PROXY")]
    proxy: Option<String>,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a book by ASIN or ISBN
    #[command(alias = "s")]
    Search {
        /// ASIN (or ISBN with --isbn)
        id: String,

        /// Treat the id as an ISBN
        #[arg(long)]
        isbn: bool,

        /// Print the raw API response
        #[arg(long)]
        raw: bool,

        /// Template for the output
        #[arg(short, long)]
        template_file: Option<PathBuf>,
    },

    /// Compose a review of a book
    #[command(alias = "r")]
    Review {
        /// ASIN (or ISBN with --isbn) of the reviewed book
        id: Option<String>,

        /// Treat the id as an ISBN
        #[arg(long)]
        isbn: bool,

        /// Rating (0-5)
        #[arg(long)]
        rating: Option<u8>,

        /// Review date (YYYY-MM-DD)
        #[arg(long)]
        review_date: Option<NaiveDate>,

        /// Review text
        #[arg(long, conflicts_with = "pipe")]
        description: Option<String>,

        /// Read the review text from stdin
        #[arg(long)]
        pipe: bool,

        /// Override the book page URL
        #[arg(long)]
        bookpage_url: Option<String>,

        /// Override the cover image URL
        #[arg(long)]
        image_url: Option<String>,

        /// JSON review to start from
        #[arg(long)]
        review_file: Option<PathBuf>,

        /// Template for the output
        #[arg(short, long)]
        template_file: Option<PathBuf>,
    },

    /// List supported marketplaces
    Marketplaces,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries data
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(marketplace) = cli.marketplace {
        config.marketplace = marketplace;
    }
    if let Some(tag) = cli.associate_tag {
        config.associate_tag = tag;
    }
    if let Some(key) = cli.access_key {
        config.access_key = key;
    }
    if let Some(key) = cli.secret_key {
        config.secret_key = key;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    let Some(command) = cli.command else {
        return Err(Error::new(
            ErrorCode::NO_COMMAND,
            "specify a subcommand: search, review or marketplaces",
        )
        .into());
    };

    let output = match command {
        Commands::Search { id, isbn, raw, template_file } => {
            if template_file.is_some() {
                config.template_file = template_file;
            }

            let cmd = SearchCommand::new(config);
            cmd.execute(&id, isbn, raw).await?
        }

        Commands::Review {
            id,
            isbn,
            rating,
            review_date,
            description,
            pipe,
            bookpage_url,
            image_url,
            review_file,
            template_file,
        } => {
            if template_file.is_some() {
                config.review_template_file = template_file;
            }

            let description = if pipe { Some(read_stdin()?) } else { description };
            let opts = ReviewOptions {
                id,
                enable_isbn: isbn,
                rating,
                date: review_date,
                description,
                bookpage_url,
                image_url,
                review_file,
            };

            let cmd = ReviewCommand::new(config);
            cmd.execute(&opts).await?
        }

        Commands::Marketplaces => {
            let mut out = String::from("Supported marketplaces:\n\n");
            out.push_str(&format!("{:<6} {:<28} {:<20} {:<10}\n", "Code", "Host", "Marketplace", "Region"));
            out.push_str(&format!("{:-<6} {:-<28} {:-<20} {:-<10}\n", "", "", "", ""));

            for m in Marketplace::all() {
                out.push_str(&format!(
                    "{:<6} {:<28} {:<20} {:<10}\n",
                    m.to_string(),
                    m.host(),
                    m.marketplace(),
                    m.aws_region()
                ));
            }
            out.into_bytes()
        }
    };

    write_output(&output, cli.output.as_deref())
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text).context("Failed to read description from stdin")?;
    Ok(text.trim_end().to_string())
}

fn write_output(bytes: &[u8], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")
        }
    }
}
