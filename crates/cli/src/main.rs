//! MYRA request signing CLI.
//!
//! This tool provides commands for:
//! - Signing a request and printing the authentication headers
//! - Printing the canonical signing string of a request
//! - Verifying an `Authorization` header against the configured secret

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod error;
mod logging;
mod request;
mod settings;

use error::CliError;

#[derive(Parser)]
#[command(name = "myrasig")]
#[command(about = "Sign and verify MYRA API requests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the TOML configuration file
    #[arg(long, short, global = true, env = "MYRA_CONFIG", default_value = settings::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Args)]
struct BodyArgs {
    /// Request body
    #[arg(long, short = 'd', conflicts_with = "data_file")]
    data: Option<String>,

    /// Read the request body from a file, `-` for stdin
    #[arg(long)]
    data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a request and print the authentication headers
    Sign {
        /// HTTP method
        #[arg(long, short = 'X', default_value = "GET")]
        method: String,

        /// Request URL, or a path resolved against `api.base_url`
        #[arg(long, short)]
        url: String,

        #[command(flatten)]
        body: BodyArgs,

        /// RFC 3339 date to sign with instead of the current time
        #[arg(long)]
        date: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the canonical string that gets signed
    SigningString {
        /// HTTP method
        #[arg(long, short = 'X', default_value = "GET")]
        method: String,

        /// Path including the query string
        #[arg(long, short)]
        path: String,

        #[command(flatten)]
        body: BodyArgs,

        /// RFC 3339 date
        #[arg(long)]
        date: String,
    },

    /// Verify an Authorization header against the configured secret
    Verify {
        /// HTTP method
        #[arg(long, short = 'X', default_value = "GET")]
        method: String,

        /// Request URL, or a path resolved against `api.base_url`
        #[arg(long, short)]
        url: String,

        #[command(flatten)]
        body: BodyArgs,

        /// Value of the Date header
        #[arg(long)]
        date: String,

        /// Value of the Authorization header
        #[arg(long, short)]
        authorization: String,
    },
}

#[derive(Clone, ValueEnum, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Sign {
            method,
            url,
            body,
            date,
            format,
        } => {
            let settings = commands::load_settings(&cli.config)?;
            let body = request::read_body(body.data, body.data_file.as_deref())?;
            let mut req = request::build_request(&method, &url, &settings.api.base_url, body)?;

            let headers = commands::sign(settings.credentials(), &mut req, date.as_deref())?;
            println!("{}", commands::render(&headers, &format)?);
            Ok(())
        }
        Commands::SigningString {
            method,
            path,
            body,
            date,
        } => {
            let mut body = request::read_body(body.data, body.data_file.as_deref())?;
            println!(
                "{}",
                commands::canonical_string(&method, &path, &mut body, &date)?
            );
            Ok(())
        }
        Commands::Verify {
            method,
            url,
            body,
            date,
            authorization,
        } => {
            let settings = commands::load_settings(&cli.config)?;
            let body = request::read_body(body.data, body.data_file.as_deref())?;
            let mut req = request::build_request(&method, &url, &settings.api.base_url, body)?;

            commands::verify(&settings.credentials(), &mut req, &date, &authorization)?;
            println!("valid");
            Ok(())
        }
    }
}
