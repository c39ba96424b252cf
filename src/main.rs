use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use flowgrow::config::{LogFormat, ServerConfig};
use flowgrow::core::{
    AmortizationRequest, ProjectionRequest, monthly_payment, run_amortization_schedule,
    run_projection,
};
use flowgrow::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "flowgrow",
    version,
    about = "Mortgage payoff and net-worth projection engine with an HTTP API"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Print a baseline vs. accelerated payoff schedule as JSON.
    Amortize {
        #[arg(long, help = "Outstanding mortgage balance")]
        balance: f64,
        #[arg(long, help = "Annual interest rate in percent, e.g. 6.5")]
        rate: f64,
        #[arg(long, help = "Standard monthly principal and interest payment")]
        payment: f64,
        #[arg(long, default_value_t = 0.0, help = "Extra principal paid each month")]
        extra: f64,
    },
    /// Run a 25-year projection from a JSON request file ("-" reads stdin).
    Project {
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Print the level monthly payment for a loan.
    Payment {
        #[arg(long)]
        principal: f64,
        #[arg(long, help = "Annual interest rate in percent")]
        rate: f64,
        #[arg(
            long,
            default_value_t = 30,
            allow_negative_numbers = true,
            help = "Loan term in years"
        )]
        years: i64,
    },
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "FLOWGROW_HOST", default_value = "0.0.0.0")]
    host: String,
    #[arg(long, env = "FLOWGROW_PORT", default_value_t = 8000)]
    port: u16,
    #[arg(long, env = "FLOWGROW_LOG", default_value = "info")]
    log_level: String,
    #[arg(
        long,
        env = "FLOWGROW_LOG_FORMAT",
        default_value = "pretty",
        help = "Log output format: pretty or json"
    )]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => {
            let config =
                ServerConfig::new(&args.host, args.port, &args.log_level, &args.log_format)?;
            init_logging(&config.log_level, config.log_format);
            flowgrow::api::run_http_server(&config)
                .await
                .context("HTTP server failed")?;
        }
        Command::Amortize {
            balance,
            rate,
            payment,
            extra,
        } => {
            init_logging("warn", LogFormat::Pretty);
            let schedule = run_amortization_schedule(&AmortizationRequest {
                mortgage_balance: balance,
                interest_rate: rate,
                monthly_payment: payment,
                extra_principal_monthly: extra,
            });
            print_json(&schedule)?;
        }
        Command::Project { input } => {
            init_logging("warn", LogFormat::Pretty);
            let request = read_projection_request(&input)?;
            print_json(&run_projection(&request))?;
        }
        Command::Payment {
            principal,
            rate,
            years,
        } => {
            println!("{:.2}", monthly_payment(principal, rate, years));
        }
    }

    Ok(())
}

fn read_projection_request(input: &Path) -> Result<ProjectionRequest> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read projection request from stdin")?;
        buf
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };
    serde_json::from_str(&raw).context("invalid projection request JSON")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
