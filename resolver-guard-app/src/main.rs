use resolver_guard_app::cli::{parse_args, Command, USAGE};
use resolver_guard_app::commands::{run_check, run_validate, Outcome};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_DENIED: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {:#}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match command {
        Command::Help => {
            println!("{}", USAGE);
            ExitCode::SUCCESS
        }
        Command::Validate { policy } => match run_validate(&policy) {
            Ok(count) => {
                println!("OK: {} identities", count);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {:#}", e);
                ExitCode::from(EXIT_USAGE)
            }
        },
        Command::Check(args) => match run_check(&args).await {
            Ok(Outcome::Allowed) => {
                println!("ALLOW");
                ExitCode::SUCCESS
            }
            Ok(Outcome::Denied) => {
                println!("Not authorized");
                ExitCode::from(EXIT_DENIED)
            }
            Err(e) => {
                eprintln!("error: {:#}", e);
                ExitCode::from(EXIT_USAGE)
            }
        },
    }
}
