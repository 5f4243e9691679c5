use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
  resolver-guard check --policy <file> [--token <token>] --resource <name> --action <read|write|delete> [--locale <code>] [--audit <file>]
  resolver-guard validate --policy <file>
  resolver-guard help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Check(CheckArgs),
    Validate { policy: PathBuf },
    Help,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckArgs {
    pub policy: PathBuf,
    pub token: Option<String>,
    pub resource: String,
    pub action: String,
    pub locale: Option<String>,
    pub audit: Option<PathBuf>,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(Command::Help);
    };

    let mut policy = None;
    let mut check = CheckArgs::default();
    let mut resource = None;
    let mut action = None;

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .with_context(|| format!("Missing value for {}", flag))
        };
        match flag.as_str() {
            "--policy" => policy = Some(PathBuf::from(value()?)),
            "--token" => check.token = Some(value()?),
            "--resource" => resource = Some(value()?),
            "--action" => action = Some(value()?),
            "--locale" => check.locale = Some(value()?),
            "--audit" => check.audit = Some(PathBuf::from(value()?)),
            other => bail!("Unknown argument: {}", other),
        }
    }

    match command.as_str() {
        "help" | "--help" | "-h" => Ok(Command::Help),
        "validate" => Ok(Command::Validate {
            policy: policy.context("validate requires --policy")?,
        }),
        "check" => {
            check.policy = policy.context("check requires --policy")?;
            check.resource = resource.context("check requires --resource")?;
            check.action = action.context("check requires --action")?;
            Ok(Command::Check(check))
        }
        other => bail!("Unknown command: {}", other),
    }
}
