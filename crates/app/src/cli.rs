//! Command-line and environment options.
//!
//! `--agent` switches to the headless JSON protocol. The schedule seed comes
//! from `--seed <u64>`, falling back to `REDLIGHT_SEED`; without either the
//! window build seeds from the OS and agent mode uses the default seed.

use std::fmt;

pub const SEED_ENV: &str = "REDLIGHT_SEED";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub agent: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    MissingSeedValue,
    InvalidSeed { source: &'static str, value: String },
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingSeedValue => write!(f, "--seed requires a value"),
            CliError::InvalidSeed { source, value } => {
                write!(f, "{source}: '{value}' is not a valid u64 seed")
            }
            CliError::UnknownArgument(arg) => write!(f, "unknown argument '{arg}'"),
        }
    }
}

impl std::error::Error for CliError {}

impl CliOptions {
    /// `args` excludes the program name. `env_seed` is the raw value of
    /// [`SEED_ENV`], if set.
    pub fn parse<I>(args: I, env_seed: Option<String>) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--agent" => options.agent = true,
                "--seed" => {
                    let value = args.next().ok_or(CliError::MissingSeedValue)?;
                    options.seed = Some(parse_seed("--seed", value)?);
                }
                _ => return Err(CliError::UnknownArgument(arg)),
            }
        }
        if options.seed.is_none() {
            if let Some(value) = env_seed {
                options.seed = Some(parse_seed(SEED_ENV, value)?);
            }
        }
        Ok(options)
    }
}

fn parse_seed(source: &'static str, value: String) -> Result<u64, CliError> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidSeed { source, value })
}
