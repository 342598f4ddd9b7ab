use clap::{Parser, ValueEnum};
use formguard_lib::config::DEFAULT_CHECK_URL;
use formguard_lib::signup;
use log::LevelFilter;

/// Fill in the sign-up form, submit it, and report the error annotations.
#[derive(Parser, Debug)]
#[command(name = "formguard", version)]
pub struct Cli {
    /// Base URL of the username availability service.
    #[arg(long, env = "FORMGUARD_CHECK_URL", default_value = DEFAULT_CHECK_URL)]
    pub check_url: String,

    /// Timeout for the availability lookup, in seconds.
    #[arg(long, env = "FORMGUARD_CHECK_TIMEOUT")]
    pub timeout_secs: Option<u64>,

    /// ID of the form element.
    #[arg(long, default_value = signup::FORM_ID)]
    pub form_id: String,

    /// Skip async checks (no availability lookup, no password match).
    #[arg(long)]
    pub skip_checks: bool,

    /// Field value as `name=value`; fields are typed in the given order.
    #[arg(short, long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level written to stderr.
    #[arg(long, default_value = "warn")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    if name.is_empty() {
        return Err(format!("empty field name in {raw:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("login=alice").unwrap(), ("login".into(), "alice".into()));
        assert_eq!(parse_field("note=a=b").unwrap(), ("note".into(), "a=b".into()));
        assert_eq!(parse_field("address=").unwrap(), ("address".into(), String::new()));
        assert!(parse_field("login").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "formguard",
            "--check-url",
            "http://localhost:5000",
            "--skip-checks",
            "-f",
            "login=alice",
            "--field",
            "sex=female",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(cli.skip_checks);
        assert_eq!(cli.form_id, signup::FORM_ID);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.fields.len(), 2);
        assert_eq!(cli.log_level, LevelFilter::Warn);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
