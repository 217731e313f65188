use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use api::{DEFAULT_CORS_ORIGIN, HeaderValue};

pub const DEFAULT_DB_URL: &str = "sqlite://fitness.sqlite3";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidPort { raw: String },
    InvalidHost { raw: String },
    InvalidCorsOrigin { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidPort { raw } => write!(f, "invalid --port value: {raw}"),
            ArgsError::InvalidHost { raw } => write!(f, "invalid --host value: {raw}"),
            ArgsError::InvalidCorsOrigin { raw } => {
                write!(f, "invalid --cors-origin value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Migrate,
    Help,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "serve" => Some(Self::Serve),
            "migrate" => Some(Self::Migrate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub db_url: String,
    pub address: SocketAddr,
    pub cors_origin: HeaderValue,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [serve]  [--db <sqlite_url>] [--host <ip>] [--port <port>] [--cors-origin <origin>]");
    eprintln!("  app migrate  [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --host 0.0.0.0");
    eprintln!("  --port {DEFAULT_PORT}");
    eprintln!("  --cors-origin {DEFAULT_CORS_ORIGIN}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FITNESS_DB_URL, FITNESS_HOST, FITNESS_PORT, FITNESS_CORS_ORIGIN, RUST_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_db_url(value: String) -> Result<String, ArgsError> {
    if value.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: value });
    }
    Ok(normalize_sqlite_url(value))
}

fn parse_port(value: String) -> Result<u16, ArgsError> {
    value
        .trim()
        .parse()
        .map_err(|_| ArgsError::InvalidPort { raw: value })
}

fn parse_host(value: String) -> Result<IpAddr, ArgsError> {
    value
        .trim()
        .parse()
        .map_err(|_| ArgsError::InvalidHost { raw: value })
}

fn parse_origin(value: String) -> Result<HeaderValue, ArgsError> {
    HeaderValue::from_str(value.trim()).map_err(|_| ArgsError::InvalidCorsOrigin { raw: value })
}

impl Config {
    /// Parse `args` (without the program name), falling back to `env` and
    /// then to defaults. Flags win over environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown arguments or values that do not parse.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut args = args.into_iter().peekable();

        let mut command = match args.peek().map(String::as_str) {
            None => Command::Serve,
            Some("--help" | "-h") => Command::Help,
            Some(first) if first.starts_with("--") => Command::Serve,
            Some(first) => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_owned()))?;
                args.next();
                command
            }
        };

        let mut db_url = env("FITNESS_DB_URL")
            .map_or_else(|| Ok(DEFAULT_DB_URL.to_owned()), parse_db_url)?;
        let mut port = env("FITNESS_PORT").map_or(Ok(DEFAULT_PORT), parse_port)?;
        let mut host = env("FITNESS_HOST")
            .map_or(Ok(IpAddr::V4(Ipv4Addr::UNSPECIFIED)), parse_host)?;
        let mut cors_origin = env("FITNESS_CORS_ORIGIN").map_or_else(
            || Ok(HeaderValue::from_static(DEFAULT_CORS_ORIGIN)),
            parse_origin,
        )?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_url = parse_db_url(require_value(&mut args, "--db")?)?,
                "--port" => port = parse_port(require_value(&mut args, "--port")?)?,
                "--host" => host = parse_host(require_value(&mut args, "--host")?)?,
                "--cors-origin" => {
                    cors_origin = parse_origin(require_value(&mut args, "--cors-origin")?)?;
                }
                "--help" | "-h" => command = Command::Help,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            command,
            db_url,
            address: SocketAddr::new(host, port),
            cors_origin,
        })
    }
}

/// Turns relative paths and `sqlite:` prefixes into absolute `sqlite://` URLs.
pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file and its parent directory so sqlx can open it.
///
/// # Errors
///
/// Returns an error if the URL has no path or the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_to_serve() {
        let config = Config::parse(Vec::new(), no_env).unwrap();
        assert_eq!(config.command, Command::Serve);
        assert_eq!(config.db_url, DEFAULT_DB_URL);
        assert_eq!(config.address, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
    }

    #[test]
    fn flags_override_env() {
        let env = |key: &str| match key {
            "FITNESS_PORT" => Some("9000".to_owned()),
            "FITNESS_HOST" => Some("127.0.0.1".to_owned()),
            _ => None,
        };
        let config = Config::parse(args(&["serve", "--port", "9100"]), env).unwrap();
        assert_eq!(config.address, "127.0.0.1:9100".parse().unwrap());
    }

    #[test]
    fn migrate_subcommand_is_recognized() {
        let config =
            Config::parse(args(&["migrate", "--db", "sqlite::memory:"]), no_env).unwrap();
        assert_eq!(config.command, Command::Migrate);
        assert_eq!(config.db_url, "sqlite::memory:");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            Config::parse(args(&["--port", "eighty"]), no_env),
            Err(ArgsError::InvalidPort { .. })
        ));
        assert!(matches!(
            Config::parse(args(&["--host", "localhost"]), no_env),
            Err(ArgsError::InvalidHost { .. })
        ));
        assert!(matches!(
            Config::parse(args(&["--db"]), no_env),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(matches!(
            Config::parse(args(&["train"]), no_env),
            Err(ArgsError::UnknownCommand(_))
        ));
        assert!(matches!(
            Config::parse(args(&["--verbose"]), no_env),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/fit.db".to_owned());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/fit.db"));
        assert_eq!(
            normalize_sqlite_url("sqlite://already.db".to_owned()),
            "sqlite://already.db"
        );
    }
}
