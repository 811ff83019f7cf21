//! Command-line argument parsing
//!
//! Flags mirror the dotted keys of `config.json`. A flag only overrides
//! file and environment values when it is given explicitly on the command
//! line; the defaults shown by `--help` are the built-in defaults.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};

/// Geolocator - resolve IP addresses and hostnames to geographic metadata
#[derive(Parser, Debug, Clone)]
#[command(name = "geolocator")]
#[command(version)]
#[command(about = "Resolve IP addresses and hostnames to geographic metadata", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.json next to the executable)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// server ip address, empty to bind all interfaces
    #[arg(long = "server.ip", default_value = "127.0.0.1")]
    pub server_ip: String,

    /// server port
    #[arg(long = "server.port", default_value_t = 8000)]
    pub server_port: u16,

    /// the password to allow access to the server via http requests
    #[arg(long = "server.password", default_value = "")]
    pub server_password: String,

    /// the database file that contains GeoIP information
    #[arg(long = "database.file", default_value = "")]
    pub database_file: String,
}

/// 命令行中显式给出的参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagOverrides {
    pub server_ip: Option<String>,
    pub server_port: Option<u16>,
    pub server_password: Option<String>,
    pub database_file: Option<String>,
}

impl Cli {
    /// Parse arguments and collect the flags that were explicitly supplied
    ///
    /// # Examples
    /// ```
    /// use geolocator::config::Cli;
    /// let (_, overrides) = Cli::try_parse_args(["geolocator", "--server.port", "9000"]).unwrap();
    /// assert_eq!(overrides.server_port, Some(9000));
    /// assert_eq!(overrides.server_ip, None);
    /// ```
    pub fn try_parse_args<I, T>(args: I) -> Result<(Self, FlagOverrides), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let cli = Self::from_arg_matches(&matches)?;
        let overrides = cli.explicit_overrides(&matches);
        Ok((cli, overrides))
    }

    fn explicit_overrides(&self, matches: &ArgMatches) -> FlagOverrides {
        let explicit = |id: &str| matches.value_source(id) == Some(ValueSource::CommandLine);

        FlagOverrides {
            server_ip: explicit("server_ip").then(|| self.server_ip.clone()),
            server_port: explicit("server_port").then_some(self.server_port),
            server_password: explicit("server_password").then(|| self.server_password.clone()),
            database_file: explicit("database_file").then(|| self.database_file.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_no_overrides() {
        let (cli, overrides) = Cli::try_parse_args(["geolocator"]).unwrap();
        assert_eq!(overrides, FlagOverrides::default());
        assert_eq!(cli.server_ip, "127.0.0.1");
        assert_eq!(cli.server_port, 8000);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_all_flags() {
        let (_, overrides) = Cli::try_parse_args([
            "geolocator",
            "--server.ip",
            "0.0.0.0",
            "--server.port=9000",
            "--server.password",
            "secret",
            "--database.file",
            "/data/GeoLite2-City.mmdb",
        ])
        .unwrap();

        assert_eq!(overrides.server_ip.as_deref(), Some("0.0.0.0"));
        assert_eq!(overrides.server_port, Some(9000));
        assert_eq!(overrides.server_password.as_deref(), Some("secret"));
        assert_eq!(
            overrides.database_file.as_deref(),
            Some("/data/GeoLite2-City.mmdb")
        );
    }

    #[test]
    fn test_explicit_default_value_still_overrides() {
        let (_, overrides) =
            Cli::try_parse_args(["geolocator", "--server.ip", "127.0.0.1"]).unwrap();
        assert_eq!(overrides.server_ip.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_config_path_flag() {
        let (cli, _) = Cli::try_parse_args(["geolocator", "-c", "custom.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.json")));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_args(["geolocator", "--server.port", "http"]).is_err());
    }

    #[test]
    fn test_help_shows_defaults() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("--server.port"));
        assert!(help.contains("8000"));
        assert!(help.contains("127.0.0.1"));
    }
}
