use crate::geometry::ProbeMode;
use clap::Parser;
use std::path::PathBuf;

/// Command-line options
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tilde", version, about = "Full-screen raw-mode terminal front end")]
pub struct Config {
    /// Write a log to this file.  Nothing is logged otherwise, since
    /// the terminal itself is in use.  Filter with RUST_LOG.
    #[arg(long, value_name = "PATH", env = "TILDE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// How to find the terminal size
    #[arg(long, value_enum, default_value_t = ProbeMode::Auto)]
    pub probe: ProbeMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["tilde"]).unwrap();
        assert_eq!(cfg.probe, ProbeMode::Auto);
    }

    #[test]
    fn options() {
        let args = ["tilde", "--log-file", "/tmp/t.log", "--probe", "cursor-report"];
        let cfg = Config::try_parse_from(args).unwrap();
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/t.log")));
        assert_eq!(cfg.probe, ProbeMode::CursorReport);
    }

    #[test]
    fn rejects_unknown_probe() {
        assert!(Config::try_parse_from(["tilde", "--probe", "guess"]).is_err());
    }

    #[test]
    fn command_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
