use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// `RUST_LOG` if set, otherwise warnings only.
    Default,
    Verbose,
    Debug,
}

impl LogLevel {
    pub fn from_flags(debug: bool, verbose: bool) -> Self {
        if debug {
            Self::Debug
        } else if verbose {
            Self::Verbose
        } else {
            Self::Default
        }
    }

    fn filter(self) -> EnvFilter {
        match self {
            Self::Debug => EnvFilter::new("warn,ynab_cli=debug,reqwest=debug"),
            Self::Verbose => EnvFilter::new("warn,ynab_cli=info"),
            Self::Default => {
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
            }
        }
    }
}

/// Logs go to stderr so command output on stdout stays clean.
pub fn init(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level.filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
