use clap::ValueEnum;
use strum::AsRefStr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Tracing levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TracingLevel {
    /// Errors only
    Error,
    /// Depth-limit and registry problems
    #[default]
    Warn,
    /// Registry loading
    Info,
    /// Override and cycle decisions
    Debug,
    /// Every resolution step
    Trace,
}

impl TracingLevel {
    /// Filter from `RUST_LOG` when set, otherwise from this level
    pub fn env_filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.as_ref()))
    }

    /// Install a stderr fmt layer so stdout carries only command output
    pub fn init_stderr_tracing(self) {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);

        let subscriber = Registry::default()
            .with(self.env_filter())
            .with(stderr_layer);

        if let Err(e) = subscriber.try_init() {
            eprintln!("Tracing was already initialized: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert_eq!(TracingLevel::Error.as_ref(), "error");
        assert_eq!(TracingLevel::Warn.as_ref(), "warn");
        assert_eq!(TracingLevel::Trace.as_ref(), "trace");
        assert_eq!(TracingLevel::default(), TracingLevel::Warn);
    }
}
