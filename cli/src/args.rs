use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use json_shape::AdapterPolicy;

use crate::logging::TracingLevel;

/// CLI arguments for the json-shape binary.
#[derive(Parser, Debug)]
#[command(
    name = "json-shape",
    version,
    about = "Resolve the JSON shape of Java types from a type registry"
)]
pub struct CliArgs {
    /// Registry document to load on top of the built-in declarations.
    #[arg(short, long, global = true)]
    pub registry: Option<PathBuf>,

    /// Start from an empty registry instead of the JDK collection declarations.
    #[arg(long, global = true)]
    pub no_builtins: bool,

    /// Maximum resolution depth, overriding the registry's resolver settings.
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// How adapters affect resolved shapes, overriding the registry's resolver settings.
    #[arg(long, value_enum, global = true)]
    pub adapter_policy: Option<AdapterPolicyArg>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Log level for diagnostics on stderr. Ignored when RUST_LOG is set.
    #[arg(long, value_enum, default_value_t = TracingLevel::Warn, global = true)]
    pub log_level: TracingLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve the JSON shape of type expressions.
    Resolve {
        /// Type expressions, e.g. 'java.util.List<java.lang.String>'.
        #[arg(required = true)]
        types:  Vec<String>,
        /// Also report the adapters resolved along the way.
        #[arg(long)]
        report: bool,
    },
    /// Describe registered types and the shape of each property.
    Describe {
        /// Qualified names of registered types.
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List registered type names.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// One line per result.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdapterPolicyArg {
    /// Adapters are resolved and recorded but never change a shape.
    SideEffectOnly,
    /// The adapting type's shape is used when nothing else produces one.
    UseAdaptingShape,
}

impl From<AdapterPolicyArg> for AdapterPolicy {
    fn from(policy: AdapterPolicyArg) -> Self {
        match policy {
            AdapterPolicyArg::SideEffectOnly => Self::SideEffectOnly,
            AdapterPolicyArg::UseAdaptingShape => Self::UseAdaptingShape,
        }
    }
}
