use std::fmt::Write as _;

use error_stack::ResultExt;
use json_shape::{
    AdapterRegistration, ResolverConfig, Shape, ShapeResolver, TypeDescription, TypeMirror,
    TypeName, TypeRegistry, describe_type,
};
use serde::Serialize;
use tracing::debug;

use crate::args::{CliArgs, Command, OutputFormat};
use crate::error::{Error, Result};

/// One resolved type expression
#[derive(Debug, Serialize)]
struct ResolvedType {
    #[serde(rename = "type")]
    type_expression: String,
    shape:           Shape,
    #[serde(skip_serializing_if = "Option::is_none")]
    adapters:        Option<Vec<AdapterRegistration>>,
}

/// Run the selected command and return its rendered output
pub fn run(args: &CliArgs) -> Result<String> {
    let mut registry = load_registry(args)?;
    let config = effective_config(args, &registry);
    registry.set_config(config).change_context(Error::Settings)?;
    let config = registry.config();
    debug!(
        "Running with {} declarations, max_depth {}, adapter policy {}",
        registry.len(),
        config.max_depth,
        config.adapter_policy
    );

    match &args.command {
        Command::Resolve { types, report } => {
            let resolved = resolve_types(&registry, types, *report)?;
            render(args.format, resolved.as_slice(), render_resolved_text)
        }
        Command::Describe { names } => {
            let descriptions = names
                .iter()
                .map(|name| {
                    describe_type(&registry, &TypeName::from(name.as_str()))
                        .change_context(Error::Describe(name.clone()))
                })
                .collect::<Result<Vec<_>>>()?;
            render(args.format, descriptions.as_slice(), render_descriptions_text)
        }
        Command::List => render(args.format, &registry.names(), |names| {
            names
                .iter()
                .map(|name| name.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        }),
    }
}

fn load_registry(args: &CliArgs) -> Result<TypeRegistry> {
    let mut registry = if args.no_builtins {
        TypeRegistry::new()
    } else {
        TypeRegistry::with_builtins()
    };
    if let Some(path) = &args.registry {
        registry.load_path(path).change_context(Error::Registry)?;
    }
    Ok(registry)
}

/// Registry settings with command-line overrides applied
fn effective_config(args: &CliArgs, registry: &TypeRegistry) -> ResolverConfig {
    let mut config = registry.config().clone();
    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }
    if let Some(policy) = args.adapter_policy {
        config = config.with_adapter_policy(policy.into());
    }
    config
}

fn resolve_types(
    registry: &TypeRegistry,
    types: &[String],
    report: bool,
) -> Result<Vec<ResolvedType>> {
    let resolver = ShapeResolver::for_registry(registry);

    types
        .iter()
        .map(|source| {
            let type_mirror = source
                .parse::<TypeMirror>()
                .change_context(Error::Resolve(source.clone()))?;
            let resolution = resolver
                .resolve_with_report(&type_mirror)
                .change_context(Error::Resolve(source.clone()))?;
            Ok(ResolvedType {
                type_expression: type_mirror.to_string(),
                shape:           resolution.shape,
                adapters:        report.then_some(resolution.adapters),
            })
        })
        .collect()
}

fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).change_context(Error::Output),
        OutputFormat::Text => Ok(text(value)),
    }
}

fn render_resolved_text(resolved: &[ResolvedType]) -> String {
    let mut out = String::new();
    for resolved_type in resolved {
        let _ = writeln!(out, "{}: {}", resolved_type.type_expression, resolved_type.shape);
        for adapter in resolved_type.adapters.iter().flatten() {
            let _ = writeln!(
                out,
                "  adapter {} -> {}: {}",
                adapter.adapted, adapter.adapting_type, adapter.shape
            );
        }
    }
    out.trim_end().to_string()
}

fn render_descriptions_text(descriptions: &[TypeDescription]) -> String {
    let mut out = String::new();
    for description in descriptions {
        let _ = writeln!(
            out,
            "{} ({}): {}",
            description.name, description.kind, description.shape
        );
        for property in &description.properties {
            let _ = writeln!(
                out,
                "  {}: {} => {}",
                property.name, property.property_type, property.shape
            );
        }
    }
    out.trim_end().to_string()
}
