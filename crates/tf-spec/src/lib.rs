//! tf-spec: loop description file format and validation.

pub mod schema;
pub mod validate;

use std::path::Path;

use tf_controls::TransferFunctionSpec;
use tracing::debug;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_spec};

pub type SpecResult<T> = Result<T, SpecError>;

#[derive(thiserror::Error, Debug)]
pub enum SpecError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported file format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: String },

    #[error("Constant error: {0}")]
    Constant(#[from] tf_expr::ConstantError),

    #[error("Expression error: {0}")]
    Expr(#[from] tf_expr::ExprError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_json_str(content: &str) -> SpecResult<TransferSpecDef> {
    let spec: TransferSpecDef = serde_json::from_str(content)?;
    validate_spec(&spec)?;
    Ok(spec)
}

pub fn parse_yaml_str(content: &str) -> SpecResult<TransferSpecDef> {
    let spec: TransferSpecDef = serde_yaml::from_str(content)?;
    validate_spec(&spec)?;
    Ok(spec)
}

pub fn load_yaml(path: &Path) -> SpecResult<TransferSpecDef> {
    let content = std::fs::read_to_string(path)?;
    let spec = parse_yaml_str(&content)?;
    debug!(path = %path.display(), plants = spec.plants.len(), "loaded loop description");
    Ok(spec)
}

pub fn save_yaml(path: &Path, spec: &TransferSpecDef) -> SpecResult<()> {
    validate_spec(spec)?;
    let content = serde_yaml::to_string(spec)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> SpecResult<TransferSpecDef> {
    let content = std::fs::read_to_string(path)?;
    let spec = parse_json_str(&content)?;
    debug!(path = %path.display(), plants = spec.plants.len(), "loaded loop description");
    Ok(spec)
}

pub fn save_json(path: &Path, spec: &TransferSpecDef) -> SpecResult<()> {
    validate_spec(spec)?;
    let content = serde_json::to_string_pretty(spec)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by file extension.
pub fn load(path: &Path) -> SpecResult<TransferSpecDef> {
    match extension(path).as_deref() {
        Some("json") => load_json(path),
        Some("yaml" | "yml") => load_yaml(path),
        _ => Err(SpecError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Save by file extension.
pub fn save(path: &Path, spec: &TransferSpecDef) -> SpecResult<()> {
    match extension(path).as_deref() {
        Some("json") => save_json(path, spec),
        Some("yaml" | "yml") => save_yaml(path, spec),
        _ => Err(SpecError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Load and convert straight to the in-memory loop description.
pub fn load_spec(path: &Path) -> SpecResult<TransferFunctionSpec> {
    load(path)?.to_spec()
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
