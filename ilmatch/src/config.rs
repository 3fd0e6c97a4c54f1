use std::io::Read;

use ilmatch_core::{
    AddressRadix,
    CatalogError,
    SignatureCatalog,
    TargetDescriptor,
};
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::builtin::DEFAULT_ANCHOR;

/// Options controlling how binaries are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOptions {
    /// Text searched within the binary to locate the function which will be analyzed.
    pub anchor: String,

    /// Numeric base of the captured addresses.
    pub radix: AddressRadix,

    /// Number of binaries analyzed in parallel.
    /// Defaults to the number of logical CPUs minus one.
    pub workers: Option<usize>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.to_string(),
            radix: AddressRadix::Decimal,
            workers: None,
        }
    }
}

impl DriverOptions {
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(|| num_cpus::get().saturating_sub(1))
            .max(1)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Catalog(CatalogError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    pub variants: Vec<String>,
}

/// Textual description of a [SignatureCatalog].
///
/// ```json
/// { "targets": [ { "name": "CL_GetDownloadQueueSize", "variants": ["HLIL_CALL(HLIL_CONST_PTR(??), ())"] } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub targets: Vec<TargetConfig>,
}

impl CatalogConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Compile every pattern variant and build the catalog.
    pub fn compile(&self) -> Result<SignatureCatalog, ConfigError> {
        let targets = self
            .targets
            .iter()
            .map(|target| TargetDescriptor::compile(target.name.as_str(), &target.variants))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ConfigError::Catalog)?;

        SignatureCatalog::new(targets).map_err(ConfigError::Catalog)
    }
}
