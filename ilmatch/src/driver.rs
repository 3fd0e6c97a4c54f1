use std::path::{
    Path,
    PathBuf,
};

use ilmatch_core::{
    serialize_body,
    AddressResolution,
    Instruction,
    SignatureCatalog,
};
use log::{
    debug,
    info,
    warn,
};
use rayon::prelude::*;
use thiserror::Error;

use crate::{
    BinaryReport,
    DriverOptions,
    TargetOutcome,
    TargetReport,
};

/// The program analysis engine providing decompiled functions of a binary.
pub trait AnalysisEngine {
    /// Handle to a function known to the engine.
    type Function;

    /// Returns the address of the first occurrence of `needle` within the binary.
    fn find_text(&self, needle: &str) -> Option<u64>;

    /// Returns the function whose body contains or references `address`.
    fn function_containing(&self, address: u64) -> Option<Self::Function>;

    /// Returns the function starting at `address`.
    fn function_at(&self, address: u64) -> Option<Self::Function>;

    /// Returns the decompiled top level instructions of the function in program order.
    fn instructions(&self, function: &Self::Function) -> Vec<Instruction>;
}

/// Opens binaries into an [AnalysisEngine].
///
/// Every binary gets its own engine and engines are never shared between workers.
pub trait EngineLoader: Sync {
    type Engine: AnalysisEngine;

    fn open(&self, binary: &Path) -> Result<Self::Engine, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct SignatureError {
    message: String,
}

impl SignatureError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Generates a byte signature for a resolved function.
pub trait SignatureGenerator<F>: Sync {
    fn generate(&self, function: &F) -> Result<String, SignatureError>;
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to open binary: {0}")]
    Open(Box<dyn std::error::Error + Send + Sync>),

    #[error("anchor text {anchor:?} not found")]
    AnchorNotFound { anchor: String },

    #[error("no function references the anchor text at 0x{address:x}")]
    AnchorOutsideFunction { address: u64 },

    #[error("failed to create the worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Resolve every catalog target within the body of `function`.
///
/// The function body is serialized once and every target is resolved independently.
/// A variant capturing something which is not an address does not apply and the next
/// variant is tried. Targets without an address or without a function at that address
/// are left unresolved.
pub fn resolve_function<E, G>(
    engine: &E,
    function: &E::Function,
    catalog: &SignatureCatalog,
    options: &DriverOptions,
    generator: &G,
) -> Vec<TargetReport>
where
    E: AnalysisEngine,
    G: SignatureGenerator<E::Function> + ?Sized,
{
    let instructions = engine.instructions(function);
    let corpus = serialize_body(&instructions);
    debug!(
        "Serialized {} instructions into {} bytes",
        instructions.len(),
        corpus.len()
    );

    catalog
        .targets()
        .iter()
        .map(|descriptor| {
            let target = descriptor.name().to_string();
            let (result, address) = match descriptor.resolve_address(&corpus, options.radix) {
                AddressResolution::Resolved { matched, address } => (matched, address),
                AddressResolution::InvalidCapture { matched, error } => {
                    warn!("{}: {}", target, error);
                    return TargetReport {
                        target,
                        outcome: TargetOutcome::InvalidCapture {
                            variant: matched.variant(),
                            pattern: matched.pattern().source().to_string(),
                            capture: matched.capture().to_string(),
                            reason: error.to_string(),
                        },
                    };
                }
                AddressResolution::Unresolved => {
                    debug!("{}: no pattern variant matched", target);
                    return TargetReport {
                        target,
                        outcome: TargetOutcome::Unresolved,
                    };
                }
            };

            let variant = result.variant();
            let pattern = result.pattern().source().to_string();
            let Some(function) = engine.function_at(address) else {
                warn!("{}: no function at 0x{:x}", target, address);
                return TargetReport {
                    target,
                    outcome: TargetOutcome::FunctionNotFound {
                        variant,
                        pattern,
                        address,
                    },
                };
            };

            let signature = match generator.generate(&function) {
                Ok(signature) => Some(signature),
                Err(error) => {
                    warn!("{}: failed to generate signature: {}", target, error);
                    None
                }
            };

            info!("{} => 0x{:x} (variant {})", target, address, variant);
            TargetReport {
                target,
                outcome: TargetOutcome::Resolved {
                    variant,
                    pattern,
                    address,
                    signature,
                },
            }
        })
        .collect()
}

/// Locate the anchor function of a binary and resolve every catalog target within it.
pub fn resolve_binary<E, G>(
    engine: &E,
    catalog: &SignatureCatalog,
    options: &DriverOptions,
    generator: &G,
) -> Result<Vec<TargetReport>, DriverError>
where
    E: AnalysisEngine,
    G: SignatureGenerator<E::Function> + ?Sized,
{
    let address = engine
        .find_text(&options.anchor)
        .ok_or_else(|| DriverError::AnchorNotFound {
            anchor: options.anchor.clone(),
        })?;

    let function = engine
        .function_containing(address)
        .ok_or(DriverError::AnchorOutsideFunction { address })?;

    Ok(self::resolve_function(
        engine, &function, catalog, options, generator,
    ))
}

/// Resolve a batch of binaries in parallel.
///
/// Every binary is analyzed in isolation. A binary which fails does not affect the others
/// and reports are returned in the order of `binaries`.
pub fn resolve_batch<L, G>(
    loader: &L,
    binaries: &[PathBuf],
    catalog: &SignatureCatalog,
    options: &DriverOptions,
    generator: &G,
) -> Result<Vec<BinaryReport>, DriverError>
where
    L: EngineLoader,
    G: SignatureGenerator<<L::Engine as AnalysisEngine>::Function> + ?Sized,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.worker_count())
        .build()?;

    debug!(
        "Resolving {} binaries with {} targets on {} workers",
        binaries.len(),
        catalog.len(),
        pool.current_num_threads()
    );

    let reports: Vec<BinaryReport> = pool.install(|| {
        binaries
            .par_iter()
            .map(|binary| {
                let targets = loader
                    .open(binary)
                    .map_err(DriverError::Open)
                    .and_then(|engine| resolve_binary(&engine, catalog, options, generator));

                if let Err(error) = &targets {
                    warn!("{}: {}", binary.display(), error);
                }

                BinaryReport {
                    binary: binary.clone(),
                    targets,
                }
            })
            .collect()
    });

    Ok(reports)
}
