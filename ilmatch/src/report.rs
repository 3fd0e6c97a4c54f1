use std::{
    fmt::{
        self,
        Display,
    },
    path::PathBuf,
};

use crate::DriverError;

/// Outcome of resolving one target within one binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// A pattern variant matched and the capture resolved to a function.
    Resolved {
        variant: usize,
        pattern: String,
        address: u64,
        signature: Option<String>,
    },

    /// No pattern variant matched.
    Unresolved,

    /// A pattern variant matched but the capture is not an address.
    InvalidCapture {
        variant: usize,
        pattern: String,
        capture: String,
        reason: String,
    },

    /// The captured address does not belong to a function.
    FunctionNotFound {
        variant: usize,
        pattern: String,
        address: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub target: String,
    pub outcome: TargetOutcome,
}

impl TargetReport {
    pub fn address(&self) -> Option<u64> {
        match &self.outcome {
            TargetOutcome::Resolved { address, .. } => Some(*address),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.outcome, TargetOutcome::Resolved { .. })
    }
}

impl Display for TargetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            TargetOutcome::Resolved {
                address,
                signature,
                ..
            } => {
                write!(f, "{} => 0x{:x}", self.target, address)?;
                if let Some(signature) = signature {
                    write!(f, "\n~ sig: {}", signature)?;
                }
                Ok(())
            }
            TargetOutcome::Unresolved => write!(f, "{} unresolved", self.target),
            TargetOutcome::InvalidCapture { reason, .. } => {
                write!(f, "{} unresolved ({})", self.target, reason)
            }
            TargetOutcome::FunctionNotFound { address, .. } => write!(
                f,
                "{} unresolved (no function at 0x{:x})",
                self.target, address
            ),
        }
    }
}

/// Resolution results of a single binary.
#[derive(Debug)]
pub struct BinaryReport {
    pub binary: PathBuf,
    pub targets: Result<Vec<TargetReport>, DriverError>,
}

impl BinaryReport {
    /// Returns the address of the target if it has been resolved.
    pub fn address(&self, target: &str) -> Option<u64> {
        self.targets
            .as_ref()
            .ok()?
            .iter()
            .find(|report| report.target == target)?
            .address()
    }
}

impl Display for BinaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets = match &self.targets {
            Ok(targets) => targets,
            Err(error) => return write!(f, "~ {}: {}", self.binary.display(), error),
        };

        for (index, target) in targets.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }

            write!(f, "~ {}:{}", self.binary.display(), target)?;
        }

        Ok(())
    }
}
