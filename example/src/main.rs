use std::{
    error::Error,
    path::{
        Path,
        PathBuf,
    },
};

use ilmatch::{
    builtin::{
        download_catalog,
        DEFAULT_ANCHOR,
    },
    resolve_batch,
    AnalysisEngine,
    DriverOptions,
    EngineLoader,
    Instruction,
    SignatureError,
    SignatureGenerator,
};

/// A single pre-decompiled function standing in for a real analysis engine.
struct StaticEngine {
    body: Vec<Instruction>,
}

impl AnalysisEngine for StaticEngine {
    type Function = u64;

    fn find_text(&self, needle: &str) -> Option<u64> {
        (needle == DEFAULT_ANCHOR).then_some(0x5000)
    }

    fn function_containing(&self, _address: u64) -> Option<u64> {
        Some(0x1000)
    }

    fn function_at(&self, address: u64) -> Option<u64> {
        Some(address)
    }

    fn instructions(&self, function: &u64) -> Vec<Instruction> {
        if *function == 0x1000 {
            self.body.clone()
        } else {
            Vec::new()
        }
    }
}

struct StaticLoader;

impl EngineLoader for StaticLoader {
    type Engine = StaticEngine;

    fn open(&self, _binary: &Path) -> Result<StaticEngine, Box<dyn Error + Send + Sync>> {
        /*
         * if (CL_GetDownloadQueueSize() == 0)
         * eax = CL_DownloadUpdate()
         */
        let body = vec![
            Instruction::new("HLIL_IF").with_node(
                Instruction::new("HLIL_CMP_E")
                    .with_node(
                        Instruction::new("HLIL_CALL")
                            .with_node(Instruction::new("HLIL_CONST_PTR").with_scalar(4096u64))
                            .with_list([]),
                    )
                    .with_node(Instruction::new("HLIL_CONST").with_scalar(0i64)),
            ),
            Instruction::new("HLIL_ASSIGN")
                .with_node(Instruction::new("HLIL_VAR").with_scalar("eax"))
                .with_node(
                    Instruction::new("HLIL_CALL")
                        .with_node(Instruction::new("HLIL_CONST_PTR").with_scalar(8192u64))
                        .with_list([]),
                ),
        ];

        Ok(StaticEngine { body })
    }
}

struct NoSignature;

impl SignatureGenerator<u64> for NoSignature {
    fn generate(&self, _function: &u64) -> Result<String, SignatureError> {
        Err(SignatureError::new("no signature library attached"))
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let catalog = match download_catalog() {
        Ok(catalog) => catalog,
        Err(error) => {
            log::error!("{}", error);
            return;
        }
    };

    let binaries = [PathBuf::from("./bin/engine.dll")];
    let reports = match resolve_batch(
        &StaticLoader,
        &binaries,
        &catalog,
        &DriverOptions::default(),
        &NoSignature,
    ) {
        Ok(reports) => reports,
        Err(error) => {
            log::error!("{}", error);
            return;
        }
    };

    for report in reports {
        println!("{}", report);
    }
}
