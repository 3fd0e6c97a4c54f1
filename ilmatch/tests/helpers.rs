#![allow(dead_code)]

use std::{
    collections::HashMap,
    error::Error,
    path::Path,
};

use ilmatch::{
    AnalysisEngine,
    EngineLoader,
    Instruction,
    SignatureError,
    SignatureGenerator,
};

/// A function is identified by its start address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(pub u64);

/// In-memory stand in for a decompiled binary.
#[derive(Debug, Default, Clone)]
pub struct MockEngine {
    pub strings: HashMap<String, u64>,
    pub string_owner: HashMap<u64, FunctionId>,
    pub functions: HashMap<FunctionId, Vec<Instruction>>,
}

impl MockEngine {
    pub fn with_anchor(mut self, anchor: &str, address: u64, owner: u64) -> Self {
        self.strings.insert(anchor.to_string(), address);
        self.string_owner.insert(address, FunctionId(owner));
        self
    }

    pub fn with_function(mut self, address: u64, body: Vec<Instruction>) -> Self {
        self.functions.insert(FunctionId(address), body);
        self
    }
}

impl AnalysisEngine for MockEngine {
    type Function = FunctionId;

    fn find_text(&self, needle: &str) -> Option<u64> {
        self.strings.get(needle).copied()
    }

    fn function_containing(&self, address: u64) -> Option<FunctionId> {
        self.string_owner.get(&address).copied()
    }

    fn function_at(&self, address: u64) -> Option<FunctionId> {
        let function = FunctionId(address);
        self.functions.contains_key(&function).then_some(function)
    }

    fn instructions(&self, function: &FunctionId) -> Vec<Instruction> {
        self.functions.get(function).cloned().unwrap_or_default()
    }
}

/// Loads engines from a fixed table keyed by the binary file name.
#[derive(Debug, Default)]
pub struct MockLoader {
    pub binaries: HashMap<String, MockEngine>,
}

impl EngineLoader for MockLoader {
    type Engine = MockEngine;

    fn open(&self, binary: &Path) -> Result<MockEngine, Box<dyn Error + Send + Sync>> {
        let name = binary.to_string_lossy().to_string();
        self.binaries
            .get(&name)
            .cloned()
            .ok_or_else(|| format!("unknown binary {}", name).into())
    }
}

/// Renders the function address as its "signature".
pub struct AddressSignature;

impl SignatureGenerator<FunctionId> for AddressSignature {
    fn generate(&self, function: &FunctionId) -> Result<String, SignatureError> {
        if function.0 == 0 {
            return Err(SignatureError::new("function too small"));
        }

        Ok(format!("{:02X} ??", function.0 & 0xFF))
    }
}

pub fn const_ptr(address: u64) -> Instruction {
    Instruction::new("HLIL_CONST_PTR").with_scalar(address)
}

pub fn var(name: &str) -> Instruction {
    Instruction::new("HLIL_VAR").with_scalar(name)
}

pub fn call(address: u64, arguments: Vec<Instruction>) -> Instruction {
    Instruction::new("HLIL_CALL")
        .with_node(self::const_ptr(address))
        .with_list(arguments)
}

/// `if (function() == 0)`
pub fn if_call_is_zero(address: u64) -> Instruction {
    Instruction::new("HLIL_IF").with_node(
        Instruction::new("HLIL_CMP_E")
            .with_node(self::call(address, vec![]))
            .with_node(Instruction::new("HLIL_CONST").with_scalar(0i64)),
    )
}

/// Body of the anchor function as seen in a linux x64 build.
pub fn linux_body() -> Vec<Instruction> {
    vec![
        Instruction::new("HLIL_VAR_INIT")
            .with_node(self::var("rbx"))
            .with_node(Instruction::new("HLIL_CONST").with_scalar(0i64)),
        self::if_call_is_zero(4096),
        Instruction::new("HLIL_IF").with_node(
            Instruction::new("HLIL_AND")
                .with_node(
                    Instruction::new("HLIL_CMP_NE")
                        .with_node(self::var("rbx"))
                        .with_node(Instruction::new("HLIL_CONST").with_scalar(0i64)),
                )
                .with_node(
                    Instruction::new("HLIL_CMP_E")
                        .with_node(self::call(8192, vec![]))
                        .with_node(Instruction::new("HLIL_CONST").with_scalar(0i64)),
                ),
        ),
        self::call(12288, vec![self::var("rdi"), self::var("rsi")]),
    ]
}

/// Body of the anchor function as seen in a windows x86 build.
pub fn windows_x86_body() -> Vec<Instruction> {
    vec![
        self::if_call_is_zero(20480),
        Instruction::new("HLIL_ASSIGN")
            .with_node(self::var("eax"))
            .with_node(self::call(24576, vec![])),
        self::call(
            28672,
            vec![
                self::var("arg1"),
                self::var("arg2"),
                self::var("arg3"),
                self::var("arg4"),
                self::var("arg5"),
            ],
        ),
    ]
}
