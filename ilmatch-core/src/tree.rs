use alloc::{
    borrow::Cow,
    string::String,
    vec::Vec,
};
use core::fmt::{
    self,
    Display,
};

/// A scalar leaf operand of an [Instruction].
///
/// Scalars are rendered by their default textual form:
/// integers as decimal digits and text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signed(value) => write!(f, "{}", value),
            Self::Unsigned(value) => write!(f, "{}", value),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Signed(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A single operand of an [Instruction].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A nested child instruction.
    Node(Instruction),

    /// An ordered list of child instructions (e.g. call arguments).
    /// Rendered as a parenthesized group, even when empty.
    List(Vec<Instruction>),

    /// A leaf value.
    Scalar(Scalar),
}

impl From<Instruction> for Operand {
    fn from(value: Instruction) -> Self {
        Self::Node(value)
    }
}

impl From<Vec<Instruction>> for Operand {
    fn from(value: Vec<Instruction>) -> Self {
        Self::List(value)
    }
}

impl From<Scalar> for Operand {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

/// One node of a decompiled instruction tree.
///
/// The analysis engine owns the real node types. Engines convert their nodes into
/// this model so they can be rendered and searched by expression patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instruction {
    operation: Cow<'static, str>,
    operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(operation: impl Into<Cow<'static, str>>) -> Self {
        Self {
            operation: operation.into(),
            operands: Vec::new(),
        }
    }

    pub fn with_operands(
        operation: impl Into<Cow<'static, str>>,
        operands: impl IntoIterator<Item = Operand>,
    ) -> Self {
        Self {
            operation: operation.into(),
            operands: operands.into_iter().collect(),
        }
    }

    /// Append a nested child instruction.
    pub fn with_node(mut self, node: Instruction) -> Self {
        self.operands.push(Operand::Node(node));
        self
    }

    /// Append an operand list.
    pub fn with_list(mut self, nodes: impl IntoIterator<Item = Instruction>) -> Self {
        self.operands
            .push(Operand::List(nodes.into_iter().collect()));
        self
    }

    /// Append a scalar leaf.
    pub fn with_scalar(mut self, value: impl Into<Scalar>) -> Self {
        self.operands.push(Operand::Scalar(value.into()));
        self
    }

    /// Name of the operation discriminant, e.g. `HLIL_CALL`.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::serializer::write_instruction(f, self)
    }
}
