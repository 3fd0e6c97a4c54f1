use alloc::string::String;
use core::fmt::{
    self,
    Write,
};

use crate::{
    Instruction,
    Operand,
};

fn write_operand<W: Write + ?Sized>(output: &mut W, operand: &Operand) -> fmt::Result {
    match operand {
        Operand::Node(node) => self::write_instruction(output, node),
        Operand::Scalar(value) => write!(output, "{}", value),
        Operand::List(nodes) => {
            output.write_char('(')?;
            for (index, node) in nodes.iter().enumerate() {
                if index > 0 {
                    output.write_str(", ")?;
                }

                self::write_instruction(output, node)?;
            }
            output.write_char(')')
        }
    }
}

/// Write the canonical rendering of `instruction` into `output`.
///
/// The rendering has the form `OPERATION(operand, operand, ...)`. Operands are rendered
/// depth first in declaration order, operand lists as a parenthesized group and scalars
/// by their default textual form.
pub fn write_instruction<W: Write + ?Sized>(
    output: &mut W,
    instruction: &Instruction,
) -> fmt::Result {
    output.write_str(instruction.operation())?;
    output.write_char('(')?;
    for (index, operand) in instruction.operands().iter().enumerate() {
        if index > 0 {
            output.write_str(", ")?;
        }

        self::write_operand(output, operand)?;
    }
    output.write_char(')')
}

/// Render a single instruction into its canonical expression string.
pub fn serialize(instruction: &Instruction) -> String {
    let mut result = String::with_capacity(64);
    /* writing into a string never fails */
    let _ = self::write_instruction(&mut result, instruction);
    result
}

/// Render a function body into the corpus searched by expression patterns.
///
/// Instructions are rendered in program order and joined by a newline.
pub fn serialize_body(instructions: &[Instruction]) -> String {
    let mut result = String::with_capacity(instructions.len() * 64);
    for (index, instruction) in instructions.iter().enumerate() {
        if index > 0 {
            result.push('\n');
        }

        let _ = self::write_instruction(&mut result, instruction);
    }
    result
}

#[cfg(test)]
mod test {
    use alloc::vec;

    use super::{
        serialize,
        serialize_body,
    };
    use crate::{
        Instruction,
        Scalar,
    };

    fn download_check() -> Instruction {
        Instruction::new("IF").with_node(
            Instruction::new("CMP_E")
                .with_node(
                    Instruction::new("CALL")
                        .with_node(Instruction::new("CONST_PTR").with_scalar(4096u64))
                        .with_list(vec![]),
                )
                .with_node(Instruction::new("CONST").with_scalar(0i64)),
        )
    }

    #[test]
    fn test_leaf() {
        assert_eq!(serialize(&Instruction::new("NOP")), "NOP()");
        assert_eq!(
            serialize(&Instruction::new("CONST").with_scalar(-12i64)),
            "CONST(-12)"
        );
        assert_eq!(
            serialize(&Instruction::new("CONST_PTR").with_scalar(0x1000u64)),
            "CONST_PTR(4096)"
        );
        assert_eq!(
            serialize(&Instruction::new("VAR").with_scalar("var_18")),
            "VAR(var_18)"
        );
    }

    #[test]
    fn test_nested_list() {
        let a = Instruction::new("A");
        let b = Instruction::new("B").with_scalar(1u64);
        let c = Instruction::new("C");

        let node = Instruction::new("OP")
            .with_node(a)
            .with_list(vec![b, c]);
        assert_eq!(serialize(&node), "OP(A(), (B(1), C()))");

        let empty = Instruction::new("CALL")
            .with_node(Instruction::new("CONST_PTR").with_scalar(1u64))
            .with_list(vec![]);
        assert_eq!(serialize(&empty), "CALL(CONST_PTR(1), ())");
    }

    #[test]
    fn test_operand_order() {
        let node = Instruction::new("ASSIGN")
            .with_scalar(Scalar::Text("x".into()))
            .with_node(Instruction::new("ADD").with_scalar(1u64).with_scalar(2u64))
            .with_scalar(3u64);
        assert_eq!(serialize(&node), "ASSIGN(x, ADD(1, 2), 3)");
    }

    #[test]
    fn test_deterministic() {
        let node = self::download_check();
        assert_eq!(serialize(&node), serialize(&node.clone()));
        assert_eq!(
            serialize(&node),
            "IF(CMP_E(CALL(CONST_PTR(4096), ()), CONST(0)))"
        );
        assert_eq!(alloc::format!("{}", node), serialize(&node));
    }

    #[test]
    fn test_body() {
        assert_eq!(serialize_body(&[]), "");

        let body = [
            Instruction::new("VAR_INIT").with_scalar("a"),
            self::download_check(),
            Instruction::new("RET"),
        ];
        assert_eq!(
            serialize_body(&body),
            "VAR_INIT(a)\nIF(CMP_E(CALL(CONST_PTR(4096), ()), CONST(0)))\nRET()"
        );
    }
}
