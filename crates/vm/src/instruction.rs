//! Instruction representation for the RookScript VM.
//!
//! Each instruction carries exactly the operands its opcode needs, so
//! execution never inspects or re-types an operand. Label operands stay
//! symbolic; they resolve against the program's label table at execution
//! time, and a missing label is a fatal execution error.

use std::fmt;

use crate::value::Value;

/// A literal operand embedded in an instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// The explicit null marker.
    Null,
    /// A boolean literal.
    Boolean(bool),
    /// An integer literal.
    Integer(i64),
    /// A float literal.
    Float(f64),
    /// A string literal.
    String(String),
}

impl Literal {
    /// Materializes this literal as a runtime value.
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Integer(i) => Value::Integer(*i),
            Literal::Float(f) => Value::Float(*f),
            Literal::String(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Integer(i) => write!(f, "{i}"),
            Literal::Float(v) => write!(f, "{v:?}"),
            Literal::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

/// Represents an instruction in the RookScript VM.
///
/// Stack effects are listed as `arguments -> results`, top of stack last.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// No operation.
    Noop,

    /// Pops the top activation frame. Popping the final frame ends the
    /// instance; otherwise execution resumes at the frame's return index.
    Return,

    /// Pushes a frame returning to the next instruction and jumps to the
    /// label.
    Call { label: String },

    /// Jumps to the label.
    Jump { label: String },

    /// `value ->` — jumps to `true_label` when the value coerces true, else
    /// to `false_label`.
    JumpBranch {
        true_label: String,
        false_label: String,
    },

    /// `value ->` — jumps when the value coerces true.
    JumpTrue { label: String },

    /// `value ->` — jumps when the value coerces false.
    JumpFalse { label: String },

    /// Peeks the top value: NULL is popped and execution continues;
    /// anything else stays on the stack and execution jumps to the label.
    JumpCoalesce { label: String },

    /// Resolves a host function and invokes it. The function pops its own
    /// parameters; its return value is pushed.
    CallHost {
        name: String,
        namespace: Option<String>,
    },

    /// `-> value` — pushes a literal.
    Push { value: Literal },

    /// `-> null`
    PushNull,

    /// `-> value` — pushes a local variable's value, or NULL when absent.
    PushVariable { name: String },

    /// `-> value` — pushes a named outer-scope variable's value, or NULL
    /// when the scope or the variable is absent.
    PushScopeVariable { scope: String, name: String },

    /// `value ->` — discards the top value.
    Pop,

    /// `value ->` — pops into a local variable, creating it when absent.
    PopVariable { name: String },

    /// `value ->` — pops into a named outer-scope variable. A missing scope
    /// pushes NULL as a failure marker; a read-only target consumes the
    /// value silently.
    PopScopeVariable { scope: String, name: String },

    /// Binds a local variable to a literal without touching the stack.
    Set { name: String, value: Literal },

    /// Copies one local variable's value into another.
    SetVariable { dest: String, source: String },

    /// `-> list` — pushes a new empty list.
    PushListNew,

    /// `v1 … vN N -> list` — pops a count then that many values; element
    /// order matches push order.
    PushListInit,

    /// `list index -> value` — pushes `list[index]`, or NULL when the target
    /// is not a list or the index is out of range.
    PushListIndex,

    /// `list index -> list index value` — non-destructive variant: both
    /// inputs are peeked and remain in place under the result.
    PushListIndexContents,

    /// `list index value ->` — sets `list[index]`; silently drops everything
    /// when the target is not a list.
    PopList,

    /// `-> map` — pushes a new empty map.
    PushMapNew,

    /// `k1 v1 … kN vN N -> map` — pops a pair count then that many
    /// key/value pairs.
    PushMapInit,

    /// `map key -> value` — pushes `map[key]`, or NULL.
    PushMapKey,

    /// `map key -> map key value` — non-destructive variant of
    /// [`Instruction::PushMapKey`].
    PushMapKeyContents,

    /// `map key value ->` — sets `map[key]`.
    PopMap,

    /// `value -> result` — bitwise NOT.
    Not,

    /// `value -> result` — numeric negation.
    Negate,

    /// `value -> result` — numeric absolute value.
    Absolute,

    /// `value -> result` — logical NOT.
    LogicalNot,

    /// `left right -> result`
    Add,
    /// `left right -> result`
    Subtract,
    /// `left right -> result`
    Multiply,
    /// `left right -> result`
    Divide,
    /// `left right -> result`
    Modulo,
    /// `left right -> result` — bitwise AND.
    And,
    /// `left right -> result` — bitwise OR.
    Or,
    /// `left right -> result` — bitwise XOR.
    Xor,
    /// `left right -> result`
    LogicalAnd,
    /// `left right -> result`
    LogicalOr,
    /// `left right -> result`
    LeftShift,
    /// `left right -> result` — sign-extending shift.
    RightShift,
    /// `left right -> result` — zero-padding shift.
    RightShiftPadded,

    /// `left right -> boolean`
    Less,
    /// `left right -> boolean`
    LessOrEqual,
    /// `left right -> boolean`
    Greater,
    /// `left right -> boolean`
    GreaterOrEqual,
    /// `left right -> boolean` — coercion-aware equality.
    Equal,
    /// `left right -> boolean`
    NotEqual,
    /// `left right -> boolean` — same variant and same content/identity.
    StrictEqual,
    /// `left right -> boolean`
    StrictNotEqual,
}

impl Instruction {
    /// Returns the mnemonic for this instruction.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Noop => "NOOP",
            Instruction::Return => "RETURN",
            Instruction::Call { .. } => "CALL",
            Instruction::Jump { .. } => "JUMP",
            Instruction::JumpBranch { .. } => "JUMP_BRANCH",
            Instruction::JumpTrue { .. } => "JUMP_TRUE",
            Instruction::JumpFalse { .. } => "JUMP_FALSE",
            Instruction::JumpCoalesce { .. } => "JUMP_COALESCE",
            Instruction::CallHost { .. } => "CALL_HOST",
            Instruction::Push { .. } => "PUSH",
            Instruction::PushNull => "PUSH_NULL",
            Instruction::PushVariable { .. } => "PUSH_VARIABLE",
            Instruction::PushScopeVariable { .. } => "PUSH_SCOPE_VARIABLE",
            Instruction::Pop => "POP",
            Instruction::PopVariable { .. } => "POP_VARIABLE",
            Instruction::PopScopeVariable { .. } => "POP_SCOPE_VARIABLE",
            Instruction::Set { .. } => "SET",
            Instruction::SetVariable { .. } => "SET_VARIABLE",
            Instruction::PushListNew => "PUSH_LIST_NEW",
            Instruction::PushListInit => "PUSH_LIST_INIT",
            Instruction::PushListIndex => "PUSH_LIST_INDEX",
            Instruction::PushListIndexContents => "PUSH_LIST_INDEX_CONTENTS",
            Instruction::PopList => "POP_LIST",
            Instruction::PushMapNew => "PUSH_MAP_NEW",
            Instruction::PushMapInit => "PUSH_MAP_INIT",
            Instruction::PushMapKey => "PUSH_MAP_KEY",
            Instruction::PushMapKeyContents => "PUSH_MAP_KEY_CONTENTS",
            Instruction::PopMap => "POP_MAP",
            Instruction::Not => "NOT",
            Instruction::Negate => "NEGATE",
            Instruction::Absolute => "ABSOLUTE",
            Instruction::LogicalNot => "LOGICAL_NOT",
            Instruction::Add => "ADD",
            Instruction::Subtract => "SUBTRACT",
            Instruction::Multiply => "MULTIPLY",
            Instruction::Divide => "DIVIDE",
            Instruction::Modulo => "MODULO",
            Instruction::And => "AND",
            Instruction::Or => "OR",
            Instruction::Xor => "XOR",
            Instruction::LogicalAnd => "LOGICAL_AND",
            Instruction::LogicalOr => "LOGICAL_OR",
            Instruction::LeftShift => "LEFT_SHIFT",
            Instruction::RightShift => "RIGHT_SHIFT",
            Instruction::RightShiftPadded => "RIGHT_SHIFT_PADDED",
            Instruction::Less => "LESS",
            Instruction::LessOrEqual => "LESS_OR_EQUAL",
            Instruction::Greater => "GREATER",
            Instruction::GreaterOrEqual => "GREATER_OR_EQUAL",
            Instruction::Equal => "EQUAL",
            Instruction::NotEqual => "NOT_EQUAL",
            Instruction::StrictEqual => "STRICT_EQUAL",
            Instruction::StrictNotEqual => "STRICT_NOT_EQUAL",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())?;
        match self {
            Instruction::Call { label }
            | Instruction::Jump { label }
            | Instruction::JumpTrue { label }
            | Instruction::JumpFalse { label }
            | Instruction::JumpCoalesce { label } => write!(f, " {label}"),
            Instruction::JumpBranch {
                true_label,
                false_label,
            } => write!(f, " {true_label} {false_label}"),
            Instruction::CallHost {
                name,
                namespace: Some(namespace),
            } => write!(f, " {namespace}::{name}"),
            Instruction::CallHost {
                name,
                namespace: None,
            } => write!(f, " {name}"),
            Instruction::Push { value } => write!(f, " {value}"),
            Instruction::PushVariable { name } | Instruction::PopVariable { name } => {
                write!(f, " {name}")
            }
            Instruction::PushScopeVariable { scope, name }
            | Instruction::PopScopeVariable { scope, name } => write!(f, " {scope}:{name}"),
            Instruction::Set { name, value } => write!(f, " {name} {value}"),
            Instruction::SetVariable { dest, source } => write!(f, " {dest} {source}"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_to_value() {
        assert!(Literal::Null.to_value().is_null());
        assert!(Literal::from(3i64).to_value().strict_equals(&Value::from(3i64)));
        assert!(Literal::from("x").to_value().strict_equals(&Value::from("x")));
        assert!(Literal::from(true).to_value().strict_equals(&Value::from(true)));
    }

    #[test]
    fn test_display() {
        let instruction = Instruction::Call {
            label: "function_fib".to_string(),
        };
        assert_eq!(instruction.to_string(), "CALL function_fib");

        let instruction = Instruction::Push {
            value: Literal::from("hi"),
        };
        assert_eq!(instruction.to_string(), "PUSH \"hi\"");

        let instruction = Instruction::CallHost {
            name: "print".to_string(),
            namespace: Some("io".to_string()),
        };
        assert_eq!(instruction.to_string(), "CALL_HOST io::print");

        assert_eq!(Instruction::Add.to_string(), "ADD");
    }
}
