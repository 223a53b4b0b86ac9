//! Instruction execution, grouped by category.
//!
//! Every handler returns `Ok(true)` to keep stepping, `Ok(false)` to stop
//! the update loop, or an execution error.

mod compound;
mod control;
mod numeric;
mod stack;

use crate::error::VmResult;
use crate::instance::ScriptInstance;
use crate::instruction::Instruction;

/// Executes one instruction against `instance`.
pub(crate) fn execute(
    instance: &mut ScriptInstance,
    instruction: &Instruction,
) -> VmResult<bool> {
    match instruction {
        Instruction::Noop => Ok(true),
        Instruction::Return => control::ret(instance),
        Instruction::Call { label } => control::call(instance, label),
        Instruction::Jump { label } => control::jump(instance, label),
        Instruction::JumpBranch {
            true_label,
            false_label,
        } => control::jump_branch(instance, true_label, false_label),
        Instruction::JumpTrue { label } => control::jump_conditional(instance, label, true),
        Instruction::JumpFalse { label } => control::jump_conditional(instance, label, false),
        Instruction::JumpCoalesce { label } => control::jump_coalesce(instance, label),
        Instruction::CallHost { name, namespace } => {
            control::call_host(instance, name, namespace.as_deref())
        }

        Instruction::Push { value } => stack::push_literal(instance, value),
        Instruction::PushNull => stack::push_null(instance),
        Instruction::PushVariable { name } => stack::push_variable(instance, name),
        Instruction::PushScopeVariable { scope, name } => {
            stack::push_scope_variable(instance, scope, name)
        }
        Instruction::Pop => stack::pop(instance),
        Instruction::PopVariable { name } => stack::pop_variable(instance, name),
        Instruction::PopScopeVariable { scope, name } => {
            stack::pop_scope_variable(instance, scope, name)
        }
        Instruction::Set { name, value } => stack::set(instance, name, value),
        Instruction::SetVariable { dest, source } => stack::set_variable(instance, dest, source),

        Instruction::PushListNew => compound::push_list_new(instance),
        Instruction::PushListInit => compound::push_list_init(instance),
        Instruction::PushListIndex => compound::push_list_index(instance),
        Instruction::PushListIndexContents => compound::push_list_index_contents(instance),
        Instruction::PopList => compound::pop_list(instance),
        Instruction::PushMapNew => compound::push_map_new(instance),
        Instruction::PushMapInit => compound::push_map_init(instance),
        Instruction::PushMapKey => compound::push_map_key(instance),
        Instruction::PushMapKeyContents => compound::push_map_key_contents(instance),
        Instruction::PopMap => compound::pop_map(instance),

        Instruction::Not => numeric::unary(instance, |v| v.bitwise_not()),
        Instruction::Negate => numeric::unary(instance, |v| v.negate()),
        Instruction::Absolute => numeric::unary(instance, |v| v.absolute()),
        Instruction::LogicalNot => numeric::unary(instance, |v| v.logical_not()),

        Instruction::Add => numeric::binary(instance, |a, b| a.add(b)),
        Instruction::Subtract => numeric::binary(instance, |a, b| a.subtract(b)),
        Instruction::Multiply => numeric::binary(instance, |a, b| a.multiply(b)),
        Instruction::Divide => numeric::binary(instance, |a, b| a.divide(b)),
        Instruction::Modulo => numeric::binary(instance, |a, b| a.modulo(b)),
        Instruction::And => numeric::binary(instance, |a, b| a.bitwise_and(b)),
        Instruction::Or => numeric::binary(instance, |a, b| a.bitwise_or(b)),
        Instruction::Xor => numeric::binary(instance, |a, b| a.bitwise_xor(b)),
        Instruction::LogicalAnd => numeric::binary(instance, |a, b| a.logical_and(b)),
        Instruction::LogicalOr => numeric::binary(instance, |a, b| a.logical_or(b)),
        Instruction::LeftShift => numeric::binary(instance, |a, b| a.left_shift(b)),
        Instruction::RightShift => numeric::binary(instance, |a, b| a.right_shift(b)),
        Instruction::RightShiftPadded => {
            numeric::binary(instance, |a, b| a.right_shift_padded(b))
        }

        Instruction::Less => numeric::comparison(instance, numeric::Comparison::Less),
        Instruction::LessOrEqual => {
            numeric::comparison(instance, numeric::Comparison::LessOrEqual)
        }
        Instruction::Greater => numeric::comparison(instance, numeric::Comparison::Greater),
        Instruction::GreaterOrEqual => {
            numeric::comparison(instance, numeric::Comparison::GreaterOrEqual)
        }
        Instruction::Equal => numeric::binary(instance, |a, b| a.loose_equals(b).into()),
        Instruction::NotEqual => numeric::binary(instance, |a, b| (!a.loose_equals(b)).into()),
        Instruction::StrictEqual => numeric::binary(instance, |a, b| a.strict_equals(b).into()),
        Instruction::StrictNotEqual => {
            numeric::binary(instance, |a, b| (!a.strict_equals(b)).into())
        }
    }
}
