//! Unary, binary, and comparison instructions.
//!
//! Operands pop right then left; the result of the value-level operator is
//! pushed back. All value semantics (promotion, coercion, error values for
//! integer division by zero) live on [`Value`].

use std::cmp::Ordering;

use crate::error::VmResult;
use crate::instance::ScriptInstance;
use crate::value::Value;

pub(super) fn unary<F>(instance: &mut ScriptInstance, op: F) -> VmResult<bool>
where
    F: Fn(&Value) -> Value,
{
    let value = instance.pop()?;
    instance.push(op(&value))?;
    Ok(true)
}

pub(super) fn binary<F>(instance: &mut ScriptInstance, op: F) -> VmResult<bool>
where
    F: Fn(&Value, &Value) -> Value,
{
    let right = instance.pop()?;
    let left = instance.pop()?;
    instance.push(op(&left, &right))?;
    Ok(true)
}

#[derive(Clone, Copy)]
pub(super) enum Comparison {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Comparison {
    fn matches(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Less => ordering == Ordering::Less,
            Comparison::LessOrEqual => ordering != Ordering::Greater,
            Comparison::Greater => ordering == Ordering::Greater,
            Comparison::GreaterOrEqual => ordering != Ordering::Less,
        }
    }
}

pub(super) fn comparison(instance: &mut ScriptInstance, which: Comparison) -> VmResult<bool> {
    binary(instance, |left, right| {
        // An unordered comparison (NaN on either side) is false.
        let result = match left.compare(right) {
            Some(ordering) => which.matches(ordering),
            None => false,
        };
        Value::Boolean(result)
    })
}
