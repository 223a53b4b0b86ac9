//! The tagged value union and its coercion and operator semantics.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use super::{BufferValue, ByteOrder, ErrorValue, ListValue, MapValue, ObjectRef};

/// Discriminates the variants of [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueType {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    List,
    Map,
    Buffer,
    Error,
    ObjectRef,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "NULL",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Integer => "INTEGER",
            ValueType::Float => "FLOAT",
            ValueType::String => "STRING",
            ValueType::List => "LIST",
            ValueType::Map => "MAP",
            ValueType::Buffer => "BUFFER",
            ValueType::Error => "ERROR",
            ValueType::ObjectRef => "OBJECTREF",
        };
        f.write_str(name)
    }
}

/// Represents a value in the RookScript VM.
///
/// Lists, maps, buffers and object references are shared by reference:
/// cloning the value clones the handle and mutation is visible to every
/// holder. The other variants have value semantics.
#[derive(Debug, Clone)]
pub enum Value {
    /// The bottom value.
    Null,
    /// A boolean value.
    Boolean(bool),
    /// A signed 64-bit integer.
    Integer(i64),
    /// A 64-bit IEEE-754 float.
    Float(f64),
    /// An immutable string.
    String(Rc<str>),
    /// A shared mutable list of values.
    List(ListValue),
    /// A shared mutable name-to-value mapping.
    Map(MapValue),
    /// A shared mutable byte buffer with a cursor.
    Buffer(BufferValue),
    /// A script-visible error.
    Error(Rc<ErrorValue>),
    /// An opaque host object handle.
    ObjectRef(ObjectRef),
}

/// Numeric view used for arithmetic promotion.
enum Numeric {
    Int(i64),
    Float(f64),
}

fn parse_integer_text(text: &str) -> Option<i64> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        rest.parse::<i64>().ok()?
    };
    Some(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

fn parse_float_text(text: &str) -> Option<f64> {
    if let Ok(value) = text.parse::<f64>() {
        return Some(value);
    }
    parse_integer_text(text).map(|i| i as f64)
}

impl Value {
    /// The null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Creates a new empty list value.
    pub fn new_list() -> Self {
        Value::List(ListValue::new())
    }

    /// Creates a new empty map value.
    pub fn new_map() -> Self {
        Value::Map(MapValue::new())
    }

    /// Creates a new zero-filled buffer value.
    pub fn new_buffer(size: usize, order: ByteOrder) -> Self {
        Value::Buffer(BufferValue::new(size, order))
    }

    /// Creates an error value from a type tag and message.
    pub fn error<T: Into<String>, M: Into<String>>(error_type: T, message: M) -> Self {
        Value::Error(Rc::new(ErrorValue::new(error_type, message)))
    }

    /// Returns the type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::Map(_) => ValueType::Map,
            Value::Buffer(_) => ValueType::Buffer,
            Value::Error(_) => ValueType::Error,
            Value::ObjectRef(_) => ValueType::ObjectRef,
        }
    }

    /// Returns `true` when this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` when this value is an ERROR.
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Returns `true` when this value is a LIST.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` when this value is a MAP.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns `true` when this value is a BUFFER.
    pub fn is_buffer(&self) -> bool {
        matches!(self, Value::Buffer(_))
    }

    /// Returns `true` when this value is an INTEGER or a FLOAT.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Returns `true` when this value is "empty": NULL, false, zero, NaN, or
    /// a zero-length string, list, map or buffer.
    pub fn empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(b) => !b,
            Value::Integer(i) => *i == 0,
            Value::Float(f) => *f == 0.0 || f.is_nan(),
            Value::String(s) => s.is_empty(),
            Value::List(list) => list.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Buffer(buffer) => buffer.is_empty(),
            Value::Error(_) => false,
            Value::ObjectRef(_) => false,
        }
    }

    /// Returns the element count of a container, the character count of a
    /// string, zero for NULL, and one for every other value.
    pub fn length(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::String(s) => s.chars().count() as i64,
            Value::List(list) => list.len() as i64,
            Value::Map(map) => map.len() as i64,
            Value::Buffer(buffer) => buffer.len() as i64,
            _ => 1,
        }
    }

    /// Converts this value to a boolean.
    ///
    /// Strings are true unless empty or literally `"false"` or `"0"`.
    pub fn as_boolean(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty() && !s.eq_ignore_ascii_case("false") && &**s != "0",
            Value::List(list) => !list.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Buffer(buffer) => !buffer.is_empty(),
            Value::Error(_) => true,
            Value::ObjectRef(_) => true,
        }
    }

    /// Converts this value to a signed 64-bit integer.
    ///
    /// Strings accept decimal and `0x`-prefixed hexadecimal; a failed parse
    /// yields zero. Floats truncate toward zero; NaN yields zero.
    pub fn as_integer(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Boolean(b) => *b as i64,
            Value::Integer(i) => *i,
            Value::Float(f) => *f as i64,
            Value::String(s) => parse_integer_text(s).unwrap_or(0),
            _ => 0,
        }
    }

    /// Converts this value to a 64-bit float. A failed string parse yields
    /// NaN.
    pub fn as_double(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Boolean(b) => *b as i64 as f64,
            Value::Integer(i) => *i as f64,
            Value::Float(f) => *f,
            Value::String(s) => parse_float_text(s).unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// Converts this value to its string representation. An ERROR converts
    /// to its message.
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    fn arithmetic_numeric(&self) -> Numeric {
        match self {
            Value::Null => Numeric::Int(0),
            Value::Boolean(b) => Numeric::Int(*b as i64),
            Value::Integer(i) => Numeric::Int(*i),
            Value::Float(f) => Numeric::Float(*f),
            Value::String(s) => match parse_integer_text(s) {
                Some(i) => Numeric::Int(i),
                None => Numeric::Float(s.parse::<f64>().unwrap_or(f64::NAN)),
            },
            _ => Numeric::Float(f64::NAN),
        }
    }

    fn promote(&self, other: &Value) -> (Numeric, Numeric) {
        match (self.arithmetic_numeric(), other.arithmetic_numeric()) {
            (Numeric::Int(a), Numeric::Float(b)) => (Numeric::Float(a as f64), Numeric::Float(b)),
            (Numeric::Float(a), Numeric::Int(b)) => (Numeric::Float(a), Numeric::Float(b as f64)),
            pair => pair,
        }
    }

    /// Adds two values.
    ///
    /// A LIST on the left yields a new list with the right operand appended;
    /// two STRINGs concatenate; everything else is numeric addition with
    /// INTEGER-to-FLOAT promotion.
    pub fn add(&self, other: &Value) -> Value {
        if let Value::List(list) = self {
            let mut values = list.to_vec();
            values.push(other.clone());
            return Value::List(ListValue::with_values(values));
        }
        if let (Value::String(a), Value::String(b)) = (self, other) {
            let mut text = String::with_capacity(a.len() + b.len());
            text.push_str(a);
            text.push_str(b);
            return Value::from(text);
        }
        match self.promote(other) {
            (Numeric::Int(a), Numeric::Int(b)) => Value::Integer(a.wrapping_add(b)),
            (Numeric::Float(a), Numeric::Float(b)) => Value::Float(a + b),
            _ => unreachable!("promote returns matched numeric kinds"),
        }
    }

    /// Subtracts `other` from this value.
    pub fn subtract(&self, other: &Value) -> Value {
        match self.promote(other) {
            (Numeric::Int(a), Numeric::Int(b)) => Value::Integer(a.wrapping_sub(b)),
            (Numeric::Float(a), Numeric::Float(b)) => Value::Float(a - b),
            _ => unreachable!("promote returns matched numeric kinds"),
        }
    }

    /// Multiplies two values.
    pub fn multiply(&self, other: &Value) -> Value {
        match self.promote(other) {
            (Numeric::Int(a), Numeric::Int(b)) => Value::Integer(a.wrapping_mul(b)),
            (Numeric::Float(a), Numeric::Float(b)) => Value::Float(a * b),
            _ => unreachable!("promote returns matched numeric kinds"),
        }
    }

    /// Divides this value by `other`.
    ///
    /// Integer division by zero yields an ERROR value; float division by
    /// zero yields an infinity or NaN per IEEE-754.
    pub fn divide(&self, other: &Value) -> Value {
        match self.promote(other) {
            (Numeric::Int(_), Numeric::Int(0)) => Value::error("Arithmetic", "divide by zero"),
            (Numeric::Int(a), Numeric::Int(b)) => Value::Integer(a.wrapping_div(b)),
            (Numeric::Float(a), Numeric::Float(b)) => Value::Float(a / b),
            _ => unreachable!("promote returns matched numeric kinds"),
        }
    }

    /// Computes this value modulo `other`. Integer modulo by zero yields an
    /// ERROR value.
    pub fn modulo(&self, other: &Value) -> Value {
        match self.promote(other) {
            (Numeric::Int(_), Numeric::Int(0)) => Value::error("Arithmetic", "divide by zero"),
            (Numeric::Int(a), Numeric::Int(b)) => Value::Integer(a.wrapping_rem(b)),
            (Numeric::Float(a), Numeric::Float(b)) => Value::Float(a % b),
            _ => unreachable!("promote returns matched numeric kinds"),
        }
    }

    /// Negates this value numerically.
    pub fn negate(&self) -> Value {
        match self.arithmetic_numeric() {
            Numeric::Int(i) => Value::Integer(i.wrapping_neg()),
            Numeric::Float(f) => Value::Float(-f),
        }
    }

    /// Returns the numeric absolute value.
    pub fn absolute(&self) -> Value {
        match self.arithmetic_numeric() {
            Numeric::Int(i) => Value::Integer(i.wrapping_abs()),
            Numeric::Float(f) => Value::Float(f.abs()),
        }
    }

    /// Bitwise NOT of the integer coercion.
    pub fn bitwise_not(&self) -> Value {
        Value::Integer(!self.as_integer())
    }

    /// Bitwise AND of the integer coercions.
    pub fn bitwise_and(&self, other: &Value) -> Value {
        Value::Integer(self.as_integer() & other.as_integer())
    }

    /// Bitwise OR of the integer coercions.
    pub fn bitwise_or(&self, other: &Value) -> Value {
        Value::Integer(self.as_integer() | other.as_integer())
    }

    /// Bitwise XOR of the integer coercions.
    pub fn bitwise_xor(&self, other: &Value) -> Value {
        Value::Integer(self.as_integer() ^ other.as_integer())
    }

    /// Arithmetic left shift. The shift distance is masked to six bits.
    pub fn left_shift(&self, other: &Value) -> Value {
        Value::Integer(self.as_integer() << (other.as_integer() & 0x3F))
    }

    /// Arithmetic (sign-extending) right shift.
    pub fn right_shift(&self, other: &Value) -> Value {
        Value::Integer(self.as_integer() >> (other.as_integer() & 0x3F))
    }

    /// Logical (zero-padding) right shift.
    pub fn right_shift_padded(&self, other: &Value) -> Value {
        let value = self.as_integer() as u64;
        Value::Integer((value >> (other.as_integer() & 0x3F)) as i64)
    }

    /// Logical NOT of the boolean coercion.
    pub fn logical_not(&self) -> Value {
        Value::Boolean(!self.as_boolean())
    }

    /// Logical AND of the boolean coercions.
    pub fn logical_and(&self, other: &Value) -> Value {
        Value::Boolean(self.as_boolean() && other.as_boolean())
    }

    /// Logical OR of the boolean coercions.
    pub fn logical_or(&self, other: &Value) -> Value {
        Value::Boolean(self.as_boolean() || other.as_boolean())
    }

    /// Coercion-aware equality.
    ///
    /// Numeric values compare by value across INTEGER/FLOAT/BOOLEAN; a
    /// STRING equals a numeric value when its numeric parse matches.
    /// Reference types compare by identity; ERRORs compare by content.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Buffer(a), Value::Buffer(b)) => a.ptr_eq(b),
            (Value::ObjectRef(a), Value::ObjectRef(b)) => a.ptr_eq(b),
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => {
                if self.is_loose_comparable() && other.is_loose_comparable() {
                    match (self.arithmetic_numeric(), other.arithmetic_numeric()) {
                        (Numeric::Int(a), Numeric::Int(b)) => a == b,
                        (a, b) => numeric_as_f64(a) == numeric_as_f64(b),
                    }
                } else {
                    false
                }
            }
        }
    }

    fn is_loose_comparable(&self) -> bool {
        matches!(
            self,
            Value::Boolean(_) | Value::Integer(_) | Value::Float(_) | Value::String(_)
        )
    }

    /// Strict equality: variants must match, then contents (or identity for
    /// reference types) must match.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Buffer(a), Value::Buffer(b)) => a.ptr_eq(b),
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::ObjectRef(a), Value::ObjectRef(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Ordering for the comparison instructions.
    ///
    /// Strings order lexicographically against each other and numerically
    /// against numbers; any comparison involving NaN returns `None`.
    /// Non-numeric mixes fall back to type-tag order.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        if let (Value::String(a), Value::String(b)) = (self, other) {
            return Some(a.cmp(b));
        }
        if self.is_orderable_numeric() && other.is_orderable_numeric() {
            match (self.arithmetic_numeric(), other.arithmetic_numeric()) {
                (Numeric::Int(a), Numeric::Int(b)) => return Some(a.cmp(&b)),
                (a, b) => return numeric_as_f64(a).partial_cmp(&numeric_as_f64(b)),
            }
        }
        Some(self.value_type().cmp(&other.value_type()))
    }

    fn is_orderable_numeric(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Boolean(_)
                | Value::Integer(_)
                | Value::Float(_)
                | Value::String(_)
        )
    }

    /// Total ordering used by list sorting and sorted-set operations.
    ///
    /// Integers and floats interleave numerically; other types group by type
    /// tag, then order by content (strings, errors) or identity (reference
    /// types). NaN orders after every other float.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        fn class(value: &Value) -> u8 {
            match value {
                Value::Null => 0,
                Value::Boolean(_) => 1,
                Value::Integer(_) | Value::Float(_) => 2,
                Value::String(_) => 3,
                Value::List(_) => 4,
                Value::Map(_) => 5,
                Value::Buffer(_) => 6,
                Value::Error(_) => 7,
                Value::ObjectRef(_) => 8,
            }
        }

        let by_class = class(self).cmp(&class(other));
        if by_class != Ordering::Equal {
            return by_class;
        }

        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.total_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.id().cmp(&b.id()),
            (Value::Map(a), Value::Map(b)) => a.id().cmp(&b.id()),
            (Value::Buffer(a), Value::Buffer(b)) => a.id().cmp(&b.id()),
            (Value::Error(a), Value::Error(b)) => a
                .error_type()
                .cmp(b.error_type())
                .then_with(|| a.message().cmp(b.message())),
            (Value::ObjectRef(a), Value::ObjectRef(b)) => a.id().cmp(&b.id()),
            _ => unreachable!("class comparison filters mismatched variants"),
        }
    }
}

fn numeric_as_f64(numeric: Numeric) -> f64 {
    match numeric {
        Numeric::Int(i) => i as f64,
        Numeric::Float(f) => f,
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::String(s) => f.write_str(s),
            Value::List(list) => {
                f.write_str("[")?;
                let mut first = true;
                let mut result = Ok(());
                list.for_each(|item| {
                    if result.is_ok() {
                        if !first {
                            result = f.write_str(", ");
                        }
                        first = false;
                        if result.is_ok() {
                            result = write!(f, "{item}");
                        }
                    }
                });
                result?;
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                let mut first = true;
                let mut result = Ok(());
                map.for_each(|key, value| {
                    if result.is_ok() {
                        if !first {
                            result = f.write_str(", ");
                        }
                        first = false;
                        if result.is_ok() {
                            result = write!(f, "{key}: {value}");
                        }
                    }
                });
                result?;
                f.write_str("}")
            }
            Value::Buffer(buffer) => write!(f, "buffer(len={})", buffer.len()),
            Value::Error(error) => f.write_str(error.message()),
            Value::ObjectRef(object) => write!(f, "{}@{:x}", object.type_name(), object.id()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Rc::from(value))
    }
}

impl From<ListValue> for Value {
    fn from(value: ListValue) -> Self {
        Value::List(value)
    }
}

impl From<MapValue> for Value {
    fn from(value: MapValue) -> Self {
        Value::Map(value)
    }
}

impl From<BufferValue> for Value {
    fn from(value: BufferValue) -> Self {
        Value::Buffer(value)
    }
}

impl From<ErrorValue> for Value {
    fn from(value: ErrorValue) -> Self {
        Value::Error(Rc::new(value))
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::ObjectRef(value)
    }
}

/// Conversion from a [`Value`] using the standard coercions, for typed
/// return-value extraction.
pub trait FromValue: Sized {
    /// Converts `value` using the coercion for this type.
    fn from_value(value: &Value) -> Self;
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Self {
        value.as_integer()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Self {
        value.as_double()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Self {
        value.as_boolean()
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Self {
        value.as_string()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Value::Null.empty());
        assert!(Value::from(false).empty());
        assert!(Value::from(0i64).empty());
        assert!(Value::from(f64::NAN).empty());
        assert!(Value::from("").empty());
        assert!(Value::new_list().empty());
        assert!(!Value::from(1i64).empty());
        assert!(!Value::error("X", "y").empty());
    }

    #[test]
    fn test_boolean_coercion() {
        assert!(!Value::Null.as_boolean());
        assert!(Value::from(-1i64).as_boolean());
        assert!(!Value::from(f64::NAN).as_boolean());
        assert!(Value::from("yes").as_boolean());
        assert!(!Value::from("false").as_boolean());
        assert!(!Value::from("FALSE").as_boolean());
        assert!(!Value::from("0").as_boolean());
        assert!(Value::error("X", "y").as_boolean());
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(Value::from("42").as_integer(), 42);
        assert_eq!(Value::from("0x10").as_integer(), 16);
        assert_eq!(Value::from("-0x10").as_integer(), -16);
        assert_eq!(Value::from("junk").as_integer(), 0);
        assert_eq!(Value::from(3.9f64).as_integer(), 3);
        assert_eq!(Value::from(f64::NAN).as_integer(), 0);
        assert_eq!(Value::from(true).as_integer(), 1);
        assert_eq!(Value::new_list().as_integer(), 0);
    }

    #[test]
    fn test_double_coercion() {
        assert_eq!(Value::from("1.5").as_double(), 1.5);
        assert_eq!(Value::from("0x10").as_double(), 16.0);
        assert!(Value::from("junk").as_double().is_nan());
        assert!(Value::new_map().as_double().is_nan());
        assert_eq!(Value::Null.as_double(), 0.0);
    }

    #[test]
    fn test_string_coercion() {
        assert_eq!(Value::Null.as_string(), "null");
        assert_eq!(Value::from(7i64).as_string(), "7");
        assert_eq!(Value::from(7.0f64).as_string(), "7.0");
        assert_eq!(Value::error("X", "boom").as_string(), "boom");

        let list = ListValue::with_values(vec![Value::from(1i64), Value::from("a")]);
        assert_eq!(Value::List(list).as_string(), "[1, a]");
    }

    #[test]
    fn test_coercion_idempotence() {
        let samples = [
            Value::Null,
            Value::from(true),
            Value::from(-9i64),
            Value::from(2.25f64),
            Value::from("0x1F"),
            Value::from("junk"),
            Value::new_list(),
        ];
        for value in &samples {
            let i = value.as_integer();
            assert_eq!(Value::from(i).as_integer(), i);
            let d = value.as_double();
            let redone = Value::from(d).as_double();
            assert!(redone == d || (redone.is_nan() && d.is_nan()));
            let s = value.as_string();
            assert_eq!(Value::from(s.clone()).as_string(), s);
            let b = value.as_boolean();
            assert_eq!(Value::from(b).as_boolean(), b);
        }
    }

    #[test]
    fn test_add_promotion() {
        // Integer-parsing string stays integral.
        let result = Value::from("3").add(&Value::from(4i64));
        assert!(result.strict_equals(&Value::from(7i64)));

        let result = Value::from("3").add(&Value::from(4.0f64));
        assert!(result.strict_equals(&Value::from(7.0f64)));

        let result = Value::from("abc").add(&Value::from(4i64));
        assert!(matches!(result, Value::Float(f) if f.is_nan()));
    }

    #[test]
    fn test_add_strings_and_lists() {
        let result = Value::from("foo").add(&Value::from("bar"));
        assert_eq!(result.as_string(), "foobar");

        let list = ListValue::with_values(vec![Value::from(1i64)]);
        let original = Value::List(list.clone());
        let result = original.add(&Value::from(2i64));
        // A new list is produced; the original is untouched.
        assert_eq!(list.len(), 1);
        match result {
            Value::List(appended) => {
                assert_eq!(appended.len(), 2);
                assert!(!appended.ptr_eq(&list));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_division() {
        let result = Value::from(10i64).divide(&Value::from(0i64));
        match result {
            Value::Error(error) => {
                assert_eq!(error.error_type(), "Arithmetic");
                assert_eq!(error.message(), "divide by zero");
            }
            other => panic!("expected error, got {other:?}"),
        }

        let result = Value::from(10.0f64).divide(&Value::from(0i64));
        assert!(matches!(result, Value::Float(f) if f.is_infinite()));

        let result = Value::from(0.0f64).divide(&Value::from(0.0f64));
        assert!(matches!(result, Value::Float(f) if f.is_nan()));

        let result = Value::from(7i64).divide(&Value::from(2i64));
        assert!(result.strict_equals(&Value::from(3i64)));

        let result = Value::from(7i64).modulo(&Value::from(0i64));
        assert!(result.is_error());
    }

    #[test]
    fn test_bitwise_and_shifts() {
        assert!(Value::from(0b1100i64)
            .bitwise_and(&Value::from(0b1010i64))
            .strict_equals(&Value::from(0b1000i64)));
        assert!(Value::from(1i64)
            .left_shift(&Value::from(4i64))
            .strict_equals(&Value::from(16i64)));
        assert!(Value::from(-8i64)
            .right_shift(&Value::from(1i64))
            .strict_equals(&Value::from(-4i64)));
        assert!(Value::from(-1i64)
            .right_shift_padded(&Value::from(56i64))
            .strict_equals(&Value::from(0xFFi64)));
        assert!(Value::from(0i64).bitwise_not().strict_equals(&Value::from(-1i64)));
        // Float coerces through the integer conversion.
        assert!(Value::from(6.7f64)
            .bitwise_or(&Value::from(1i64))
            .strict_equals(&Value::from(7i64)));
    }

    #[test]
    fn test_loose_equality() {
        assert!(Value::from(1i64).loose_equals(&Value::from(1.0f64)));
        assert!(Value::from("16").loose_equals(&Value::from(16i64)));
        assert!(Value::from("0x10").loose_equals(&Value::from(16i64)));
        assert!(!Value::from("junk").loose_equals(&Value::from(0i64)));
        assert!(Value::from(true).loose_equals(&Value::from(1i64)));
        assert!(!Value::Null.loose_equals(&Value::from(0i64)));

        let list = ListValue::new();
        assert!(Value::List(list.clone()).loose_equals(&Value::List(list)));
        assert!(!Value::new_list().loose_equals(&Value::new_list()));
    }

    #[test]
    fn test_strict_equality_implies_loose() {
        let list = ListValue::new();
        let samples = [
            (Value::Null, Value::Null),
            (Value::from(3i64), Value::from(3i64)),
            (Value::from(2.5f64), Value::from(2.5f64)),
            (Value::from("x"), Value::from("x")),
            (Value::List(list.clone()), Value::List(list)),
        ];
        for (a, b) in &samples {
            assert!(a.strict_equals(b));
            assert!(a.loose_equals(b));
        }

        // Loose does not imply strict.
        assert!(Value::from(1i64).loose_equals(&Value::from(1.0f64)));
        assert!(!Value::from(1i64).strict_equals(&Value::from(1.0f64)));
    }

    #[test]
    fn test_compare() {
        assert_eq!(
            Value::from(1i64).compare(&Value::from(2.0f64)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("b").compare(&Value::from("a")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::from("10").compare(&Value::from(9i64)),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::from(f64::NAN).compare(&Value::from(1i64)), None);
    }

    #[test]
    fn test_comparison_trichotomy() {
        let pairs = [
            (Value::from(1i64), Value::from(2i64)),
            (Value::from(2i64), Value::from(2.0f64)),
            (Value::from("3"), Value::from(2.5f64)),
            (Value::from(-7.25f64), Value::from(-8i64)),
        ];
        for (a, b) in &pairs {
            let ordering = a.compare(b).expect("non-NaN comparison");
            let truths = [
                ordering == Ordering::Less,
                ordering == Ordering::Equal,
                ordering == Ordering::Greater,
            ];
            assert_eq!(truths.iter().filter(|&&t| t).count(), 1);
        }
    }
}
