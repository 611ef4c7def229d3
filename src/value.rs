//! Dynamic element values.
//!
//! Collections are heterogeneous: a single collection may hold numbers,
//! strings, nested arrays and object handles at once. [`Value`] is that
//! element type. It carries two notions of equality:
//!
//! - **strict** ([`PartialEq`]): same variant and same content; objects are
//!   equal only when they are the same handle
//! - **loose** ([`Value::loose_eq`]): coercive, so `1 == "1"`,
//!   `null == ""` and `0 == false`
//!
//! and one coercive ordering, [`Value::loose_cmp`], used by the numeric sort
//! mode and by `min`/`max`.

use crate::array::Array;
use crate::key::Key;
use crate::object::Object;
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Array),
    Object(Object),
}

/// A numeric view of a value.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Integer addition that falls back to floating point on overflow.
    pub fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(sum) => Number::Int(sum),
                None => Number::Float(a as f64 + b as f64),
            },
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }

    /// Total numeric ordering; NaN sorts above every other float.
    ///
    /// Integers are compared with floats exactly, without rounding the
    /// integer to `f64` first.
    pub fn cmp(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Float(a), Number::Float(b)) => OrderedFloat(a).cmp(&OrderedFloat(b)),
            (Number::Int(a), Number::Float(b)) => int_float_cmp(a, b),
            (Number::Float(a), Number::Int(b)) => int_float_cmp(b, a).reverse(),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

fn int_float_cmp(i: i64, f: f64) -> Ordering {
    // 2^63; every i64 lies in [-2^63, 2^63)
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() || f >= BOUND {
        return Ordering::Less;
    }
    if f < -BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    i.cmp(&(whole as i64)).then_with(|| {
        if f > whole {
            Ordering::Less
        } else if f < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

/// Parse a numeric string: optional surrounding whitespace, an optional
/// sign, digits with an optional fraction and exponent.
pub(crate) fn numeric_str(s: &str) -> Option<Number> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(i) = t.parse::<i64>() {
        return Some(Number::Int(i));
    }
    let plausible = t.chars().any(|c| c.is_ascii_digit())
        && t
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !plausible {
        return None;
    }
    t.parse::<f64>().ok().map(Number::Float)
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".into(),
            Value::Bool(_) => "bool".into(),
            Value::Int(_) => "int".into(),
            Value::Float(_) => "float".into(),
            Value::Str(_) => "string".into(),
            Value::Array(_) => "array".into(),
            Value::Object(o) => o.type_name(),
        }
    }

    /// Truthiness: null, `false`, `0`, `0.0`, `""`, `"0"` and empty arrays
    /// are false; everything else is true.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !(s.is_empty() || s == "0"),
            Value::Array(a) => !a.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Numeric view of scalars. Null and booleans count as `0`/`1`; strings
    /// only when they are numeric; arrays and objects never.
    pub fn to_number(&self) -> Option<Number> {
        match self {
            Value::Null => Some(Number::Int(0)),
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Str(s) => numeric_str(s),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    /// Whether the value can be walked as a nested sequence of pairs.
    pub fn is_iterable(&self) -> bool {
        match self {
            Value::Array(_) => true,
            Value::Object(o) => o.is_traversable(),
            _ => false,
        }
    }

    /// Arithmetic sum; operands without a numeric view count as `0`.
    pub fn add(&self, other: &Value) -> Value {
        let a = self.to_number().unwrap_or(Number::Int(0));
        let b = other.to_number().unwrap_or(Number::Int(0));
        a.add(b).into_value()
    }

    /// Coercive equality.
    pub fn loose_eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Null, Str(s)) | (Str(s), Null) => s.is_empty(),
            (Null | Bool(_), _) | (_, Null | Bool(_)) => self.to_bool() == other.to_bool(),
            (Int(_) | Float(_), Int(_) | Float(_)) => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.cmp(b) == Ordering::Equal,
                _ => false,
            },
            (Int(_) | Float(_), Str(s)) => number_str_eq(self, s),
            (Str(s), Int(_) | Float(_)) => number_str_eq(other, s),
            (Str(a), Str(b)) => match (numeric_str(a), numeric_str(b)) {
                (Some(x), Some(y)) => x.cmp(y) == Ordering::Equal,
                _ => a == b,
            },
            (Array(a), Array(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get_key(k).is_some_and(|w| v.loose_eq(w)))
            }
            (Object(a), Object(b)) => {
                a.ptr_eq(b)
                    || (a.type_name() == b.type_name()
                        && Array(a.attributes()).loose_eq(&Array(b.attributes())))
            }
            _ => false,
        }
    }

    /// Coercive three-way comparison.
    ///
    /// This is a total order, so it is safe to hand to a sort. Values fall
    /// into ranked classes compared in this order:
    ///
    /// 1. null and booleans, by truthiness (null counts as `false`)
    /// 2. numbers and numeric strings, by magnitude
    /// 3. other strings, byte-wise
    /// 4. arrays, by size and then element-wise
    /// 5. objects, by their attributes
    pub fn loose_cmp(&self, other: &Value) -> Ordering {
        match (self.sort_class(), other.sort_class()) {
            (SortClass::Truth(a), SortClass::Truth(b)) => a.cmp(&b),
            (SortClass::Number(a), SortClass::Number(b)) => a.cmp(b),
            (SortClass::Text(a), SortClass::Text(b)) => a.cmp(b),
            (SortClass::Array(a), SortClass::Array(b)) => a.len().cmp(&b.len()).then_with(|| {
                a.values()
                    .zip(b.values())
                    .map(|(x, y)| x.loose_cmp(y))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            }),
            (SortClass::Object(a), SortClass::Object(b)) if a.ptr_eq(b) => Ordering::Equal,
            (SortClass::Object(a), SortClass::Object(b)) => {
                Value::Array(a.attributes()).loose_cmp(&Value::Array(b.attributes()))
            }
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn sort_class(&self) -> SortClass<'_> {
        match self {
            Value::Null => SortClass::Truth(false),
            Value::Bool(b) => SortClass::Truth(*b),
            Value::Int(i) => SortClass::Number(Number::Int(*i)),
            Value::Float(f) => SortClass::Number(Number::Float(*f)),
            Value::Str(s) => numeric_str(s).map_or(SortClass::Text(s.as_str()), SortClass::Number),
            Value::Array(a) => SortClass::Array(a),
            Value::Object(o) => SortClass::Object(o),
        }
    }
}

/// The ranked view of a value used by [`Value::loose_cmp`].
enum SortClass<'a> {
    Truth(bool),
    Number(Number),
    Text(&'a str),
    Array(&'a Array),
    Object(&'a Object),
}

impl SortClass<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortClass::Truth(_) => 0,
            SortClass::Number(_) => 1,
            SortClass::Text(_) => 2,
            SortClass::Array(_) => 3,
            SortClass::Object(_) => 4,
        }
    }
}

fn number_str_eq(number: &Value, s: &str) -> bool {
    match (number.as_number(), numeric_str(s)) {
        (Some(n), Some(m)) => n.cmp(m) == Ordering::Equal,
        _ => number.to_string() == s,
    }
}

/// Strict equality: same variant, same content; objects by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Text form used by lexicographic sorting and key coercion: null and
/// `false` are empty, `true` is `1`, arrays print as `Array` and objects as
/// their type name.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Bool(false) => Ok(()),
            Value::Bool(true) => f.write_str("1"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Array(_) => f.write_str("Array"),
            Value::Object(o) => f.write_str(&o.type_name()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(a) => a.serialize(serializer),
            Value::Object(o) => o.to_array(&[], &[], true).serialize(serializer),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Value::Float(v as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(Value::Float(v as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl From<Key> for Value {
    fn from(k: Key) -> Self {
        match k {
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::Str(s),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        n.into_value()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
