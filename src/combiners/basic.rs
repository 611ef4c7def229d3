//! Basic combiners: Sum, Min, Max, Count

use super::CombineFn;
use crate::value::{Number, Value};
use std::cmp::Ordering;

/* ===================== Sum ===================== */

/// Arithmetic sum.
///
/// - Accumulator: [`Number`]
/// - Output: [`Value::Int`], or [`Value::Float`] once a float is seen or the
///   integer sum overflows
///
/// Values without a numeric reading (arrays, objects, non-numeric strings)
/// count as `0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl CombineFn<Value, Number, Value> for Sum {
    fn create(&self) -> Number {
        Number::Int(0)
    }

    fn add_input(&self, acc: &mut Number, v: Value) {
        *acc = acc.add(v.to_number().unwrap_or(Number::Int(0)));
    }

    fn finish(&self, acc: Number) -> Value {
        acc.into_value()
    }
}

/* ===================== Min / Max ===================== */

fn keep_if(acc: &mut Option<Value>, v: Value, wanted: Ordering) {
    match acc {
        Some(cur) => {
            if v.loose_cmp(cur) == wanted {
                *cur = v
            }
        }
        None => *acc = Some(v),
    }
}

/// Smallest value under [`Value::loose_cmp`]; the first of equal values wins.
///
/// - Accumulator: `Option<Value>`
/// - Output: `Value` (`Null` when no input was seen)
#[derive(Clone, Copy, Debug, Default)]
pub struct Min;

impl CombineFn<Value, Option<Value>, Value> for Min {
    fn create(&self) -> Option<Value> {
        None
    }

    fn add_input(&self, acc: &mut Option<Value>, v: Value) {
        keep_if(acc, v, Ordering::Less);
    }

    fn finish(&self, acc: Option<Value>) -> Value {
        acc.unwrap_or(Value::Null)
    }
}

/// Largest value under [`Value::loose_cmp`]; the first of equal values wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct Max;

impl CombineFn<Value, Option<Value>, Value> for Max {
    fn create(&self) -> Option<Value> {
        None
    }

    fn add_input(&self, acc: &mut Option<Value>, v: Value) {
        keep_if(acc, v, Ordering::Greater);
    }

    fn finish(&self, acc: Option<Value>) -> Value {
        acc.unwrap_or(Value::Null)
    }
}

/* ===================== Count ===================== */

#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl CombineFn<Value, usize, usize> for Count {
    fn create(&self) -> usize {
        0
    }

    fn add_input(&self, acc: &mut usize, _v: Value) {
        *acc += 1;
    }

    fn finish(&self, acc: usize) -> usize {
        acc
    }
}
