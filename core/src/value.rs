use crate::heap::{Handle, Heap};

/// A dynamically-typed value. `Obj` is a non-owning handle into whatever
/// `Heap` produced it — its lifetime is controlled solely by that heap,
/// never by the `Value` that carries the handle.
#[derive(Debug, Clone, Copy)]
pub enum Value {
  Nil,
  Bool(bool),
  Number(f64),
  Obj(Handle),
}

impl Value {
  /// `nil` and `false` are falsey; every other value (including `0.0`,
  /// `true`, and any heap object) is truthy.
  pub fn is_falsey(&self) -> bool {
    matches!(self, Value::Nil | Value::Bool(false))
  }

  pub fn is_number(&self) -> bool {
    matches!(self, Value::Number(_))
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      Value::Number(n) => Some(*n),
      _ => None,
    }
  }

  pub fn is_string(&self, heap: &Heap) -> bool {
    matches!(self, Value::Obj(h) if heap.get(*h).as_str_object().is_some())
  }
}

/// Value equality needs the heap to compare string content. Tags must
/// match; within a tag, numeric equality is IEEE-754 `==` (so `NaN` is
/// never equal to itself), string equality compares length then bytes,
/// and cross-type comparisons are always false. This is a total function:
/// any (impossible) mismatched-tag pair simply falls through to `false`.
pub fn values_equal(a: &Value, b: &Value, heap: &Heap) -> bool {
  match (a, b) {
    (Value::Nil, Value::Nil) => true,
    (Value::Bool(x), Value::Bool(y)) => x == y,
    (Value::Number(x), Value::Number(y)) => x == y,
    (Value::Obj(x), Value::Obj(y)) => match (heap.get(*x).as_str_object(), heap.get(*y).as_str_object()) {
      (Some(sx), Some(sy)) => sx.content_eq(sy),
      _ => false,
    },
    _ => false,
  }
}

/// Renders a value for the `OP_RETURN` print protocol and the
/// disassembler's constant dump. Needs the heap to display `Obj` values.
pub fn display_value(value: &Value, heap: &Heap) -> String {
  match value {
    Value::Nil => "nil".to_string(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => format_number(*n),
    Value::Obj(h) => match heap.get(*h).as_str_object() {
      Some(s) => s.as_str().to_string(),
      None => "<obj>".to_string(),
    },
  }
}

/// Formats a float the way a C `printf("%g", ...)` would for the typical
/// case: integral values print without a trailing `.0`.
fn format_number(n: f64) -> String {
  if n.is_nan() {
    return "NaN".to_string();
  }
  if n.is_infinite() {
    return if n > 0.0 { "inf".to_string() } else { "-inf".to_string() };
  }
  if n == n.trunc() && n.abs() < 1e15 {
    format!("{}", n as i64)
  } else {
    format!("{n}")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::object::StrObject;

  #[test]
  fn nan_is_never_equal_to_itself() {
    let heap = Heap::new();
    let nan = Value::Number(f64::NAN);
    assert!(!values_equal(&nan, &nan, &heap));
  }

  #[test]
  fn cross_type_comparison_is_false() {
    let heap = Heap::new();
    assert!(!values_equal(&Value::Nil, &Value::Bool(false), &heap));
    assert!(!values_equal(&Value::Number(0.0), &Value::Bool(false), &heap));
  }

  #[test]
  fn falsey_values() {
    assert!(Value::Nil.is_falsey());
    assert!(Value::Bool(false).is_falsey());
    assert!(!Value::Bool(true).is_falsey());
    assert!(!Value::Number(0.0).is_falsey());
  }

  #[test]
  fn distinct_string_allocations_with_equal_content_compare_equal() {
    let mut heap = Heap::new();
    let a = heap.alloc_string(StrObject::new(b"ab".to_vec().into_boxed_slice()));
    let b = heap.alloc_string(StrObject::new(b"ab".to_vec().into_boxed_slice()));
    assert!(values_equal(&Value::Obj(a), &Value::Obj(b), &heap));
  }

  #[test]
  fn integral_numbers_display_without_trailing_zero() {
    let heap = Heap::new();
    assert_eq!(display_value(&Value::Number(7.0), &heap), "7");
    assert_eq!(display_value(&Value::Number(7.5), &heap), "7.5");
  }
}
