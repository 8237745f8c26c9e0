use crate::hash::hash_bytes;

/// An immutable byte-string heap object: owning buffer plus a hash
/// computed once at construction (a pure function of the content, per
/// the hashing contract in `hash.rs`).
///
/// Strings are never interned by the core — two distinct `StrObject`s may
/// hold equal bytes and must still compare equal by content, not identity.
#[derive(Debug, Clone)]
pub struct StrObject {
  bytes: Box<[u8]>,
  hash: u32,
}

impl StrObject {
  pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
    let bytes = bytes.into();
    let hash = hash_bytes(&bytes);
    StrObject { bytes, hash }
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  pub fn hash(&self) -> u32 {
    self.hash
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// The language only ever builds `StrObject`s from valid UTF-8 (source
  /// slices, or the concatenation of two such slices), so this is a plain
  /// view, not a fallible conversion.
  pub fn as_str(&self) -> &str {
    std::str::from_utf8(&self.bytes).expect("StrObject bytes are always valid UTF-8")
  }

  pub fn concat(a: &StrObject, b: &StrObject) -> StrObject {
    let mut bytes = Vec::with_capacity(a.len() + b.len());
    bytes.extend_from_slice(a.as_bytes());
    bytes.extend_from_slice(b.as_bytes());
    StrObject::new(bytes.into_boxed_slice())
  }

  pub fn content_eq(&self, other: &StrObject) -> bool {
    self.len() == other.len() && self.as_bytes() == other.as_bytes()
  }
}

impl std::fmt::Display for StrObject {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Discriminant for a heap allocation. Only `Str` exists today; the
/// variant exists so the heap's storage and `Value::Obj` handle can grow
/// further object kinds without changing their shape.
#[derive(Debug, Clone)]
pub enum HeapObject {
  Str(StrObject),
}

impl HeapObject {
  pub fn as_str_object(&self) -> Option<&StrObject> {
    match self {
      HeapObject::Str(s) => Some(s),
    }
  }
}
