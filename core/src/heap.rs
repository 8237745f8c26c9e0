use crate::object::{HeapObject, StrObject};

/// A non-owning reference to a heap object. Validity is coextensive with
/// the `Heap` that produced it — a `Handle` must never be dereferenced
/// against a different `Heap`, nor kept around after that heap is
/// dropped. Handles are opaque; nothing outside this module sees the
/// underlying index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(u32);

/// All live heap objects, in allocation order. Registration is
/// append-only during a VM session: every allocation is pushed here and
/// the whole list is dropped in bulk when the `Heap` (and therefore the
/// owning `VM`) is torn down. No cycles are possible because nothing but
/// the `Heap` itself threads through these objects.
#[derive(Debug, Default)]
pub struct Heap {
  objects: Vec<HeapObject>,
}

impl Heap {
  pub fn new() -> Self {
    Heap::default()
  }

  /// Registers a new string object and returns a handle to it. Deliberately
  /// does not check for an existing equal string: the core does not intern.
  pub fn alloc_string(&mut self, obj: StrObject) -> Handle {
    self.objects.push(HeapObject::Str(obj));
    Handle((self.objects.len() - 1) as u32)
  }

  pub fn get(&self, handle: Handle) -> &HeapObject {
    &self.objects[handle.0 as usize]
  }

  pub fn get_str(&self, handle: Handle) -> &StrObject {
    self.get(handle).as_str_object().expect("handle does not reference a string object")
  }

  pub fn len(&self) -> usize {
    self.objects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn duplicate_content_allocates_distinct_handles() {
    let mut heap = Heap::new();
    let a = heap.alloc_string(StrObject::new(b"hi".to_vec().into_boxed_slice()));
    let b = heap.alloc_string(StrObject::new(b"hi".to_vec().into_boxed_slice()));
    assert_ne!(a, b);
    assert!(heap.get_str(a).content_eq(heap.get_str(b)));
  }

  #[test]
  fn heap_grows_with_every_allocation() {
    let mut heap = Heap::new();
    assert_eq!(heap.len(), 0);
    heap.alloc_string(StrObject::new(b"x".to_vec().into_boxed_slice()));
    assert_eq!(heap.len(), 1);
  }
}
