use hashbrown::HashMap;

use crate::value::Value;

/// Data-model placeholder for a hash table keyed by interned strings.
/// Not wired into the scanner, compiler, or VM: this core only compiles
/// a single expression, so there is nothing yet that needs global or
/// instance variable storage. Kept as a type so a future statement/
/// variable layer has somewhere to grow into.
#[derive(Default)]
pub struct Table {
  #[allow(dead_code)]
  entries: HashMap<String, Value>,
}

impl Table {
  pub fn new() -> Self {
    Table::default()
  }
}
