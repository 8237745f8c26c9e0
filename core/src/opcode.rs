/// The set of instructions supported by the virtual machine.
///
/// **NOTE:** changing the order or adding/removing a member changes the
/// wire encoding used by every `Chunk`; chunks are never persisted across
/// builds, so this only matters within a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum OpCode {
  OP_CONSTANT,
  OP_NIL,
  OP_TRUE,
  OP_FALSE,
  OP_EQUAL,
  OP_GREATER,
  OP_LESS,
  OP_ADD,
  OP_SUBTRACT,
  OP_MULTIPLY,
  OP_DIVIDE,
  OP_NOT,
  OP_NEGATE,
  OP_RETURN,
}

impl OpCode {
  /// Number of operand bytes that follow this opcode in the chunk.
  /// Only `OP_CONSTANT` carries one.
  pub fn operand_len(self) -> usize {
    match self {
      OpCode::OP_CONSTANT => 1,
      _ => 0,
    }
  }
}

impl From<OpCode> for u8 {
  fn from(op: OpCode) -> u8 {
    op as u8
  }
}

impl TryFrom<u8> for OpCode {
  type Error = u8;

  fn try_from(byte: u8) -> Result<Self, u8> {
    use OpCode::*;
    const TABLE: [OpCode; 14] = [
      OP_CONSTANT,
      OP_NIL,
      OP_TRUE,
      OP_FALSE,
      OP_EQUAL,
      OP_GREATER,
      OP_LESS,
      OP_ADD,
      OP_SUBTRACT,
      OP_MULTIPLY,
      OP_DIVIDE,
      OP_NOT,
      OP_NEGATE,
      OP_RETURN,
    ];
    TABLE.get(byte as usize).copied().ok_or(byte)
  }
}
