//! Human-readable bytecode dump, used only for diagnostic tracing. Its
//! output format is advisory, not part of the stable interpreter
//! contract in spec.md §6.

use glint_core::chunk::Chunk;
use glint_core::heap::Heap;
use glint_core::opcode::OpCode;
use glint_core::value::display_value;

/// Disassembles every instruction in `chunk`, printing a labeled listing
/// to stdout.
pub fn disassemble_chunk(chunk: &Chunk, heap: &Heap, name: &str) {
  println!("== {name} ==");

  let mut offset = 0;
  while offset < chunk.len() {
    offset = disassemble_instruction(chunk, heap, offset);
  }
}

/// Disassembles the single instruction at `offset`, printing one line,
/// and returns the offset of the next instruction.
pub fn disassemble_instruction(chunk: &Chunk, heap: &Heap, offset: usize) -> usize {
  print!("{offset:04} ");

  if offset > 0 && chunk.line_at(offset) == chunk.line_at(offset - 1) {
    print!("   | ");
  } else {
    print!("{:4} ", chunk.line_at(offset));
  }

  let byte = chunk.code()[offset];
  let op = match OpCode::try_from(byte) {
    Ok(op) => op,
    Err(unknown) => {
      println!("Unknown opcode {unknown}");
      return offset + 1;
    }
  };

  match op {
    OpCode::OP_CONSTANT => constant_instruction("OP_CONSTANT", chunk, heap, offset),
    OpCode::OP_NIL => simple_instruction("OP_NIL", offset),
    OpCode::OP_TRUE => simple_instruction("OP_TRUE", offset),
    OpCode::OP_FALSE => simple_instruction("OP_FALSE", offset),
    OpCode::OP_EQUAL => simple_instruction("OP_EQUAL", offset),
    OpCode::OP_GREATER => simple_instruction("OP_GREATER", offset),
    OpCode::OP_LESS => simple_instruction("OP_LESS", offset),
    OpCode::OP_ADD => simple_instruction("OP_ADD", offset),
    OpCode::OP_SUBTRACT => simple_instruction("OP_SUBTRACT", offset),
    OpCode::OP_MULTIPLY => simple_instruction("OP_MULTIPLY", offset),
    OpCode::OP_DIVIDE => simple_instruction("OP_DIVIDE", offset),
    OpCode::OP_NOT => simple_instruction("OP_NOT", offset),
    OpCode::OP_NEGATE => simple_instruction("OP_NEGATE", offset),
    OpCode::OP_RETURN => simple_instruction("OP_RETURN", offset),
  }
}

fn simple_instruction(name: &str, offset: usize) -> usize {
  println!("{name}");
  offset + 1
}

fn constant_instruction(name: &str, chunk: &Chunk, heap: &Heap, offset: usize) -> usize {
  let index = chunk.code()[offset + 1];
  let value = &chunk.constants()[index as usize];
  println!("{name:<16} {index:4} '{}'", display_value(value, heap));
  offset + 2
}

#[cfg(test)]
mod tests {
  use super::*;
  use glint_core::value::Value;

  #[test]
  fn simple_instruction_advances_by_one() {
    let mut chunk = Chunk::new();
    chunk.write_byte(OpCode::OP_RETURN.into(), 1);
    let heap = Heap::new();
    assert_eq!(disassemble_instruction(&chunk, &heap, 0), 1);
  }

  #[test]
  fn constant_instruction_advances_by_two() {
    let mut chunk = Chunk::new();
    let idx = chunk.add_constant(Value::Number(1.0));
    chunk.write_byte(OpCode::OP_CONSTANT.into(), 1);
    chunk.write_byte(idx as u8, 1);
    let heap = Heap::new();
    assert_eq!(disassemble_instruction(&chunk, &heap, 0), 2);
  }
}
