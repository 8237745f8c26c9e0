//! The stack machine that executes a compiled `Chunk`.

mod errors;

pub use errors::{InterpretResult, RuntimeError};

use glint_core::chunk::Chunk;
use glint_core::heap::Heap;
use glint_core::object::StrObject;
use glint_core::opcode::OpCode;
use glint_core::value::{display_value, values_equal, Value};

/// Fixed operand-stack capacity. Deeply nested expressions beyond this
/// depth are a `RuntimeError::StackOverflow`, not undefined behavior —
/// see the open question in spec.md: this core chooses a runtime
/// push-check over a compile-time recursion-depth limit.
const STACK_MAX: usize = 256;

/// The stack machine. Owns the heap for the VM's whole lifetime; a
/// `Chunk` is only borrowed for the duration of one `interpret` call.
pub struct VM {
  stack: [Value; STACK_MAX],
  stack_top: usize,
  heap: Heap,
  #[cfg(feature = "trace_execution")]
  trace: bool,
}

impl Default for VM {
  fn default() -> Self {
    VM::new()
  }
}

impl VM {
  pub fn new() -> Self {
    VM {
      stack: [Value::Nil; STACK_MAX],
      stack_top: 0,
      heap: Heap::new(),
      #[cfg(feature = "trace_execution")]
      trace: false,
    }
  }

  /// Enables the disassembler's per-instruction trace on stdout. Only
  /// meaningful when built with the `trace_execution` feature.
  #[cfg(feature = "trace_execution")]
  pub fn set_trace(&mut self, trace: bool) {
    self.trace = trace;
  }

  /// Compiles and runs `source`. A compile error never reaches `run`:
  /// the chunk it would have produced is discarded.
  pub fn interpret(&mut self, source: &str) -> InterpretResult {
    let mut chunk = Chunk::new();
    if !glint_compiler::compile(source, &mut chunk, &mut self.heap) {
      return InterpretResult::CompileError;
    }
    self.run(&chunk)
  }

  fn push(&mut self, value: Value) -> Result<(), RuntimeError> {
    if self.stack_top >= STACK_MAX {
      return Err(RuntimeError::StackOverflow);
    }
    self.stack[self.stack_top] = value;
    self.stack_top += 1;
    Ok(())
  }

  fn pop(&mut self) -> Value {
    debug_assert!(self.stack_top > 0, "stack underflow on well-formed bytecode");
    self.stack_top -= 1;
    self.stack[self.stack_top]
  }

  fn peek(&self, distance: usize) -> Value {
    self.stack[self.stack_top - 1 - distance]
  }

  /// The execution loop. Runs `chunk` to completion, printing the
  /// `OP_RETURN` result or reporting a runtime error.
  fn run(&mut self, chunk: &Chunk) -> InterpretResult {
    let mut ip = 0usize;

    loop {
      #[cfg(feature = "trace_execution")]
      if self.trace {
        glint_disasm::disassemble_instruction(chunk, &self.heap, ip);
      }

      let byte = chunk.code()[ip];
      ip += 1;
      let op = OpCode::try_from(byte).expect("well-formed chunk contains only valid opcodes");

      let step = match op {
        OpCode::OP_CONSTANT => {
          let index = chunk.code()[ip];
          ip += 1;
          self.push(chunk.constants()[index as usize])
        }
        OpCode::OP_NIL => self.push(Value::Nil),
        OpCode::OP_TRUE => self.push(Value::Bool(true)),
        OpCode::OP_FALSE => self.push(Value::Bool(false)),
        OpCode::OP_EQUAL => {
          let b = self.pop();
          let a = self.pop();
          self.push(Value::Bool(values_equal(&a, &b, &self.heap)))
        }
        OpCode::OP_GREATER => self.binary_numeric(|a, b| Value::Bool(a > b)),
        OpCode::OP_LESS => self.binary_numeric(|a, b| Value::Bool(a < b)),
        OpCode::OP_ADD => self.add(),
        OpCode::OP_SUBTRACT => self.binary_numeric(|a, b| Value::Number(a - b)),
        OpCode::OP_MULTIPLY => self.binary_numeric(|a, b| Value::Number(a * b)),
        OpCode::OP_DIVIDE => self.binary_numeric(|a, b| Value::Number(a / b)),
        OpCode::OP_NOT => {
          let value = self.pop();
          self.push(Value::Bool(value.is_falsey()))
        }
        OpCode::OP_NEGATE => self.negate(),
        OpCode::OP_RETURN => {
          let value = self.pop();
          println!("{}", display_value(&value, &self.heap));
          return InterpretResult::Ok;
        }
      };

      if let Err(err) = step {
        return self.report_runtime_error(err, chunk, ip);
      }
    }
  }

  fn binary_numeric(&mut self, f: impl Fn(f64, f64) -> Value) -> Result<(), RuntimeError> {
    if !self.peek(0).is_number() || !self.peek(1).is_number() {
      return Err(RuntimeError::OperandsMustBeNumbers);
    }
    let b = self.pop().as_number().unwrap();
    let a = self.pop().as_number().unwrap();
    self.push(f(a, b))
  }

  fn add(&mut self) -> Result<(), RuntimeError> {
    let both_strings = self.peek(0).is_string(&self.heap) && self.peek(1).is_string(&self.heap);
    let both_numbers = self.peek(0).is_number() && self.peek(1).is_number();

    if both_strings {
      let b = self.pop();
      let a = self.pop();
      let (Value::Obj(ha), Value::Obj(hb)) = (a, b) else { unreachable!() };
      let concatenated = StrObject::concat(self.heap.get_str(ha), self.heap.get_str(hb));
      let handle = self.heap.alloc_string(concatenated);
      self.push(Value::Obj(handle))
    } else if both_numbers {
      let b = self.pop().as_number().unwrap();
      let a = self.pop().as_number().unwrap();
      self.push(Value::Number(a + b))
    } else {
      Err(RuntimeError::OperandsMustBeTwoNumbersOrTwoStrings)
    }
  }

  fn negate(&mut self) -> Result<(), RuntimeError> {
    if !self.peek(0).is_number() {
      return Err(RuntimeError::OperandMustBeANumber);
    }
    let value = self.pop();
    self.push(Value::Number(-value.as_number().unwrap()))
  }

  /// Prints the runtime error protocol (message, then `[line N] in
  /// script`) to stderr and resets the stack.
  fn report_runtime_error(&mut self, err: RuntimeError, chunk: &Chunk, ip: usize) -> InterpretResult {
    eprintln!("{err}");
    let line = chunk.line_at(ip - 1);
    eprintln!("[line {line}] in script");
    tracing::debug!(%err, line, "runtime error");
    self.stack_top = 0;
    InterpretResult::RuntimeError
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn addition() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret("1 + 2"), InterpretResult::Ok);
  }

  #[test]
  fn grouping_and_unary_precedence() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret("(-1 + 2) * 3 - -4"), InterpretResult::Ok);
  }

  #[test]
  fn comparison_and_negation_chain() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret("!(5 - 4 > 3 * 2 == !nil)"), InterpretResult::Ok);
  }

  #[test]
  fn string_concatenation() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret("\"st\" + \"ri\" + \"ng\""), InterpretResult::Ok);
  }

  #[test]
  fn compile_error_never_runs() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret("1 +"), InterpretResult::CompileError);
  }

  #[test]
  fn negating_a_bool_is_a_runtime_error() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret("-true"), InterpretResult::RuntimeError);
  }

  #[test]
  fn adding_a_string_and_a_number_is_a_runtime_error() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret("\"a\" + 1"), InterpretResult::RuntimeError);
  }

  #[test]
  fn runtime_error_resets_the_stack() {
    let mut vm = VM::new();
    vm.interpret("-true");
    assert_eq!(vm.stack_top, 0);
  }

  #[test]
  fn stack_overflow_on_deeply_nested_additions() {
    // Each nested group pushes one more constant before any `ADD` pops two
    // back off, so grouping depth translates directly into operand-stack
    // depth.
    let mut vm = VM::new();
    let depth = STACK_MAX + 8;
    let src = format!("{}1{}", "(1+".repeat(depth), ")".repeat(depth));
    assert_eq!(vm.interpret(&src), InterpretResult::RuntimeError);
  }

  #[test]
  fn double_not_is_the_identity_on_truthiness() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret("!!nil"), InterpretResult::Ok);
    assert_eq!(vm.interpret("!!0"), InterpretResult::Ok);
  }
}
