//! The single-pass Pratt expression compiler: turns a token stream into
//! the bytecode for one `Chunk`, emitting opcodes as it parses rather
//! than building an intermediate AST.

mod precedence;
mod rules;

use glint_core::chunk::Chunk;
use glint_core::heap::Heap;
use glint_core::object::StrObject;
use glint_core::opcode::OpCode;
use glint_core::token::{Token, TokenKind};
use glint_core::value::Value;
use glint_lexer::Scanner;

use precedence::Precedence;
use rules::{get_rule, ParseFn};

/// Transient parser state; lives only for the duration of a single
/// `compile` call.
struct Parser<'src, 'out> {
  scanner: Scanner<'src>,
  chunk: &'out mut Chunk,
  heap: &'out mut Heap,
  previous: Token<'src>,
  current: Token<'src>,
  had_error: bool,
  panic_mode: bool,
}

/// Compiles `source` into `chunk`, registering any string literals in
/// `heap`. Returns `true` on success. On failure the chunk may contain
/// partial code and must not be executed.
pub fn compile(source: &str, chunk: &mut Chunk, heap: &mut Heap) -> bool {
  let placeholder = Token::new(TokenKind::EOF, "", 0);
  let mut parser = Parser {
    scanner: Scanner::new(source),
    chunk,
    heap,
    previous: placeholder,
    current: placeholder,
    had_error: false,
    panic_mode: false,
  };

  parser.advance();
  parser.expression();
  parser.consume(TokenKind::EOF, "Expect end of expression");
  parser.emit_return();

  !parser.had_error
}

impl<'src, 'out> Parser<'src, 'out> {
  fn advance(&mut self) {
    self.previous = self.current;

    loop {
      self.current = self.scanner.scan_token();
      if self.current.kind != TokenKind::ERROR {
        break;
      }
      self.error_at_current(self.current.lexeme);
    }
  }

  fn consume(&mut self, kind: TokenKind, message: &str) {
    if self.current.kind == kind {
      self.advance();
      return;
    }
    self.error_at_current(message);
  }

  fn expression(&mut self) {
    self.parse_precedence(Precedence::ASSIGNMENT);
  }

  fn parse_precedence(&mut self, precedence: Precedence) {
    self.advance();

    let prefix_rule = get_rule(self.previous.kind).prefix;
    if prefix_rule == ParseFn::None {
      self.error_at_previous("Expect expression");
      return;
    }
    self.apply(prefix_rule);

    while precedence <= get_rule(self.current.kind).precedence {
      self.advance();
      let infix_rule = get_rule(self.previous.kind).infix;
      self.apply(infix_rule);
    }
  }

  fn apply(&mut self, f: ParseFn) {
    match f {
      ParseFn::Grouping => self.grouping(),
      ParseFn::Unary => self.unary(),
      ParseFn::Binary => self.binary(),
      ParseFn::Number => self.number(),
      ParseFn::Literal => self.literal(),
      ParseFn::Str => self.string(),
      ParseFn::None => unreachable!("apply() called with no parse function"),
    }
  }

  fn grouping(&mut self) {
    self.expression();
    self.consume(TokenKind::RIGHT_PAREN, "Expect ')' after expression");
  }

  fn number(&mut self) {
    let value: f64 = self.previous.lexeme.parse().expect("scanner only produces well-formed number lexemes");
    self.emit_constant(Value::Number(value));
  }

  fn string(&mut self) {
    let lexeme = self.previous.lexeme;
    let content = &lexeme[1..lexeme.len() - 1];
    let obj = StrObject::new(content.as_bytes().to_vec().into_boxed_slice());
    let handle = self.heap.alloc_string(obj);
    self.emit_constant(Value::Obj(handle));
  }

  fn literal(&mut self) {
    match self.previous.kind {
      TokenKind::FALSE => self.emit_op(OpCode::OP_FALSE),
      TokenKind::NIL => self.emit_op(OpCode::OP_NIL),
      TokenKind::TRUE => self.emit_op(OpCode::OP_TRUE),
      _ => unreachable!("literal() called on a non-literal token"),
    }
  }

  fn unary(&mut self) {
    let operator = self.previous.kind;
    self.parse_precedence(Precedence::UNARY);

    match operator {
      TokenKind::BANG => self.emit_op(OpCode::OP_NOT),
      TokenKind::MINUS => self.emit_op(OpCode::OP_NEGATE),
      _ => unreachable!("unary() called on a non-unary operator"),
    }
  }

  fn binary(&mut self) {
    let operator = self.previous.kind;
    let rule = get_rule(operator);
    self.parse_precedence(rule.precedence.next());

    match operator {
      TokenKind::PLUS => self.emit_op(OpCode::OP_ADD),
      TokenKind::MINUS => self.emit_op(OpCode::OP_SUBTRACT),
      TokenKind::STAR => self.emit_op(OpCode::OP_MULTIPLY),
      TokenKind::SLASH => self.emit_op(OpCode::OP_DIVIDE),
      TokenKind::EQUAL_EQUAL => self.emit_op(OpCode::OP_EQUAL),
      TokenKind::BANG_EQUAL => {
        self.emit_op(OpCode::OP_EQUAL);
        self.emit_op(OpCode::OP_NOT);
      }
      TokenKind::GREATER => self.emit_op(OpCode::OP_GREATER),
      TokenKind::GREATER_EQUAL => {
        self.emit_op(OpCode::OP_LESS);
        self.emit_op(OpCode::OP_NOT);
      }
      TokenKind::LESS => self.emit_op(OpCode::OP_LESS),
      TokenKind::LESS_EQUAL => {
        self.emit_op(OpCode::OP_GREATER);
        self.emit_op(OpCode::OP_NOT);
      }
      _ => unreachable!("binary() called on a non-binary operator"),
    }
  }

  fn make_constant(&mut self, value: Value) -> u8 {
    let index = self.chunk.add_constant(value);
    if index > u8::MAX as usize {
      self.error_at_previous("Too many constants in one chunk");
      return 0;
    }
    index as u8
  }

  fn emit_constant(&mut self, value: Value) {
    let index = self.make_constant(value);
    self.emit_op(OpCode::OP_CONSTANT);
    self.emit_byte(index);
  }

  fn emit_op(&mut self, op: OpCode) {
    self.emit_byte(op.into());
  }

  fn emit_byte(&mut self, byte: u8) {
    self.chunk.write_byte(byte, self.previous.line);
  }

  fn emit_return(&mut self) {
    self.emit_op(OpCode::OP_RETURN);
  }

  fn error_at_current(&mut self, message: &str) {
    let token = self.current;
    self.error_at(token, message);
  }

  fn error_at_previous(&mut self, message: &str) {
    let token = self.previous;
    self.error_at(token, message);
  }

  fn error_at(&mut self, token: Token<'src>, message: &str) {
    if self.panic_mode {
      return;
    }
    self.panic_mode = true;
    self.had_error = true;

    let at = match token.kind {
      TokenKind::EOF => " at end".to_string(),
      TokenKind::ERROR => String::new(),
      _ => format!(" at '{}'", token.lexeme),
    };

    eprintln!("[line {}] Error{}: {}", token.line, at, message);
    tracing::debug!(line = token.line, "compile error reported: {message}");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn compile_ok(src: &str) -> (Chunk, Heap) {
    let mut chunk = Chunk::new();
    let mut heap = Heap::new();
    assert!(compile(src, &mut chunk, &mut heap), "expected {src:?} to compile");
    (chunk, heap)
  }

  #[test]
  fn successful_compile_ends_with_return() {
    let (chunk, _heap) = compile_ok("1 + 2");
    assert_eq!(*chunk.code().last().unwrap(), OpCode::OP_RETURN as u8);
  }

  #[test]
  fn every_constant_operand_is_in_range() {
    let (chunk, _heap) = compile_ok("1 + 2 * 3");
    let mut i = 0;
    while i < chunk.len() {
      let op = OpCode::try_from(chunk.code()[i]).unwrap();
      if op == OpCode::OP_CONSTANT {
        let idx = chunk.code()[i + 1];
        assert!((idx as usize) < chunk.constants_count());
      }
      i += 1 + op.operand_len();
    }
  }

  #[test]
  fn unterminated_expression_fails_to_compile() {
    let mut chunk = Chunk::new();
    let mut heap = Heap::new();
    assert!(!compile("1 +", &mut chunk, &mut heap));
  }

  #[test]
  fn too_many_constants_reports_overflow_and_uses_index_zero() {
    let src = (0..300).map(|n| n.to_string()).collect::<Vec<_>>().join(" + ");
    let mut chunk = Chunk::new();
    let mut heap = Heap::new();
    // Still "compiles" in the sense of producing bytecode, but `had_error`
    // must be sticky once the pool overflows.
    assert!(!compile(&src, &mut chunk, &mut heap));
  }

  #[test]
  fn left_associative_subtraction() {
    let (chunk, _heap) = compile_ok("1 - 2 - 3");
    let ops: Vec<OpCode> = chunk.code().iter().filter_map(|b| OpCode::try_from(*b).ok()).collect();
    let subtracts = ops.iter().filter(|o| **o == OpCode::OP_SUBTRACT).count();
    assert_eq!(subtracts, 2);
  }
}
