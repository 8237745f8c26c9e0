use glint_core::token::TokenKind;

use crate::precedence::Precedence;

/// Names a prefix or infix compiling function without needing raw
/// function pointers (which don't play well with `&mut self` methods
/// here) — a match in `Parser::apply` dispatches on these the same way a
/// table of indirect calls would, just through the compiler instead of
/// through memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFn {
  Grouping,
  Unary,
  Binary,
  Number,
  Literal,
  Str,
  None,
}

pub struct ParseRule {
  pub prefix: ParseFn,
  pub infix: ParseFn,
  pub precedence: Precedence,
}

/// The Pratt table: for every token kind, the prefix rule, the infix
/// rule, and the infix rule's precedence.
pub fn get_rule(kind: TokenKind) -> ParseRule {
  use ParseFn::*;
  use TokenKind::*;

  match kind {
    LEFT_PAREN => ParseRule { prefix: Grouping, infix: None, precedence: Precedence::NONE },
    MINUS => ParseRule { prefix: Unary, infix: Binary, precedence: Precedence::TERM },
    PLUS => ParseRule { prefix: ParseFn::None, infix: Binary, precedence: Precedence::TERM },
    SLASH | STAR => ParseRule { prefix: ParseFn::None, infix: Binary, precedence: Precedence::FACTOR },
    BANG => ParseRule { prefix: Unary, infix: ParseFn::None, precedence: Precedence::NONE },
    BANG_EQUAL | EQUAL_EQUAL => ParseRule { prefix: ParseFn::None, infix: Binary, precedence: Precedence::EQUALITY },
    GREATER | GREATER_EQUAL | LESS | LESS_EQUAL => {
      ParseRule { prefix: ParseFn::None, infix: Binary, precedence: Precedence::COMPARISON }
    }
    NUMBER => ParseRule { prefix: Number, infix: ParseFn::None, precedence: Precedence::NONE },
    STRING => ParseRule { prefix: Str, infix: ParseFn::None, precedence: Precedence::NONE },
    FALSE | NIL | TRUE => ParseRule { prefix: Literal, infix: ParseFn::None, precedence: Precedence::NONE },
    _ => ParseRule { prefix: ParseFn::None, infix: ParseFn::None, precedence: Precedence::NONE },
  }
}
