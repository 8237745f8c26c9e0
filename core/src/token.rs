/// The kind of a scanned token.
///
/// Keyword variants mirror the reserved words accepted by the scanner
/// even though the compiler (expression-only) only ever treats `false`,
/// `nil`, and `true` as prefix literals — the rest are recognized so the
/// lexical surface matches the full language, per the scanner's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
  // Single-character tokens.
  LEFT_PAREN,
  RIGHT_PAREN,
  LEFT_BRACE,
  RIGHT_BRACE,
  SEMICOLON,
  COMMA,
  DOT,
  MINUS,
  PLUS,
  SLASH,
  STAR,

  // One or two character tokens.
  BANG,
  BANG_EQUAL,
  EQUAL,
  EQUAL_EQUAL,
  GREATER,
  GREATER_EQUAL,
  LESS,
  LESS_EQUAL,

  // Literals.
  IDENTIFIER,
  STRING,
  NUMBER,

  // Keywords.
  AND,
  CLASS,
  ELSE,
  FALSE,
  FOR,
  FUN,
  IF,
  NIL,
  OR,
  PRINT,
  RETURN,
  SUPER,
  THIS,
  TRUE,
  VAR,
  WHILE,

  ERROR,
  EOF,
}

/// A single lexical token. The `lexeme` is a borrowed slice of the source
/// buffer for every kind except `ERROR`, where it is instead a static
/// message describing the scan failure — the source must outlive every
/// `Token` that references it.
#[derive(Debug, Clone, Copy)]
pub struct Token<'src> {
  pub kind: TokenKind,
  pub lexeme: &'src str,
  pub line: u32,
}

impl<'src> Token<'src> {
  pub fn new(kind: TokenKind, lexeme: &'src str, line: u32) -> Self {
    Token { kind, lexeme, line }
  }

  pub fn error(message: &'static str, line: u32) -> Self {
    Token { kind: TokenKind::ERROR, lexeme: message, line }
  }
}
