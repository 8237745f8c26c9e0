//! The scanner: a source cursor that produces one token per call, with no
//! allocation of its own. Tokens borrow their lexeme from the source
//! buffer passed to [`Scanner::new`].

use glint_core::token::{Token, TokenKind};

/// Source cursor for the token stream. `start` marks the beginning of the
/// lexeme currently being scanned, `current` is the read cursor, and
/// `line` is the 1-based line of `current`.
pub struct Scanner<'src> {
  source: &'src str,
  bytes: &'src [u8],
  start: usize,
  current: usize,
  line: u32,
}

impl<'src> Scanner<'src> {
  pub fn new(source: &'src str) -> Self {
    Scanner { source, bytes: source.as_bytes(), start: 0, current: 0, line: 1 }
  }

  pub fn line(&self) -> u32 {
    self.line
  }

  /// Produces the next token. Skips whitespace and comments first.
  pub fn scan_token(&mut self) -> Token<'src> {
    self.skip_whitespace();
    self.start = self.current;

    if self.is_at_end() {
      return self.make_token(TokenKind::EOF);
    }

    let c = self.advance();

    if is_alpha(c) {
      return self.identifier();
    }
    if c.is_ascii_digit() {
      return self.number();
    }

    match c {
      b'(' => self.make_token(TokenKind::LEFT_PAREN),
      b')' => self.make_token(TokenKind::RIGHT_PAREN),
      b'{' => self.make_token(TokenKind::LEFT_BRACE),
      b'}' => self.make_token(TokenKind::RIGHT_BRACE),
      b';' => self.make_token(TokenKind::SEMICOLON),
      b',' => self.make_token(TokenKind::COMMA),
      b'.' => self.make_token(TokenKind::DOT),
      b'-' => self.make_token(TokenKind::MINUS),
      b'+' => self.make_token(TokenKind::PLUS),
      b'/' => self.make_token(TokenKind::SLASH),
      b'*' => self.make_token(TokenKind::STAR),
      b'!' => {
        let kind = if self.matches(b'=') { TokenKind::BANG_EQUAL } else { TokenKind::BANG };
        self.make_token(kind)
      }
      b'=' => {
        let kind = if self.matches(b'=') { TokenKind::EQUAL_EQUAL } else { TokenKind::EQUAL };
        self.make_token(kind)
      }
      b'<' => {
        let kind = if self.matches(b'=') { TokenKind::LESS_EQUAL } else { TokenKind::LESS };
        self.make_token(kind)
      }
      b'>' => {
        let kind = if self.matches(b'=') { TokenKind::GREATER_EQUAL } else { TokenKind::GREATER };
        self.make_token(kind)
      }
      b'"' => self.string(),
      _ => Token::error("unexpected character", self.line),
    }
  }

  fn is_at_end(&self) -> bool {
    self.current >= self.bytes.len()
  }

  fn advance(&mut self) -> u8 {
    let c = self.bytes[self.current];
    self.current += 1;
    c
  }

  fn peek(&self) -> u8 {
    if self.is_at_end() {
      0
    } else {
      self.bytes[self.current]
    }
  }

  fn peek_next(&self) -> u8 {
    if self.current + 1 >= self.bytes.len() {
      0
    } else {
      self.bytes[self.current + 1]
    }
  }

  fn matches(&mut self, expected: u8) -> bool {
    if self.is_at_end() || self.bytes[self.current] != expected {
      return false;
    }
    self.current += 1;
    true
  }

  fn skip_whitespace(&mut self) {
    loop {
      match self.peek() {
        b' ' | b'\r' | b'\t' => {
          self.current += 1;
        }
        b'\n' => {
          self.line += 1;
          self.current += 1;
        }
        b'/' => {
          if self.peek_next() == b'/' {
            while self.peek() != b'\n' && !self.is_at_end() {
              self.current += 1;
            }
          } else {
            return;
          }
        }
        _ => return,
      }
    }
  }

  fn make_token(&self, kind: TokenKind) -> Token<'src> {
    Token::new(kind, &self.source[self.start..self.current], self.line)
  }

  fn string(&mut self) -> Token<'src> {
    while self.peek() != b'"' && !self.is_at_end() {
      if self.peek() == b'\n' {
        self.line += 1;
      }
      self.current += 1;
    }

    if self.is_at_end() {
      return Token::error("Unterminated string", self.line);
    }

    // Consume the closing quote.
    self.current += 1;
    self.make_token(TokenKind::STRING)
  }

  fn number(&mut self) -> Token<'src> {
    while self.peek().is_ascii_digit() {
      self.current += 1;
    }

    if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
      self.current += 1;
      while self.peek().is_ascii_digit() {
        self.current += 1;
      }
    }

    self.make_token(TokenKind::NUMBER)
  }

  fn identifier(&mut self) -> Token<'src> {
    while is_alpha(self.peek()) || self.peek().is_ascii_digit() {
      self.current += 1;
    }
    self.make_token(self.identifier_kind())
  }

  /// Classifies the just-scanned identifier lexeme as a keyword or a
  /// plain `IDENTIFIER`, branching on the first byte the way a
  /// hand-written trie would to avoid a full string-table lookup for the
  /// common case.
  fn identifier_kind(&self) -> TokenKind {
    let lexeme = &self.source[self.start..self.current];
    match lexeme {
      "and" => TokenKind::AND,
      "class" => TokenKind::CLASS,
      "else" => TokenKind::ELSE,
      "false" => TokenKind::FALSE,
      "for" => TokenKind::FOR,
      "fun" => TokenKind::FUN,
      "if" => TokenKind::IF,
      "nil" => TokenKind::NIL,
      "or" => TokenKind::OR,
      "print" => TokenKind::PRINT,
      "return" => TokenKind::RETURN,
      "super" => TokenKind::SUPER,
      "this" => TokenKind::THIS,
      "true" => TokenKind::TRUE,
      "var" => TokenKind::VAR,
      "while" => TokenKind::WHILE,
      _ => TokenKind::IDENTIFIER,
    }
  }
}

fn is_alpha(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'_'
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(src: &str) -> Vec<TokenKind> {
    let mut scanner = Scanner::new(src);
    let mut out = Vec::new();
    loop {
      let tok = scanner.scan_token();
      let done = tok.kind == TokenKind::EOF;
      out.push(tok.kind);
      if done {
        break;
      }
    }
    out
  }

  #[test]
  fn single_char_tokens() {
    assert_eq!(
      kinds("(){};,.+-/*"),
      vec![
        TokenKind::LEFT_PAREN,
        TokenKind::RIGHT_PAREN,
        TokenKind::LEFT_BRACE,
        TokenKind::RIGHT_BRACE,
        TokenKind::SEMICOLON,
        TokenKind::COMMA,
        TokenKind::DOT,
        TokenKind::PLUS,
        TokenKind::MINUS,
        TokenKind::SLASH,
        TokenKind::STAR,
        TokenKind::EOF,
      ]
    );
  }

  #[test]
  fn two_char_tokens_with_optional_equal_tail() {
    assert_eq!(
      kinds("! != = == < <= > >="),
      vec![
        TokenKind::BANG,
        TokenKind::BANG_EQUAL,
        TokenKind::EQUAL,
        TokenKind::EQUAL_EQUAL,
        TokenKind::LESS,
        TokenKind::LESS_EQUAL,
        TokenKind::GREATER,
        TokenKind::GREATER_EQUAL,
        TokenKind::EOF,
      ]
    );
  }

  #[test]
  fn keywords_vs_identifiers() {
    assert_eq!(kinds("nil"), vec![TokenKind::NIL, TokenKind::EOF]);
    assert_eq!(kinds("niladic"), vec![TokenKind::IDENTIFIER, TokenKind::EOF]);
  }

  #[test]
  fn number_with_fraction() {
    let mut scanner = Scanner::new("12.34");
    let tok = scanner.scan_token();
    assert_eq!(tok.kind, TokenKind::NUMBER);
    assert_eq!(tok.lexeme, "12.34");
  }

  #[test]
  fn trailing_dot_without_digit_is_not_consumed() {
    let mut scanner = Scanner::new("12.");
    let tok = scanner.scan_token();
    assert_eq!(tok.kind, TokenKind::NUMBER);
    assert_eq!(tok.lexeme, "12");
    let dot = scanner.scan_token();
    assert_eq!(dot.kind, TokenKind::DOT);
  }

  #[test]
  fn unterminated_string_is_an_error_token() {
    let mut scanner = Scanner::new("\"abc");
    let tok = scanner.scan_token();
    assert_eq!(tok.kind, TokenKind::ERROR);
    assert_eq!(tok.lexeme, "Unterminated string");
  }

  #[test]
  fn string_literal_lexeme_includes_quotes() {
    let mut scanner = Scanner::new("\"hi\"");
    let tok = scanner.scan_token();
    assert_eq!(tok.kind, TokenKind::STRING);
    assert_eq!(tok.lexeme, "\"hi\"");
  }

  #[test]
  fn comments_are_skipped_to_end_of_line() {
    let mut scanner = Scanner::new("1 // a comment\n+ 2");
    assert_eq!(scanner.scan_token().kind, TokenKind::NUMBER);
    let plus = scanner.scan_token();
    assert_eq!(plus.kind, TokenKind::PLUS);
    assert_eq!(plus.line, 2);
  }

  #[test]
  fn newlines_advance_line_counter() {
    let mut scanner = Scanner::new("1\n\n+");
    scanner.scan_token();
    let plus = scanner.scan_token();
    assert_eq!(plus.line, 3);
  }

  #[test]
  fn unexpected_character_is_an_error_token() {
    let mut scanner = Scanner::new("@");
    let tok = scanner.scan_token();
    assert_eq!(tok.kind, TokenKind::ERROR);
    assert_eq!(tok.lexeme, "unexpected character");
  }
}
