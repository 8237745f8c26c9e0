/// Operator-precedence levels, low to high. Each binary operator's
/// infix rule parses its right-hand side at `self.next()` so the
/// operator binds left-associatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
pub enum Precedence {
  NONE,
  ASSIGNMENT,
  OR,
  AND,
  EQUALITY,
  COMPARISON,
  TERM,
  FACTOR,
  UNARY,
  CALL,
  PRIMARY,
}

impl Precedence {
  pub fn next(self) -> Precedence {
    use Precedence::*;
    match self {
      NONE => ASSIGNMENT,
      ASSIGNMENT => OR,
      OR => AND,
      AND => EQUALITY,
      EQUALITY => COMPARISON,
      COMPARISON => TERM,
      TERM => FACTOR,
      FACTOR => UNARY,
      UNARY => CALL,
      CALL => PRIMARY,
      PRIMARY => PRIMARY,
    }
  }
}
