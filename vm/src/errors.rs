use thiserror::Error;

/// A typed runtime failure. Each variant's `Display` text is the exact,
/// stable message the VM prints to stderr — the single source of truth
/// both the CLI's error protocol and any test assertions read from.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
  #[error("Operands must be numbers.")]
  OperandsMustBeNumbers,
  #[error("Operand must be a number")]
  OperandMustBeANumber,
  #[error("Operands must be two numbers or two strings")]
  OperandsMustBeTwoNumbersOrTwoStrings,
  #[error("Stack overflow.")]
  StackOverflow,
}

/// Outcome of one `VM::interpret` call, mirrored to the CLI's exit-code
/// mapping in the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretResult {
  Ok,
  CompileError,
  RuntimeError,
}
