//! Contract for the external code generator.
//!
//! Translation of the AST into a target representation lives outside
//! this crate; what lives here is the seam. A backend receives one
//! [`Function`] or [`Prototype`] at a time, resolves variables and
//! callees against its own tables, and maps the four binary operators
//! onto fixed target operations. A backend keeps its state in an
//! explicit context (`&mut self`), never in process-wide globals.

use crate::ast::{Function, Prototype};
use crate::error::CodegenError;

/// The fixed set of operations a backend must provide for
/// [`Expr::Binary`](crate::ast::Expr::Binary) nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    /// `<`, compiled as an unordered less-than comparison.
    UnorderedLessThan,
}

impl BinaryOp {
    /// Maps an operator symbol from the AST onto a target operation.
    ///
    /// Any symbol outside `+ - * <` reaching a backend is a front-end
    /// bug, reported as [`CodegenError::UnsupportedOperator`].
    pub fn from_symbol(op: char) -> Result<Self, CodegenError> {
        match op {
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Subtract),
            '*' => Ok(Self::Multiply),
            '<' => Ok(Self::UnorderedLessThan),
            other => Err(CodegenError::UnsupportedOperator(other)),
        }
    }
}

/// One code generation target.
pub trait Backend {
    /// Handle the target assigns to a declared or defined function.
    type Value;

    /// Declares a prototype (an `extern` or a definition's signature).
    fn declare(&mut self, proto: &Prototype) -> Result<Self::Value, CodegenError>;

    /// Defines a function, body included. Anonymous functions
    /// (see [`Function::is_anonymous`]) are candidates for immediate
    /// evaluation by the embedding application.
    fn define(&mut self, function: &Function) -> Result<Self::Value, CodegenError>;
}
