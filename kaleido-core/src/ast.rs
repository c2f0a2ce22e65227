//! Abstract syntax tree for the Kaleido language.
//!
//! The tree is strictly owned: every node has exactly one parent (or
//! is the root held by a [`Function`]), and nothing here is mutated
//! after construction. The parser builds these values and hands them
//! whole to whatever backend consumes them.

/// One expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Binary {
        op: char,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
    },
}

/// A function's name and parameter list, without a body.
///
/// Parameter order is significant; uniqueness is not enforced here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
}

/// A function definition: prototype plus body expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub proto: Prototype,
    pub body: Expr,
}

impl Function {
    /// Wraps a bare expression as an anonymous function, used for
    /// immediate evaluation of top-level expressions.
    pub fn top_level(body: Expr) -> Self {
        Self {
            proto: Prototype {
                name: String::new(),
                params: Vec::new(),
            },
            body,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.proto.name.is_empty() && self.proto.params.is_empty()
    }
}

/// One outcome of the top-level parse loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Definition(Function),
    Extern(Prototype),
    TopLevel(Function),
}
