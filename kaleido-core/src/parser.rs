//! Recursive-descent parser with precedence climbing.
//!
//! The parser consumes tokens strictly left to right through a
//! [`Lookahead`] buffer; every production is resolvable from the
//! current token plus one token of lookahead. Binary expressions use
//! precedence climbing: a fixed operator table, left associativity for
//! equal precedence, and immediate right-binding when the operator
//! after the right-hand side binds tighter.
//!
//! Parse failures never abort the run. The top-level loop records the
//! diagnostic and resynchronizes on the remaining tokens, so one
//! malformed declaration does not swallow the ones after it.

use crate::ast::{Expr, Function, Item, Prototype};
use crate::error::ParseError;
use crate::lexer::{Token, lex};
use crate::stream::Lookahead;

/// Result of parsing one token sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub items: Vec<Item>,
    pub diagnostics: Vec<ParseError>,
}

/// Lex and parse a source string in one call.
pub fn parse_source(source: &str) -> ParseResult {
    parse(lex(source))
}

/// Runs the top-level loop over a token sequence.
///
/// Dispatches on the peeked token: `;` is skipped, `def` starts a
/// definition, `extern` starts an extern, anything else is an
/// expression wrapped as an anonymous function. After a failed
/// sub-parse the loop resumes; if the failing path consumed no token,
/// one token is discarded first so resynchronization always makes
/// forward progress.
pub fn parse(tokens: Vec<Token>) -> ParseResult {
    let mut parser = Parser::new(tokens);
    let mut items = Vec::new();
    let mut diagnostics = Vec::new();

    while let Some(token) = parser.stream.peek() {
        if matches!(token, Token::Notation(';')) {
            parser.bump();
            continue;
        }

        let before = parser.consumed;
        let outcome = match parser.peek() {
            Token::Def => parser.definition().map(Item::Definition),
            Token::Extern => parser.extern_decl().map(Item::Extern),
            _ => parser.top_level_expr().map(Item::TopLevel),
        };

        match outcome {
            Ok(item) => items.push(item),
            Err(error) => {
                diagnostics.push(error);
                if parser.consumed == before {
                    parser.bump();
                }
            }
        }
    }

    ParseResult { items, diagnostics }
}

struct Parser {
    stream: Lookahead<std::vec::IntoIter<Token>>,
    consumed: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            stream: Lookahead::new(tokens.into_iter()),
            consumed: 0,
        }
    }

    /// Current token, with exhaustion mapped to `Eof`.
    fn peek(&mut self) -> &Token {
        self.stream.peek().unwrap_or(&Token::Eof)
    }

    fn bump(&mut self) -> Token {
        match self.stream.next() {
            Some(token) => {
                self.consumed += 1;
                token
            }
            None => Token::Eof,
        }
    }

    /// Consumes the given notation token if it is next.
    fn eat_notation(&mut self, symbol: char) -> bool {
        if *self.peek() == Token::Notation(symbol) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes an identifier token if one is next, yielding its name.
    fn eat_identifier(&mut self) -> Option<String> {
        if !matches!(self.peek(), Token::Identifier(_)) {
            return None;
        }
        match self.bump() {
            Token::Identifier(name) => Some(name),
            _ => unreachable!("peeked an identifier"),
        }
    }

    /// primary ::= identifierexpr | numberexpr | parenexpr
    ///
    /// Any other token is consumed before reporting, so a failing
    /// primary always makes progress.
    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Token::Identifier(_) => self.identifier_expr(),
            Token::Number(_) => match self.bump() {
                Token::Number(value) => Ok(Expr::Number(value)),
                _ => unreachable!("peeked a number"),
            },
            Token::Notation('(') => self.paren_expr(),
            _ => {
                self.bump();
                Err(ParseError::UnknownToken)
            }
        }
    }

    /// identifierexpr ::= identifier | identifier '(' expression,* ')'
    fn identifier_expr(&mut self) -> Result<Expr, ParseError> {
        let name = match self.eat_identifier() {
            Some(name) => name,
            None => unreachable!("caller dispatched on an identifier"),
        };

        if !self.eat_notation('(') {
            return Ok(Expr::Variable(name));
        }

        let mut args = Vec::new();
        if *self.peek() != Token::Notation(')') {
            loop {
                args.push(self.expression()?);

                if *self.peek() == Token::Notation(')') {
                    break;
                }
                if !self.eat_notation(',') {
                    return Err(ParseError::MalformedArgumentList);
                }
            }
        }
        self.bump(); // ')'

        Ok(Expr::Call { callee: name, args })
    }

    /// parenexpr ::= '(' expression ')'
    fn paren_expr(&mut self) -> Result<Expr, ParseError> {
        self.bump(); // '('
        let inner = self.expression()?;
        if !self.eat_notation(')') {
            return Err(ParseError::ExpectedCloseParen);
        }
        Ok(inner)
    }

    /// expression ::= primary binoprhs
    fn expression(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.primary()?;
        self.binary_op_rhs(lhs, 0)
    }

    /// binoprhs ::= (operator primary)*
    ///
    /// Precedence climbing. Operators at or above `min_precedence` are
    /// absorbed into `lhs`; when the operator after the right-hand side
    /// binds strictly tighter, the right-hand side is resolved first at
    /// `precedence + 1`, which also makes equal precedence associate
    /// left.
    fn binary_op_rhs(&mut self, mut lhs: Expr, min_precedence: i32) -> Result<Expr, ParseError> {
        loop {
            let prec = precedence(self.peek());
            if prec < min_precedence {
                return Ok(lhs);
            }

            let op = match self.bump() {
                Token::Notation(symbol) => symbol,
                _ => unreachable!("operators are notation tokens"),
            };

            let mut rhs = self.primary()?;

            if prec < precedence(self.peek()) {
                rhs = self.binary_op_rhs(rhs, prec + 1)?;
            }

            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    /// prototype ::= identifier '(' identifier* ')'
    ///
    /// Parameters are plain identifiers with no separators.
    fn prototype(&mut self) -> Result<Prototype, ParseError> {
        let name = self
            .eat_identifier()
            .ok_or(ParseError::ExpectedPrototypeName)?;

        if !self.eat_notation('(') {
            return Err(ParseError::ExpectedPrototypeOpenParen);
        }

        let mut params = Vec::new();
        while let Some(param) = self.eat_identifier() {
            params.push(param);
        }

        if !self.eat_notation(')') {
            return Err(ParseError::ExpectedPrototypeCloseParen);
        }

        Ok(Prototype { name, params })
    }

    /// definition ::= 'def' prototype expression
    fn definition(&mut self) -> Result<Function, ParseError> {
        self.bump(); // 'def'
        let proto = self.prototype()?;
        let body = self.expression()?;
        Ok(Function { proto, body })
    }

    /// external ::= 'extern' prototype
    fn extern_decl(&mut self) -> Result<Prototype, ParseError> {
        self.bump(); // 'extern'
        self.prototype()
    }

    /// toplevelexpr ::= expression, wrapped as an anonymous function.
    fn top_level_expr(&mut self) -> Result<Function, ParseError> {
        Ok(Function::top_level(self.expression()?))
    }
}

/// Fixed binary operator precedence. Anything not in the table,
/// end of input included, is -1 and terminates the climbing loop.
fn precedence(token: &Token) -> i32 {
    match token {
        Token::Notation('<') => 10,
        Token::Notation('+') | Token::Notation('-') => 20,
        Token::Notation('*') => 40,
        _ => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(name: &str) -> Expr {
        Expr::Variable(name.to_string())
    }

    fn binary(op: char, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Parses a source expected to yield exactly one clean item.
    fn parse_one(source: &str) -> Item {
        let result = parse_source(source);
        assert_eq!(result.diagnostics, vec![], "unexpected diagnostics");
        assert_eq!(result.items.len(), 1, "expected one item: {result:?}");
        result.items.into_iter().next().expect("one item")
    }

    fn parse_expr(source: &str) -> Expr {
        match parse_one(source) {
            Item::TopLevel(function) => {
                assert!(function.is_anonymous());
                function.body
            }
            other => panic!("expected a top-level expression, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_definition() {
        let item = parse_one("def foo(a b) a+b");
        assert_eq!(
            item,
            Item::Definition(Function {
                proto: Prototype {
                    name: "foo".to_string(),
                    params: vec!["a".to_string(), "b".to_string()],
                },
                body: binary('+', variable("a"), variable("b")),
            })
        );
    }

    #[test]
    fn parses_an_extern() {
        let item = parse_one("extern sin(x)");
        assert_eq!(
            item,
            Item::Extern(Prototype {
                name: "sin".to_string(),
                params: vec!["x".to_string()],
            })
        );
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse_expr("1+2*3"),
            binary(
                '+',
                Expr::Number(1.0),
                binary('*', Expr::Number(2.0), Expr::Number(3.0)),
            )
        );
        assert_eq!(
            parse_expr("1*2+3"),
            binary(
                '+',
                binary('*', Expr::Number(1.0), Expr::Number(2.0)),
                Expr::Number(3.0),
            )
        );
    }

    #[test]
    fn comparison_binds_loosest() {
        assert_eq!(
            parse_expr("1<2+3"),
            binary(
                '<',
                Expr::Number(1.0),
                binary('+', Expr::Number(2.0), Expr::Number(3.0)),
            )
        );
    }

    #[test]
    fn equal_precedence_associates_left() {
        assert_eq!(
            parse_expr("1-2-3"),
            binary(
                '-',
                binary('-', Expr::Number(1.0), Expr::Number(2.0)),
                Expr::Number(3.0),
            )
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(
            parse_expr("(1+2)*3"),
            binary(
                '*',
                binary('+', Expr::Number(1.0), Expr::Number(2.0)),
                Expr::Number(3.0),
            )
        );
    }

    #[test]
    fn parses_a_call_with_comma_separated_arguments() {
        assert_eq!(
            parse_expr("foo(1,2)"),
            Expr::Call {
                callee: "foo".to_string(),
                args: vec![Expr::Number(1.0), Expr::Number(2.0)],
            }
        );
    }

    #[test]
    fn call_without_arguments() {
        assert_eq!(
            parse_expr("foo()"),
            Expr::Call {
                callee: "foo".to_string(),
                args: vec![],
            }
        );
    }

    #[test]
    fn bare_identifier_is_a_variable() {
        assert_eq!(parse_expr("x"), variable("x"));
    }

    #[test]
    fn missing_comma_in_argument_list_is_reported() {
        let result = parse_source("foo(1 2)");
        assert!(result
            .diagnostics
            .contains(&ParseError::MalformedArgumentList));
        assert!(
            !result
                .items
                .iter()
                .any(|item| matches!(item, Item::TopLevel(f) if matches!(f.body, Expr::Call { .. }))),
            "the malformed call must not produce an item: {result:?}"
        );
    }

    #[test]
    fn unclosed_parenthesis_is_reported() {
        let result = parse_source("(1+2");
        assert_eq!(result.items, vec![]);
        assert_eq!(result.diagnostics, vec![ParseError::ExpectedCloseParen]);
    }

    #[test]
    fn stray_token_in_expression_position_is_reported() {
        let result = parse_source(")");
        assert_eq!(result.items, vec![]);
        assert_eq!(result.diagnostics, vec![ParseError::UnknownToken]);
    }

    #[test]
    fn prototype_errors_name_the_missing_piece() {
        assert!(
            parse_source("def (a) a")
                .diagnostics
                .contains(&ParseError::ExpectedPrototypeName)
        );
        assert!(
            parse_source("def foo a")
                .diagnostics
                .contains(&ParseError::ExpectedPrototypeOpenParen)
        );
        assert!(
            parse_source("def foo(a")
                .diagnostics
                .contains(&ParseError::ExpectedPrototypeCloseParen)
        );
    }

    #[test]
    fn top_level_semicolons_are_skipped() {
        let result = parse_source("1;;2");
        assert_eq!(result.diagnostics, vec![]);
        assert_eq!(result.items.len(), 2);
    }

    #[test]
    fn loop_resumes_after_a_failed_definition() {
        let result = parse_source("def 1 extern f()");
        assert_eq!(
            result.diagnostics,
            vec![ParseError::ExpectedPrototypeName]
        );
        // The loop resumes on the unconsumed tokens: the number parses
        // as a top-level expression, the extern parses cleanly.
        assert_eq!(
            result.items,
            vec![
                Item::TopLevel(Function::top_level(Expr::Number(1.0))),
                Item::Extern(Prototype {
                    name: "f".to_string(),
                    params: vec![],
                }),
            ]
        );
    }

    #[test]
    fn truncated_input_terminates() {
        let result = parse_source("extern");
        assert_eq!(result.items, vec![]);
        assert_eq!(
            result.diagnostics,
            vec![ParseError::ExpectedPrototypeName]
        );

        let result = parse_source("1+");
        assert_eq!(result.items, vec![]);
        assert_eq!(result.diagnostics, vec![ParseError::UnknownToken]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let result = parse_source("");
        assert_eq!(result.items, vec![]);
        assert_eq!(result.diagnostics, vec![]);
    }

    #[test]
    fn nested_calls_keep_argument_order() {
        assert_eq!(
            parse_expr("f(g(1), 2+3, x)"),
            Expr::Call {
                callee: "f".to_string(),
                args: vec![
                    Expr::Call {
                        callee: "g".to_string(),
                        args: vec![Expr::Number(1.0)],
                    },
                    binary('+', Expr::Number(2.0), Expr::Number(3.0)),
                    variable("x"),
                ],
            }
        );
    }

    #[test]
    fn higher_precedence_after_lower_is_absorbed_into_rhs() {
        // a < b * c + d  parses as  a < ((b*c) + d)
        assert_eq!(
            parse_expr("a<b*c+d"),
            binary(
                '<',
                variable("a"),
                binary(
                    '+',
                    binary('*', variable("b"), variable("c")),
                    variable("d"),
                ),
            )
        );
    }
}
