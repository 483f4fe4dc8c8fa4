//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: top-level items, function definitions and types
//! - `statements`: declarations, assignments, calls and `return` inside a body
//! - `expressions`: literals, variables, `*`/`&` and calls
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! each extending the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use std::fmt;

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for the C subset
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse the entire program (top-level items in source order)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let item = self.parse_top_level_item()?;
            program.nodes.push(item);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(
            self.peek(),
            Token::Int(_) | Token::Void(_) | Token::Const(_)
        )
    }

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    /// The tokenizer always terminates the stream with `Eof` and `advance`
    /// never moves past it, so `position` stays in range.
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.peek().clone()
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError {
                message: format!("{}, found {}", message, self.peek()),
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LParen(self.current_location()),
            &format!("Expected '(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("Expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LBrace(self.current_location()),
            &format!("Expected '{{' {ctx}"),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBrace(self.current_location()),
            &format!("Expected '}}' {ctx}"),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            &format!("Expected ';' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();
            Ok(name)
        } else {
            Err(ParseError {
                message: format!("Expected identifier, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWAP_PROGRAM: &str = r#"
#include <stdio.h>

void swap(int *c, int *d) {
  const int tmp = *c;
  *c = *d;
  *d = tmp;
}

int a = 1337;
int b = 1338;

swap(&a, &b);
"#;

    #[test]
    fn test_parse_swap_program() {
        let mut parser = Parser::new(SWAP_PROGRAM).unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.nodes.len(), 4);
        match &program.nodes[0] {
            AstNode::FunctionDef {
                name,
                params,
                return_type,
                body,
                ..
            } => {
                assert_eq!(name, "swap");
                assert_eq!(params.len(), 2);
                assert_eq!(params[0].name, "c");
                assert_eq!(params[0].param_type.pointer_depth, 1);
                assert_eq!(return_type.base, BaseType::Void);
                assert_eq!(body.len(), 3);
            }
            _ => panic!("Expected function definition"),
        }
        match &program.nodes[1] {
            AstNode::VarDecl { name, init, .. } => {
                assert_eq!(name, "a");
                assert!(matches!(init.as_deref(), Some(AstNode::IntLiteral(1337, _))));
            }
            _ => panic!("Expected global declaration"),
        }
        assert!(matches!(
            &program.nodes[3],
            AstNode::ExpressionStatement { expr, .. }
                if matches!(expr.as_ref(), AstNode::FunctionCall { name, args, .. }
                    if name == "swap" && args.len() == 2)
        ));
    }

    #[test]
    fn test_parse_const_local() {
        let mut parser = Parser::new("void f(int *p) { const int t = *p; }").unwrap();
        let program = parser.parse_program().unwrap();

        let AstNode::FunctionDef { body, .. } = &program.nodes[0] else {
            panic!("Expected function definition");
        };
        match &body[0] {
            AstNode::VarDecl { var_type, init, .. } => {
                assert!(var_type.is_const);
                assert!(matches!(init.as_deref(), Some(AstNode::Deref { .. })));
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_pointer_qualifiers() {
        let mut parser =
            Parser::new("const int *p = NULL; int *const q = NULL; int *const *r = NULL;").unwrap();
        let program = parser.parse_program().unwrap();

        let types: Vec<(bool, bool)> = program
            .nodes
            .iter()
            .map(|node| match node {
                AstNode::VarDecl { var_type, .. } => (var_type.is_const, var_type.pointee_const),
                other => panic!("Expected declaration, got {:?}", other),
            })
            .collect();
        assert_eq!(types, vec![(false, true), (true, false), (false, true)]);

        let mut parser = Parser::new("const int **pp = NULL;").unwrap();
        assert!(parser.parse_program().is_err());
    }

    #[test]
    fn test_parse_negative_extremes() {
        let mut parser = Parser::new("int lo = -2147483648; int hi = 2147483647;").unwrap();
        let program = parser.parse_program().unwrap();
        assert!(matches!(
            &program.nodes[0],
            AstNode::VarDecl { init: Some(e), .. } if matches!(e.as_ref(), AstNode::IntLiteral(i32::MIN, _))
        ));
        assert!(matches!(
            &program.nodes[1],
            AstNode::VarDecl { init: Some(e), .. } if matches!(e.as_ref(), AstNode::IntLiteral(i32::MAX, _))
        ));
    }

    #[test]
    fn test_parse_literal_out_of_range() {
        let mut parser = Parser::new("int x = 2147483648;").unwrap();
        let err = parser.parse_program().unwrap_err();
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn test_parse_missing_semicolon() {
        let mut parser = Parser::new("int a = 1\nint b = 2;").unwrap();
        let err = parser.parse_program().unwrap_err();
        assert_eq!(err.location.line, 2);
    }

    #[test]
    fn test_parse_main_style_program() {
        let source = "int main() { int x = 1; int y = 2; swap(&x, &y); return 0; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        let AstNode::FunctionDef { body, .. } = &program.nodes[0] else {
            panic!("Expected function definition");
        };
        assert_eq!(body.len(), 4);
        assert!(matches!(body[3], AstNode::Return { .. }));
    }
}
