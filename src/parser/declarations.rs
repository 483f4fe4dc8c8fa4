//! Declaration parsing implementation
//!
//! This module handles parsing of top-level items:
//!
//! - Function definitions: `type name(params) { ... }`
//! - Global declarations: `const? int *? name = expr;`
//! - Top-level statements such as `swap(&a, &b);`
//! - Type parsing: base type, `const`, pointers
//!
//! # Grammar
//!
//! ```text
//! item         ::= function_def | var_decl | statement
//! function_def ::= type identifier "(" params? ")" "{" statement* "}"
//! params       ::= "void" | param ("," param)*
//! param        ::= type identifier
//! type         ::= "const"? ("int" | "void") "*"*
//! ```

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a top-level item
    pub(crate) fn parse_top_level_item(&mut self) -> Result<AstNode, ParseError> {
        if !self.is_type_keyword() {
            return self.parse_statement();
        }

        let location = self.current_location();
        let item_type = self.parse_type()?;
        let name = self.expect_identifier()?;

        if self.check(&Token::LParen(self.current_location())) {
            self.parse_function_definition(name, item_type, location)
        } else {
            self.parse_var_decl_rest(name, item_type, location)
        }
    }

    /// Parse the remainder of a function definition after `type name`
    fn parse_function_definition(
        &mut self,
        name: String,
        return_type: Type,
        location: SourceLocation,
    ) -> Result<AstNode, ParseError> {
        self.expect_lparen("after function name")?;
        let params = self.parse_params()?;
        self.expect_rparen("after parameters")?;

        self.expect_lbrace("before function body")?;
        let body = self.parse_block_statements()?;
        self.expect_rbrace("after function body")?;

        Ok(AstNode::FunctionDef {
            name,
            params,
            body,
            return_type,
            location,
        })
    }

    /// Parse a parameter list. `(void)` and `()` both mean no parameters.
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(params);
        }

        if self.check(&Token::Void(self.current_location())) {
            let is_bare_void = matches!(
                self.tokens.get(self.position + 1),
                Some(Token::RParen(_))
            );
            if is_bare_void {
                self.advance();
                return Ok(params);
            }
        }

        loop {
            let param_type = self.parse_type()?;
            if param_type.base == BaseType::Void && !param_type.is_pointer() {
                return Err(ParseError {
                    message: "Parameter cannot have type void".to_string(),
                    location: self.previous().location(),
                });
            }
            let name = self.expect_identifier()?;
            params.push(Param { name, param_type });

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse a type: optional `const`, base type, then `*` each optionally
    /// followed by `const`.
    ///
    /// Only the variable and its pointee can carry `const`; a qualifier
    /// further out is rejected.
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        let is_const = self.match_token(&Token::Const(self.current_location()));

        let base = match self.peek_token() {
            Token::Int(_) => BaseType::Int,
            Token::Void(_) => BaseType::Void,
            other => {
                return Err(ParseError {
                    message: format!("Expected type, found {}", other),
                    location: other.location(),
                });
            }
        };
        self.advance();

        let mut parsed = Type::new(base);
        if is_const {
            parsed = parsed.with_const();
        }
        while self.check(&Token::Star(self.current_location())) {
            if parsed.pointee_const {
                return Err(ParseError {
                    message: "const is only supported on a variable and its pointee".to_string(),
                    location: self.current_location(),
                });
            }
            self.advance();
            parsed = parsed.with_pointer();
            if self.match_token(&Token::Const(self.current_location())) {
                parsed = parsed.with_const();
            }
        }

        Ok(parsed)
    }
}
