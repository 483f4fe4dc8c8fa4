//! Expression parsing implementation
//!
//! There are no binary operators in the subset, so the grammar is a single
//! prefix-unary level over primaries:
//!
//! ```text
//! expression ::= unary
//! unary      ::= "*" unary | "&" identifier | "-" int_literal | primary
//! primary    ::= int_literal | "NULL" | identifier | call | "(" expression ")"
//! call       ::= identifier "(" (expression ("," expression)*)? ")"
//! ```

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse an expression
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_unary()
    }

    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();

        if self.match_token(&Token::Star(location)) {
            let operand = self.parse_unary()?;
            return Ok(AstNode::Deref {
                operand: Box::new(operand),
                location,
            });
        }

        if self.match_token(&Token::Amp(location)) {
            let name_location = self.current_location();
            let name = self.expect_identifier()?;
            return Ok(AstNode::AddressOf {
                operand: Box::new(AstNode::Variable(name, name_location)),
                location,
            });
        }

        if self.match_token(&Token::Minus(location)) {
            return match self.peek_token() {
                Token::IntLiteral(n, _) => {
                    self.advance();
                    Self::int_literal(-n, location)
                }
                other => Err(ParseError {
                    message: format!("Expected integer literal after '-', found {}", other),
                    location: other.location(),
                }),
            };
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let token = self.peek_token();
        let location = token.location();

        match token {
            Token::IntLiteral(n, _) => {
                self.advance();
                Self::int_literal(n, location)
            }
            Token::Null(_) => {
                self.advance();
                Ok(AstNode::Null { location })
            }
            Token::Ident(name, _) => {
                self.advance();
                if self.match_token(&Token::LParen(self.current_location())) {
                    let args = self.parse_call_arguments()?;
                    Ok(AstNode::FunctionCall {
                        name,
                        args,
                        location,
                    })
                } else {
                    Ok(AstNode::Variable(name, location))
                }
            }
            Token::LParen(_) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                Ok(expr)
            }
            other => Err(ParseError {
                message: format!("Expected expression, found {}", other),
                location,
            }),
        }
    }

    /// Parse call arguments after the opening parenthesis, consuming the closing one
    fn parse_call_arguments(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();

        if self.match_token(&Token::RParen(self.current_location())) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }
        self.expect_rparen("after arguments")?;

        Ok(args)
    }

    fn int_literal(value: i64, location: SourceLocation) -> Result<AstNode, ParseError> {
        i32::try_from(value)
            .map(|n| AstNode::IntLiteral(n, location))
            .map_err(|_| ParseError {
                message: format!("Integer literal {} is out of range for int", value),
                location,
            })
    }
}
