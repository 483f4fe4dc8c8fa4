//! Statement parsing implementation
//!
//! ```text
//! statement ::= var_decl | return_stmt | assignment | expr_stmt
//! var_decl  ::= type identifier ("=" expression)? ";"
//! assignment ::= expression "=" expression ";"
//! ```

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(&Token::RBrace(self.current_location())) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::Return(loc)) {
            return self.parse_return_statement(loc);
        }

        if self.is_type_keyword() {
            let var_type = self.parse_type()?;
            let name = self.expect_identifier()?;
            return self.parse_var_decl_rest(name, var_type, loc);
        }

        let expr = self.parse_expression()?;

        if self.match_token(&Token::Eq(self.current_location())) {
            if !matches!(expr, AstNode::Variable(..) | AstNode::Deref { .. }) {
                return Err(ParseError {
                    message: "Left side of assignment is not assignable".to_string(),
                    location: loc,
                });
            }
            let rhs = self.parse_expression()?;
            self.expect_semicolon("after assignment")?;
            return Ok(AstNode::Assignment {
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                location: loc,
            });
        }

        self.expect_semicolon("after expression")?;
        Ok(AstNode::ExpressionStatement {
            expr: Box::new(expr),
            location: loc,
        })
    }

    /// Parse the remainder of a declaration after `type name`
    pub(crate) fn parse_var_decl_rest(
        &mut self,
        name: String,
        var_type: Type,
        location: SourceLocation,
    ) -> Result<AstNode, ParseError> {
        if var_type.base == BaseType::Void && !var_type.is_pointer() {
            return Err(ParseError {
                message: format!("Variable '{}' declared void", name),
                location,
            });
        }

        let init = if self.match_token(&Token::Eq(self.current_location())) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        self.expect_semicolon("after declaration")?;

        Ok(AstNode::VarDecl {
            name,
            var_type,
            init,
            location,
        })
    }

    fn parse_return_statement(&mut self, location: SourceLocation) -> Result<AstNode, ParseError> {
        let expr = if self.check(&Token::Semicolon(self.current_location())) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect_semicolon("after return")?;

        Ok(AstNode::Return { expr, location })
    }
}
