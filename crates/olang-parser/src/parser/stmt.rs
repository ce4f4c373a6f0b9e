//! Statement parsing for method and constructor bodies.

use super::{ParseError, Parser};
use crate::ast::{Expression, Statement};
use crate::token::Token;

impl Parser {
    /// Parse statements until a body terminator (`end` or `else`).
    pub(crate) fn parse_body(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        while !matches!(self.current(), Token::End | Token::Else | Token::Eof) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current() {
            Token::Var => Ok(Statement::Variable(self.parse_field()?)),
            Token::If => self.parse_if(),
            Token::While => self.parse_while(),
            Token::Return => self.parse_return(),
            _ => self.parse_assignment_or_expression(),
        }
    }

    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        let start_span = self.current_span();
        self.expect(&Token::If)?;
        let condition = self.parse_expression()?;
        self.expect(&Token::Then)?;
        let then_body = self.parse_body()?;

        let else_body = if self.eat(&Token::Else) {
            Some(self.parse_body()?)
        } else {
            None
        };

        let end_span = self.current_span();
        self.expect(&Token::End)?;

        Ok(Statement::If {
            condition,
            then_body,
            else_body,
            span: start_span.merge(&end_span),
        })
    }

    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        let start_span = self.current_span();
        self.expect(&Token::While)?;
        let condition = self.parse_expression()?;
        self.expect(&Token::Loop)?;
        let body = self.parse_body()?;
        let end_span = self.current_span();
        self.expect(&Token::End)?;

        Ok(Statement::While {
            condition,
            body,
            span: start_span.merge(&end_span),
        })
    }

    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        let span = self.current_span();
        self.expect(&Token::Return)?;

        // A return value is present unless the next token closes the body.
        let value = if matches!(self.current(), Token::End | Token::Else | Token::Eof) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let span = value
            .as_ref()
            .map(|expr| span.merge(&expr.span()))
            .unwrap_or(span);

        Ok(Statement::Return { value, span })
    }

    fn parse_assignment_or_expression(&mut self) -> Result<Statement, ParseError> {
        let target = self.parse_expression()?;

        if self.eat(&Token::Assign) {
            let value = self.parse_expression()?;

            match target {
                Expression::Identifier(_) | Expression::FieldAccess { .. } => {}
                _ => {
                    return Err(ParseError::invalid_syntax(
                        "Assignment target must be a name or a field access",
                        target.span(),
                    ))
                }
            }

            let span = target.span().merge(&value.span());
            return Ok(Statement::Assignment {
                target,
                value,
                span,
            });
        }

        Ok(Statement::Expression(target))
    }
}
