//! Expression parsing.
//!
//! O has no operator syntax; arithmetic and comparison are ordinary method
//! calls (`a.Plus(b)`), so expressions are a primary followed by a chain of
//! `.member` and call suffixes.

use super::{ParseError, Parser};
use crate::ast::Expression;
use crate::token::{Span, Token};

impl Parser {
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.eat(&Token::Dot) {
                let field = self.expect_identifier("member name")?;
                let span = expr.span().merge(&field.span);
                expr = Expression::FieldAccess {
                    receiver: Box::new(expr),
                    field,
                    span,
                };
            } else if self.check(&Token::LParen) {
                let (args, close_span) = self.parse_arguments()?;
                let span = expr.span().merge(&close_span);
                expr = Expression::Call {
                    callee: Box::new(expr),
                    args,
                    span,
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let span = self.current_span();
        match self.advance() {
            Token::IntLiteral(value) => Ok(Expression::IntegerLiteral { value, span }),
            Token::RealLiteral(value) => Ok(Expression::RealLiteral { value, span }),
            Token::True => Ok(Expression::BooleanLiteral { value: true, span }),
            Token::False => Ok(Expression::BooleanLiteral { value: false, span }),
            Token::StringLiteral(value) => Ok(Expression::StringLiteral { value, span }),
            Token::This => Ok(Expression::This { span }),
            Token::Identifier(name) => Ok(Expression::Identifier(crate::ast::Identifier {
                name,
                span,
            })),
            Token::LParen => {
                let inner = self.parse_expression()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            other => Err(ParseError::unexpected_token("an expression", other, span)),
        }
    }

    fn parse_arguments(&mut self) -> Result<(Vec<Expression>, Span), ParseError> {
        self.expect(&Token::LParen)?;

        let mut args = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }

        let close_span = self.current_span();
        self.expect(&Token::RParen)?;
        Ok((args, close_span))
    }
}
