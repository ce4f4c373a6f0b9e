//! Class, member, and parameter declarations.
//!
//! Grammar:
//!
//! ```text
//! classDecl   := 'class' IDENT ('extends' IDENT)? 'is' member* 'end'
//! member      := fieldDecl | methodDecl | ctorDecl
//! fieldDecl   := 'var' IDENT (':' IDENT)? (':=' expression)?
//! methodDecl  := 'method' IDENT '(' params? ')' ('->' IDENT)? 'is' body 'end'
//! ctorDecl    := 'this' '(' params? ')' 'is' body 'end'
//! params      := param (',' param)*
//! param       := IDENT ':' IDENT
//! ```

use super::{ParseError, Parser};
use crate::ast::{Class, Constructor, Field, Method, Parameter};
use crate::token::Token;

impl Parser {
    /// Parse one class declaration.
    pub(crate) fn parse_class(&mut self) -> Result<Class, ParseError> {
        let start_span = self.current_span();
        self.expect(&Token::Class)?;

        let name = self.expect_identifier("class name")?;

        let extends = if self.eat(&Token::Extends) {
            Some(self.expect_type("base class name")?)
        } else {
            None
        };

        self.expect(&Token::Is)?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        let mut constructors = Vec::new();

        loop {
            match self.current() {
                Token::Var => fields.push(self.parse_field()?),
                Token::Method => methods.push(self.parse_method()?),
                Token::This => constructors.push(self.parse_constructor()?),
                _ => break,
            }
        }

        let end_span = self.current_span();
        self.expect(&Token::End)?;

        Ok(Class {
            name,
            extends,
            fields,
            methods,
            constructors,
            span: start_span.merge(&end_span),
        })
    }

    /// Parse a field declaration. Either the type annotation or the
    /// initializer may be omitted, but not both.
    pub(crate) fn parse_field(&mut self) -> Result<Field, ParseError> {
        let start_span = self.current_span();
        self.expect(&Token::Var)?;

        let name = self.expect_identifier("field name")?;

        let type_annotation = if self.eat(&Token::Colon) {
            Some(self.expect_type("field type")?)
        } else {
            None
        };

        let initializer = if self.eat(&Token::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        if type_annotation.is_none() && initializer.is_none() {
            return Err(ParseError::invalid_syntax(
                format!(
                    "Field '{}' needs a type annotation or an initializer",
                    name.name
                ),
                name.span,
            ));
        }

        let end_span = initializer
            .as_ref()
            .map(|init| init.span())
            .or(type_annotation.as_ref().map(|ty| ty.span))
            .unwrap_or(name.span);

        Ok(Field {
            span: start_span.merge(&end_span),
            name,
            type_annotation,
            initializer,
        })
    }

    fn parse_method(&mut self) -> Result<Method, ParseError> {
        let start_span = self.current_span();
        self.expect(&Token::Method)?;

        let name = self.expect_identifier("method name")?;
        let params = self.parse_parameters()?;

        let return_type = if self.eat(&Token::Arrow) {
            Some(self.expect_type("return type")?)
        } else {
            None
        };

        self.expect(&Token::Is)?;
        let body = self.parse_body()?;
        let end_span = self.current_span();
        self.expect(&Token::End)?;

        Ok(Method {
            name,
            params,
            return_type,
            body,
            span: start_span.merge(&end_span),
        })
    }

    fn parse_constructor(&mut self) -> Result<Constructor, ParseError> {
        let start_span = self.current_span();
        self.expect(&Token::This)?;

        let params = self.parse_parameters()?;

        self.expect(&Token::Is)?;
        let body = self.parse_body()?;
        let end_span = self.current_span();
        self.expect(&Token::End)?;

        Ok(Constructor {
            params,
            body,
            span: start_span.merge(&end_span),
        })
    }

    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, ParseError> {
        self.expect(&Token::LParen)?;

        let mut params = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                params.push(self.parse_parameter()?);
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }

        self.expect(&Token::RParen)?;
        Ok(params)
    }

    fn parse_parameter(&mut self) -> Result<Parameter, ParseError> {
        let name = self.expect_identifier("parameter name")?;
        self.expect(&Token::Colon)?;
        let type_annotation = self.expect_type("parameter type")?;

        Ok(Parameter {
            span: name.span.merge(&type_annotation.span),
            name,
            type_annotation,
        })
    }
}
