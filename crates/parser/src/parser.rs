//! Recursive-descent parser over the token stream
//!
//! Permissive by design: `syntax`, `import`, `option`, `reserved`, field
//! options, and `oneof` groups are consumed and discarded. Only the
//! declarations the documentation model needs survive into the tree.

use crate::ast::{
    Decl, EnumDecl, EnumValueDecl, FieldDecl, MapFieldDecl, MessageDecl, MessageElement, ProtoUnit,
    RpcDecl, ServiceDecl,
};
use crate::lexer::{self, Token, TokenKind};
use protodoc_common::{DocError, Result};
use std::fs;
use std::path::Path;

/// `.proto` source parser
pub struct ProtoParser {
    source: String,
}

impl ProtoParser {
    /// Load schema source from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = fs::read_to_string(path.as_ref())?;
        Ok(Self { source })
    }

    /// Use schema source text directly
    pub fn from_source(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }

    /// Parse the source into a raw declaration tree
    pub fn parse(&self) -> Result<ProtoUnit> {
        let tokens = lexer::tokenize(&self.source)?;
        Cursor::new(tokens).parse_unit()
    }
}

struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Line to blame in an error message
    fn current_line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn err(&self, message: impl Into<String>) -> DocError {
        DocError::Syntax {
            line: self.current_line(),
            message: message.into(),
        }
    }

    fn expect_symbol(&mut self, symbol: char) -> Result<Token> {
        match self.peek() {
            Some(TokenKind::Symbol(c)) if *c == symbol => Ok(self.advance().unwrap()),
            other => Err(self.err(format!(
                "expected {:?}, found {}",
                symbol,
                describe(other)
            ))),
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        match self.peek() {
            Some(TokenKind::Ident(_)) => {
                let token = self.advance().unwrap();
                match token.kind {
                    TokenKind::Ident(name) => Ok(name),
                    _ => unreachable!(),
                }
            }
            other => Err(self.err(format!("expected identifier, found {}", describe(other)))),
        }
    }

    fn eat_symbol(&mut self, symbol: char) -> bool {
        if matches!(self.peek(), Some(TokenKind::Symbol(c)) if *c == symbol) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek(), Some(TokenKind::Ident(name)) if name == keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume consecutive comment tokens as leading comment fragments
    fn take_leading_comments(&mut self) -> Vec<String> {
        let mut comments = Vec::new();
        while let Some(TokenKind::Comment(_)) = self.peek() {
            if let Some(Token {
                kind: TokenKind::Comment(text),
                ..
            }) = self.advance()
            {
                comments.push(text);
            }
        }
        comments
    }

    /// Consume a comment starting on `line` as an inline comment
    fn take_inline_comment(&mut self, line: usize) -> Option<String> {
        let is_inline = matches!(
            self.tokens.get(self.pos),
            Some(Token {
                kind: TokenKind::Comment(_),
                line: comment_line,
            }) if *comment_line == line
        );
        if !is_inline {
            return None;
        }
        match self.advance() {
            Some(Token {
                kind: TokenKind::Comment(text),
                ..
            }) => Some(text),
            _ => None,
        }
    }

    /// Consume a possibly dotted type reference. A leading dot (root-scoped
    /// reference) is accepted and stripped.
    fn parse_type_name(&mut self) -> Result<String> {
        self.eat_symbol('.');
        let mut name = self.expect_ident()?;
        while matches!(self.peek(), Some(TokenKind::Symbol('.')))
            && matches!(self.peek_at(1), Some(TokenKind::Ident(_)))
        {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_ident()?);
        }
        Ok(name)
    }

    /// Consume everything up to and including the `;` that ends the current
    /// statement, balancing braces on the way (aggregate option values)
    fn skip_statement(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.advance().map(|t| t.kind) {
                None => return Err(self.err("unexpected end of file in statement")),
                Some(TokenKind::Symbol('{')) => depth += 1,
                Some(TokenKind::Symbol('}')) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| self.err("unbalanced '}' in statement"))?;
                }
                Some(TokenKind::Symbol(';')) if depth == 0 => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// Consume a `{ ... }` block, returning the line of the closing brace
    fn skip_block(&mut self) -> Result<usize> {
        self.expect_symbol('{')?;
        let mut depth = 1usize;
        loop {
            match self.advance() {
                None => return Err(self.err("unexpected end of file in block")),
                Some(token) => match token.kind {
                    TokenKind::Symbol('{') => depth += 1,
                    TokenKind::Symbol('}') => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(token.line);
                        }
                    }
                    _ => {}
                },
            }
        }
    }

    /// Consume `[ ... ]` field options if present
    fn skip_field_options(&mut self) -> Result<()> {
        if !self.eat_symbol('[') {
            return Ok(());
        }
        let mut depth = 1usize;
        loop {
            match self.advance().map(|t| t.kind) {
                None => return Err(self.err("unexpected end of file in field options")),
                Some(TokenKind::Symbol('[')) => depth += 1,
                Some(TokenKind::Symbol(']')) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn parse_unit(&mut self) -> Result<ProtoUnit> {
        let mut unit = ProtoUnit::default();

        loop {
            let leading = self.take_leading_comments();
            let Some(kind) = self.peek().cloned() else {
                // Dangling comments at end of file attach to nothing
                break;
            };
            match kind {
                TokenKind::Ident(name) => match name.as_str() {
                    "syntax" | "import" | "option" => {
                        self.advance();
                        self.skip_statement()?;
                    }
                    "package" => {
                        self.advance();
                        let package = self.parse_type_name()?;
                        self.expect_symbol(';')?;
                        if unit.package.is_none() {
                            unit.package = Some(package);
                        }
                    }
                    "service" => {
                        self.advance();
                        unit.decls.push(Decl::Service(self.parse_service(leading)?));
                    }
                    "message" => {
                        self.advance();
                        unit.decls.push(Decl::Message(self.parse_message(leading)?));
                    }
                    "enum" => {
                        self.advance();
                        unit.decls.push(Decl::Enum(self.parse_enum(leading)?));
                    }
                    other => {
                        return Err(self.err(format!("unexpected {:?} at top level", other)));
                    }
                },
                TokenKind::Symbol(';') => {
                    self.advance();
                }
                other => {
                    let message = format!("unexpected {} at top level", describe(Some(&other)));
                    return Err(self.err(message));
                }
            }
        }

        Ok(unit)
    }

    fn parse_service(&mut self, leading_comments: Vec<String>) -> Result<ServiceDecl> {
        let name = self.expect_ident()?;
        self.expect_symbol('{')?;

        let mut rpcs = Vec::new();
        loop {
            let leading = self.take_leading_comments();
            if self.eat_symbol('}') {
                break;
            }
            if self.eat_keyword("rpc") {
                rpcs.push(self.parse_rpc(leading)?);
            } else if self.eat_keyword("option") {
                self.skip_statement()?;
            } else if self.eat_symbol(';') {
                continue;
            } else {
                let message = format!("unexpected {} in service body", describe(self.peek()));
                return Err(self.err(message));
            }
        }

        Ok(ServiceDecl {
            name,
            leading_comments,
            rpcs,
        })
    }

    fn parse_rpc(&mut self, leading_comments: Vec<String>) -> Result<RpcDecl> {
        let name = self.expect_ident()?;
        let (request_stream, request_type) = self.parse_rpc_payload()?;
        if !self.eat_keyword("returns") {
            return Err(self.err("expected \"returns\" in rpc declaration"));
        }
        let (response_stream, response_type) = self.parse_rpc_payload()?;

        // The rpc ends with either `;` or an options body
        let end_line = if matches!(self.peek(), Some(TokenKind::Symbol('{'))) {
            self.skip_block()?
        } else {
            self.expect_symbol(';')?.line
        };
        let inline_comment = self.take_inline_comment(end_line);

        Ok(RpcDecl {
            name,
            leading_comments,
            inline_comment,
            request_type,
            request_stream,
            response_type,
            response_stream,
        })
    }

    /// Parse `( [stream] TypeName )`
    fn parse_rpc_payload(&mut self) -> Result<(bool, String)> {
        self.expect_symbol('(')?;
        // "stream" is only a keyword when a type name follows it
        let stream = matches!(self.peek(), Some(TokenKind::Ident(name)) if name == "stream")
            && !matches!(self.peek_at(1), Some(TokenKind::Symbol(')')));
        if stream {
            self.advance();
        }
        let type_name = self.parse_type_name()?;
        self.expect_symbol(')')?;
        Ok((stream, type_name))
    }

    fn parse_message(&mut self, leading_comments: Vec<String>) -> Result<MessageDecl> {
        let name = self.expect_ident()?;
        self.expect_symbol('{')?;

        let mut body = Vec::new();
        loop {
            let leading = self.take_leading_comments();
            let Some(kind) = self.peek().cloned() else {
                return Err(self.err("unexpected end of file in message body"));
            };
            match kind {
                TokenKind::Symbol('}') => {
                    self.advance();
                    break;
                }
                TokenKind::Symbol(';') => {
                    self.advance();
                }
                TokenKind::Ident(keyword) => match keyword.as_str() {
                    "message" => {
                        self.advance();
                        body.push(MessageElement::Message(self.parse_message(leading)?));
                    }
                    "enum" => {
                        self.advance();
                        body.push(MessageElement::Enum(self.parse_enum(leading)?));
                    }
                    "option" | "reserved" => {
                        self.advance();
                        self.skip_statement()?;
                    }
                    "oneof" => {
                        // Oneof members are not plain fields; the group is
                        // skipped wholesale
                        self.advance();
                        self.expect_ident()?;
                        self.skip_block()?;
                    }
                    "map" if matches!(self.peek_at(1), Some(TokenKind::Symbol('<'))) => {
                        self.advance();
                        body.push(MessageElement::Map(self.parse_map_field(leading)?));
                    }
                    _ => {
                        body.push(MessageElement::Field(self.parse_field(leading)?));
                    }
                },
                other => {
                    let message = format!("unexpected {} in message body", describe(Some(&other)));
                    return Err(self.err(message));
                }
            }
        }

        Ok(MessageDecl {
            name,
            leading_comments,
            body,
        })
    }

    fn parse_field(&mut self, leading_comments: Vec<String>) -> Result<FieldDecl> {
        let repeated = self.eat_keyword("repeated");
        if !repeated {
            // proto3 explicit presence / proto2 labels, no documentation value
            let _ = self.eat_keyword("optional") || self.eat_keyword("required");
        }
        let type_name = self.parse_type_name()?;
        let name = self.expect_ident()?;
        self.expect_symbol('=')?;
        self.expect_number()?;
        self.skip_field_options()?;
        let end_line = self.expect_symbol(';')?.line;
        let inline_comment = self.take_inline_comment(end_line);

        Ok(FieldDecl {
            name,
            type_name,
            repeated,
            leading_comments,
            inline_comment,
        })
    }

    fn parse_map_field(&mut self, leading_comments: Vec<String>) -> Result<MapFieldDecl> {
        self.expect_symbol('<')?;
        let key_type = self.parse_type_name()?;
        self.expect_symbol(',')?;
        let value_type = self.parse_type_name()?;
        self.expect_symbol('>')?;
        let name = self.expect_ident()?;
        self.expect_symbol('=')?;
        self.expect_number()?;
        self.skip_field_options()?;
        let end_line = self.expect_symbol(';')?.line;
        let inline_comment = self.take_inline_comment(end_line);

        Ok(MapFieldDecl {
            name,
            key_type,
            value_type,
            leading_comments,
            inline_comment,
        })
    }

    fn parse_enum(&mut self, leading_comments: Vec<String>) -> Result<EnumDecl> {
        let name = self.expect_ident()?;
        self.expect_symbol('{')?;

        let mut values = Vec::new();
        loop {
            let leading = self.take_leading_comments();
            if self.eat_symbol('}') {
                break;
            }
            if self.eat_keyword("option") || self.eat_keyword("reserved") {
                self.skip_statement()?;
                continue;
            }
            if self.eat_symbol(';') {
                continue;
            }
            let value_name = self.expect_ident()?;
            self.expect_symbol('=')?;
            let number = self.expect_number()?;
            self.skip_field_options()?;
            let end_line = self.expect_symbol(';')?.line;
            let inline_comment = self.take_inline_comment(end_line);

            values.push(EnumValueDecl {
                name: value_name,
                number,
                leading_comments: leading,
                inline_comment,
            });
        }

        Ok(EnumDecl {
            name,
            leading_comments,
            values,
        })
    }

    /// Consume a numeric literal, with an optional leading minus sign
    fn expect_number(&mut self) -> Result<String> {
        let negative = self.eat_symbol('-');
        match self.peek() {
            Some(TokenKind::Number(_)) => {
                let token = self.advance().unwrap();
                match token.kind {
                    TokenKind::Number(number) => {
                        if negative {
                            Ok(format!("-{}", number))
                        } else {
                            Ok(number)
                        }
                    }
                    _ => unreachable!(),
                }
            }
            other => Err(self.err(format!("expected number, found {}", describe(other)))),
        }
    }
}

fn describe(kind: Option<&TokenKind>) -> String {
    match kind {
        None => "end of file".to_string(),
        Some(TokenKind::Ident(name)) => format!("{:?}", name),
        Some(TokenKind::Number(number)) => format!("number {}", number),
        Some(TokenKind::Str(text)) => format!("string {:?}", text),
        Some(TokenKind::Symbol(c)) => format!("{:?}", c),
        Some(TokenKind::Comment(_)) => "comment".to_string(),
    }
}
