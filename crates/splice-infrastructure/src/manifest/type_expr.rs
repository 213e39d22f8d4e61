//! Type expressions
//!
//! A small TypeScript-flavoured type syntax used by the manifest:
//!
//! ```text
//! union   := postfix ('|' postfix)*
//! postfix := primary ('[' ']')*
//! primary := name ('<' union (',' union)* '>')?
//!          | '[' (union (',' union)*)? ']'
//!          | '{' (field (';' | ',')?)* '}'
//!          | '(' union ')'
//!          | string | number
//! field   := name '?'? ':' union
//! ```
//!
//! [`parse`] produces a [`TypeExpr`]; [`TypeScope::lower`] interns it into a
//! [`TypeTable`] once aliases, enums and classes of the manifest are known.

use std::collections::{HashMap, HashSet};

use splice_domain::constants::ARRAY_CONTAINER_NAME;
use splice_domain::error::{Error, Result};
use splice_domain::{Field, Literal, Primitive, TypeId, TypeTable};

use crate::constants::MAX_TYPE_NESTING;

/// Parsed type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Bare or generic name such as `Logger` or `Map<string, number>`
    Name {
        name: String,
        arguments: Vec<TypeExpr>,
    },
    Array(Box<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    Object(Vec<FieldExpr>),
    Union(Vec<TypeExpr>),
    StringLiteral(String),
    NumberLiteral(String),
}

/// Member of an object type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldExpr {
    pub name: String,
    pub optional: bool,
    pub ty: TypeExpr,
}

impl TypeExpr {
    /// Bare name without type arguments
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name {
            name: name.into(),
            arguments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Num(String),
    Punct(char),
    End,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("`{name}`"),
            Self::Str(value) => format!("\"{value}\""),
            Self::Num(value) => value.clone(),
            Self::Punct(c) => format!("`{c}`"),
            Self::End => "end of input".to_string(),
        }
    }
}

const PUNCTUATION: &[char] = &['|', '[', ']', '<', '>', ',', ';', ':', '?', '{', '}', '(', ')'];

fn lex(input: &str) -> Result<Vec<(usize, Token)>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if PUNCTUATION.contains(&c) {
            chars.next();
            tokens.push((start, Token::Punct(c)));
        } else if c == '"' || c == '\'' {
            chars.next();
            let mut value = String::new();
            let mut closed = false;
            for (_, next) in chars.by_ref() {
                if next == c {
                    closed = true;
                    break;
                }
                value.push(next);
            }
            if !closed {
                return Err(Error::type_syntax(input, start, "unterminated string literal"));
            }
            tokens.push((start, Token::Str(value)));
        } else if c.is_ascii_digit() || c == '-' {
            let mut value = String::new();
            while let Some(&(_, next)) = chars.peek() {
                if next.is_ascii_digit() || next == '.' || (next == '-' && value.is_empty()) {
                    value.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            if value == "-" {
                return Err(Error::type_syntax(input, start, "expected digits after `-`"));
            }
            tokens.push((start, Token::Num(value)));
        } else if c.is_alphabetic() || c == '_' || c == '$' {
            let mut name = String::new();
            while let Some(&(_, next)) = chars.peek() {
                if next.is_alphanumeric() || next == '_' || next == '$' || next == '.' {
                    name.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push((start, Token::Ident(name)));
        } else {
            return Err(Error::type_syntax(
                input,
                start,
                format!("unexpected character `{c}`"),
            ));
        }
    }
    tokens.push((input.len(), Token::End));
    Ok(tokens)
}

/// Parse a type expression
pub fn parse(input: &str) -> Result<TypeExpr> {
    let tokens = lex(input)?;
    let mut parser = Parser {
        input,
        tokens,
        position: 0,
        depth: 0,
    };
    let expr = parser.union()?;
    parser.expect_end()?;
    Ok(expr)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<(usize, Token)>,
    position: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> &Token {
        self.tokens
            .get(self.position)
            .map_or(&Token::End, |(_, token)| token)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.position)
            .map_or(self.input.len(), |(offset, _)| *offset)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn eat(&mut self, punct: char) -> bool {
        if *self.peek() == Token::Punct(punct) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, expected: &str) -> Error {
        Error::type_syntax(
            self.input,
            self.offset(),
            format!("expected {expected}, found {}", self.peek().describe()),
        )
    }

    fn expect(&mut self, punct: char) -> Result<()> {
        if self.eat(punct) {
            Ok(())
        } else {
            Err(self.error(&format!("`{punct}`")))
        }
    }

    fn expect_end(&self) -> Result<()> {
        match self.peek() {
            Token::End => Ok(()),
            _ => Err(self.error("end of input")),
        }
    }

    fn descend(&mut self) -> Result<()> {
        if self.depth >= MAX_TYPE_NESTING {
            return Err(Error::type_syntax(
                self.input,
                self.offset(),
                "type expression nested too deeply",
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn union(&mut self) -> Result<TypeExpr> {
        self.descend()?;
        let expr = self.union_members();
        self.depth -= 1;
        expr
    }

    fn union_members(&mut self) -> Result<TypeExpr> {
        // leading `|` is allowed, as in `| A | B`
        self.eat('|');
        let mut members = vec![self.postfix()?];
        while self.eat('|') {
            members.push(self.postfix()?);
        }
        Ok(if members.len() == 1 {
            members.remove(0)
        } else {
            TypeExpr::Union(members)
        })
    }

    fn postfix(&mut self) -> Result<TypeExpr> {
        let mut expr = self.primary()?;
        let depth = self.depth;
        while self.eat('[') {
            self.expect(']')?;
            self.descend()?;
            expr = TypeExpr::Array(Box::new(expr));
        }
        self.depth = depth;
        Ok(expr)
    }

    fn primary(&mut self) -> Result<TypeExpr> {
        match self.peek().clone() {
            Token::Ident(name) => {
                self.advance();
                let mut arguments = Vec::new();
                if self.eat('<') {
                    arguments.push(self.union()?);
                    while self.eat(',') {
                        arguments.push(self.union()?);
                    }
                    self.expect('>')?;
                }
                Ok(TypeExpr::Name { name, arguments })
            }
            Token::Str(value) => {
                self.advance();
                Ok(TypeExpr::StringLiteral(value))
            }
            Token::Num(value) => {
                self.advance();
                Ok(TypeExpr::NumberLiteral(value))
            }
            Token::Punct('[') => {
                self.advance();
                let mut elements = Vec::new();
                if !self.eat(']') {
                    elements.push(self.union()?);
                    while self.eat(',') {
                        elements.push(self.union()?);
                    }
                    self.expect(']')?;
                }
                Ok(TypeExpr::Tuple(elements))
            }
            Token::Punct('{') => {
                self.advance();
                self.object()
            }
            Token::Punct('(') => {
                self.advance();
                let inner = self.union()?;
                self.expect(')')?;
                Ok(inner)
            }
            _ => Err(self.error("a type")),
        }
    }

    fn object(&mut self) -> Result<TypeExpr> {
        let mut fields = Vec::new();
        loop {
            if self.eat('}') {
                return Ok(TypeExpr::Object(fields));
            }
            let name = match self.advance() {
                Token::Ident(name) | Token::Str(name) => name,
                _ => {
                    self.position -= 1;
                    return Err(self.error("a field name or `}`"));
                }
            };
            let optional = self.eat('?');
            self.expect(':')?;
            let ty = self.union()?;
            fields.push(FieldExpr { name, optional, ty });
            if !self.eat(';') {
                self.eat(',');
            }
        }
    }
}

/// Names a manifest declares, used to lower type expressions
#[derive(Debug, Default)]
pub struct TypeScope {
    aliases: HashMap<String, TypeExpr>,
    enums: HashSet<String>,
}

impl TypeScope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type alias
    pub fn alias(&mut self, name: impl Into<String>, expr: TypeExpr) -> Result<()> {
        let name = name.into();
        if self.aliases.contains_key(&name) {
            return Err(Error::manifest(format!("duplicate type alias `{name}`")));
        }
        self.aliases.insert(name, expr);
        Ok(())
    }

    /// Declare an enum
    pub fn enumeration(&mut self, name: impl Into<String>) {
        self.enums.insert(name.into());
    }

    /// Parse and lower a type expression
    pub fn resolve(&self, input: &str, types: &mut TypeTable) -> Result<TypeId> {
        let expr = parse(input)?;
        self.lower(&expr, types)
    }

    /// Intern a parsed expression
    ///
    /// Bare names resolve, in order, to primitives, `any` / `unknown`,
    /// aliases, enums and finally classes.
    pub fn lower(&self, expr: &TypeExpr, types: &mut TypeTable) -> Result<TypeId> {
        self.lower_in(expr, types, &mut Vec::new())
    }

    fn lower_in(
        &self,
        expr: &TypeExpr,
        types: &mut TypeTable,
        expanding: &mut Vec<String>,
    ) -> Result<TypeId> {
        match expr {
            TypeExpr::Name { name, arguments } if arguments.is_empty() => {
                self.lower_name(name, types, expanding)
            }
            TypeExpr::Name { name, arguments } => {
                if self.aliases.contains_key(name) {
                    return Err(Error::manifest(format!(
                        "type alias `{name}` does not take type arguments"
                    )));
                }
                let arguments = arguments
                    .iter()
                    .map(|argument| self.lower_in(argument, types, expanding))
                    .collect::<Result<Vec<_>>>()?;
                match arguments.as_slice() {
                    [element] if name == ARRAY_CONTAINER_NAME => Ok(types.array_of(*element)),
                    _ => Ok(types.reference(name.clone(), arguments)),
                }
            }
            TypeExpr::Array(element) => {
                let element = self.lower_in(element, types, expanding)?;
                Ok(types.array_of(element))
            }
            TypeExpr::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| self.lower_in(element, types, expanding))
                    .collect::<Result<Vec<_>>>()?;
                Ok(types.tuple(elements))
            }
            TypeExpr::Object(fields) => {
                let fields = self.lower_fields(fields, types, expanding)?;
                Ok(types.object(fields))
            }
            TypeExpr::Union(members) => {
                let members = members
                    .iter()
                    .map(|member| self.lower_in(member, types, expanding))
                    .collect::<Result<Vec<_>>>()?;
                Ok(types.union(members))
            }
            TypeExpr::StringLiteral(value) => Ok(types.literal(Literal::String(value.clone()))),
            TypeExpr::NumberLiteral(value) => Ok(types.literal(Literal::Number(value.clone()))),
        }
    }

    fn lower_name(
        &self,
        name: &str,
        types: &mut TypeTable,
        expanding: &mut Vec<String>,
    ) -> Result<TypeId> {
        if let Some(primitive) = Primitive::from_keyword(name) {
            return Ok(types.primitive(primitive));
        }
        match name {
            "any" | "unknown" => return Ok(types.dynamic()),
            "true" | "false" => return Ok(types.primitive(Primitive::Boolean)),
            _ => {}
        }
        if let Some(target) = self.aliases.get(name) {
            if expanding.iter().any(|alias| alias == name) {
                return Err(Error::manifest(format!(
                    "type alias `{name}` refers to itself"
                )));
            }
            expanding.push(name.to_string());
            let lowered = self.lower_in(target, types, expanding);
            expanding.pop();
            return lowered;
        }
        if self.enums.contains(name) {
            return Ok(types.enumeration(name));
        }
        Ok(types.class(name))
    }

    /// Lower the members of a structural shape
    pub fn lower_shape(&self, fields: &[FieldExpr], types: &mut TypeTable) -> Result<Vec<Field>> {
        self.lower_fields(fields, types, &mut Vec::new())
    }

    /// Optional members accept `undefined`
    fn lower_fields(
        &self,
        fields: &[FieldExpr],
        types: &mut TypeTable,
        expanding: &mut Vec<String>,
    ) -> Result<Vec<Field>> {
        fields
            .iter()
            .map(|field| {
                let mut ty = self.lower_in(&field.ty, types, expanding)?;
                if field.optional {
                    let undefined = types.primitive(Primitive::Undefined);
                    ty = types.union(vec![ty, undefined]);
                }
                Ok(Field::new(field.name.clone(), ty))
            })
            .collect()
    }
}
