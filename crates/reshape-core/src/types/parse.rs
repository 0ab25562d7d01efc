//! Textual type shapes: `Future<Optional<List<Int>>>`, `Map<Text, Int>`,
//! `demo::User`. Identifiers that are not built-in types are record paths.

use crate::{
    error::{ErrorClass, ErrorOrigin},
    types::{RawType, TypeDescriptor},
};
use std::str::FromStr;
use thiserror::Error as ThisError;

/// Deepest generic nesting a declared shape may use.
pub const MAX_NESTING: usize = 64;

///
/// TypeParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TypeParseError {
    #[error("type shape is empty")]
    Empty,

    #[error("unexpected end of type shape, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unexpected '{found}' at position {position}, expected {expected}")]
    UnexpectedChar {
        position: usize,
        found: char,
        expected: &'static str,
    },

    #[error("trailing input at position {position}")]
    TrailingInput { position: usize },

    #[error("'{name}' takes at most {max} generic parameter(s), found {found}")]
    Arity {
        name: String,
        max: usize,
        found: usize,
    },

    #[error("'{0}' is reserved and cannot be declared")]
    Reserved(String),

    #[error("type shape nests deeper than {max} levels")]
    TooDeep { max: usize },
}

impl TypeParseError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Parse
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Type
    }
}

impl FromStr for TypeDescriptor {
    type Err = TypeParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(input);
        parser.skip_whitespace();
        if parser.peek().is_none() {
            return Err(TypeParseError::Empty);
        }

        let descriptor = parser.descriptor(0)?;
        parser.skip_whitespace();

        match parser.peek() {
            None => Ok(descriptor),
            Some(_) => Err(TypeParseError::TrailingInput {
                position: parser.position,
            }),
        }
    }
}

///
/// Parser
///

struct Parser {
    chars: Vec<(usize, char)>,
    index: usize,
    position: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.char_indices().collect(),
            index: 0,
            position: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let (position, c) = *self.chars.get(self.index)?;
        self.index += 1;
        self.position = position + c.len_utf8();

        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.position = self
            .chars
            .get(self.index)
            .map_or(self.position, |(position, _)| *position);
    }

    fn descriptor(&mut self, depth: usize) -> Result<TypeDescriptor, TypeParseError> {
        if depth > MAX_NESTING {
            return Err(TypeParseError::TooDeep { max: MAX_NESTING });
        }

        let name = self.identifier()?;
        let raw = match RawType::builtin(&name) {
            Some(RawType::NullableWrapper) => return Err(TypeParseError::Reserved(name)),
            Some(raw) => raw,
            None => RawType::Record(name.clone()),
        };

        self.skip_whitespace();
        let mut generics = Vec::new();
        if self.peek() == Some('<') {
            self.bump();
            loop {
                self.skip_whitespace();
                generics.push(self.descriptor(depth + 1)?);
                self.skip_whitespace();

                match self.bump() {
                    Some(',') => {}
                    Some('>') => break,
                    Some(found) => {
                        return Err(TypeParseError::UnexpectedChar {
                            position: self.position - found.len_utf8(),
                            found,
                            expected: "',' or '>'",
                        });
                    }
                    None => {
                        return Err(TypeParseError::UnexpectedEnd {
                            expected: "',' or '>'",
                        });
                    }
                }
            }
        }

        let max = raw.max_generics();
        if generics.len() > max {
            return Err(TypeParseError::Arity {
                name,
                max,
                found: generics.len(),
            });
        }

        Ok(TypeDescriptor::generic(raw, generics))
    }

    fn identifier(&mut self) -> Result<String, TypeParseError> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == ':' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if name.is_empty() {
            return match self.peek() {
                Some(found) => Err(TypeParseError::UnexpectedChar {
                    position: self.position,
                    found,
                    expected: "type name",
                }),
                None => Err(TypeParseError::UnexpectedEnd {
                    expected: "type name",
                }),
            };
        }

        Ok(name)
    }
}
