//! Pattern string parser.

use super::criterion::{Criterion, Pattern};
use super::error::PatternError;

/// Parser for pattern strings such as `$.pets[*].name`.
pub struct Parser<'s> {
    input: &'s str,
    position: usize,
}

impl<'s> Parser<'s> {
    /// Creates a new parser for the given pattern string.
    pub fn new(input: &'s str) -> Self {
        Self { input, position: 0 }
    }

    /// Parses the pattern string into a [`Pattern`].
    pub fn parse(input: &str) -> Result<Pattern, PatternError> {
        let mut parser = Parser::new(input);
        parser.parse_pattern()
    }

    fn parse_pattern(&mut self) -> Result<Pattern, PatternError> {
        let mut criteria = Vec::new();

        self.skip_whitespace();
        if self.is_eof() {
            return Err(PatternError::EmptyPattern);
        }

        // Expect root ($)
        if self.peek() != Some('$') {
            return Err(PatternError::InvalidSyntax {
                message: "pattern must start with '$'".to_string(),
            });
        }
        self.next();
        criteria.push(Criterion::Root);

        loop {
            self.skip_whitespace();
            let position = self.position;
            match self.peek() {
                Some('.') => {
                    self.next();
                    self.skip_whitespace();
                    match self.peek() {
                        Some('*') => {
                            self.next();
                            criteria.push(Criterion::AnyKey);
                        }
                        Some('.') => {
                            return Err(PatternError::InvalidSyntax {
                                message: "recursive descent ('..') is not supported".to_string(),
                            })
                        }
                        _ => criteria.push(Criterion::Key(self.parse_identifier()?)),
                    }
                }
                Some('[') => criteria.push(self.parse_bracket_expression()?),
                Some(ch) => {
                    return Err(PatternError::UnexpectedToken {
                        position,
                        found: ch.to_string(),
                        expected: "'.' or '['".to_string(),
                    })
                }
                None => break,
            }
        }

        Pattern::new(criteria)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), PatternError> {
        self.skip_whitespace();
        let position = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(PatternError::UnexpectedToken {
                position,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(PatternError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses a key name after a dot.
    fn parse_identifier(&mut self) -> Result<String, PatternError> {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                self.next();
            } else {
                break;
            }
        }
        if start == self.position {
            match self.peek() {
                Some(ch) => Err(PatternError::UnexpectedToken {
                    position: start,
                    found: ch.to_string(),
                    expected: "key name or '*'".to_string(),
                }),
                None => Err(PatternError::UnexpectedEnd {
                    expected: "key name or '*'".to_string(),
                }),
            }
        } else {
            Ok(self.input[start..self.position].to_string())
        }
    }

    /// Parses bracket expression: [index], ['key'], [*]
    fn parse_bracket_expression(&mut self) -> Result<Criterion, PatternError> {
        self.expect('[')?;
        self.skip_whitespace();

        let position = self.position;
        let criterion = match self.peek() {
            Some('*') => {
                self.next();
                Criterion::AnyIndex
            }
            Some(quote @ ('\'' | '"')) => {
                self.next();
                Criterion::Key(self.parse_quoted(quote)?)
            }
            Some('0'..='9') => Criterion::Index(self.parse_index()?),
            Some(ch) => {
                return Err(PatternError::UnexpectedToken {
                    position,
                    found: ch.to_string(),
                    expected: "'*', quoted key or index".to_string(),
                })
            }
            None => {
                return Err(PatternError::UnexpectedEnd {
                    expected: "'*', quoted key or index".to_string(),
                })
            }
        };

        self.expect(']')?;
        Ok(criterion)
    }

    /// Parses the body of a quoted key; the opening quote is already consumed.
    fn parse_quoted(&mut self, quote: char) -> Result<String, PatternError> {
        let mut value = String::new();
        loop {
            match self.next() {
                Some(ch) if ch == quote => return Ok(value),
                Some('\\') => match self.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('\'') => value.push('\''),
                    Some('"') => value.push('"'),
                    Some(_) | None => {
                        return Err(PatternError::InvalidSyntax {
                            message: "invalid escape sequence".to_string(),
                        })
                    }
                },
                Some(ch) => value.push(ch),
                None => {
                    return Err(PatternError::UnexpectedEnd {
                        expected: format!("closing quote {}", quote),
                    })
                }
            }
        }
    }

    fn parse_index(&mut self) -> Result<usize, PatternError> {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.next();
            } else {
                break;
            }
        }
        let digits = &self.input[start..self.position];
        digits
            .parse::<usize>()
            .map_err(|_| PatternError::InvalidSyntax {
                message: format!("invalid index: {}", digits),
            })
    }
}
