//! CSS-like selector parsing for widget queries.
//!
//! Supports:
//! - `"Button"` - by brick name
//! - `"[data-testid='description-toggle']"` - by test ID
//! - `"[aria-label='Show more']"` - by accessible name
//! - `"[role='button']"` - by accessible role

use dossier_core::Widget;
use thiserror::Error;

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by brick name
    Type(String),
    /// Match by test ID
    TestId(String),
    /// Match by accessible name
    Label(String),
    /// Match by ARIA role
    Role(String),
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check if this selector matches a widget.
    #[must_use]
    pub fn matches(&self, widget: &dyn Widget) -> bool {
        match self {
            Self::Type(name) => widget.brick_name() == name,
            Self::TestId(id) => widget.test_id() == Some(id.as_str()),
            Self::Label(label) => widget.accessible_name() == Some(label.as_str()),
            Self::Role(role) => widget.accessible_role().aria_name() == role,
        }
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.trim(),
            pos: 0,
        }
    }

    /// Parse the selector.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        let first = self.peek_char().ok_or(SelectorError::Empty)?;

        let selector = match first {
            '[' => self.parse_attribute()?,
            _ if first.is_alphabetic() => Selector::Type(self.read_identifier()?),
            _ => return Err(SelectorError::UnexpectedChar(first)),
        };

        match self.peek_char() {
            None => Ok(selector),
            Some(c) => Err(SelectorError::UnexpectedChar(c)),
        }
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // '['

        let name = self.read_until_any(&['=', ']']).trim().to_string();
        if name.is_empty() || self.peek_char() != Some('=') {
            return Err(SelectorError::InvalidAttribute);
        }
        self.advance(); // '='

        let quote = self.peek_char().filter(|c| matches!(c, '\'' | '"'));
        if quote.is_some() {
            self.advance();
        }
        let value = match quote {
            Some(q) => self.read_until_any(&[q]),
            None => self.read_until_any(&[']']),
        };
        if quote.is_some() {
            if self.peek_char() != quote {
                return Err(SelectorError::UnclosedAttribute);
            }
            self.advance();
        }

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        match name.as_str() {
            "data-testid" => Ok(Selector::TestId(value)),
            "aria-label" => Ok(Selector::Label(value)),
            "role" => Ok(Selector::Role(value)),
            _ => Err(SelectorError::UnknownAttribute(name)),
        }
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input.get(start..self.pos).unwrap_or_default().to_string())
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input.get(start..self.pos).unwrap_or_default().to_string()
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos..)?.chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Empty selector
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Expected identifier
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Invalid attribute syntax
    #[error("invalid attribute syntax")]
    InvalidAttribute,
    /// Unclosed attribute bracket or quote
    #[error("unclosed attribute bracket")]
    UnclosedAttribute,
    /// Attribute we can't match on
    #[error("unsupported attribute: '{0}'")]
    UnknownAttribute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type() {
        let sel = Selector::parse("Button").unwrap();
        assert_eq!(sel, Selector::Type("Button".to_string()));
    }

    #[test]
    fn test_parse_whitespace() {
        let sel = Selector::parse("  Description  ").unwrap();
        assert_eq!(sel, Selector::Type("Description".to_string()));
    }

    #[test]
    fn test_parse_test_id() {
        let sel = Selector::parse("[data-testid='description-toggle']").unwrap();
        assert_eq!(sel, Selector::TestId("description-toggle".to_string()));
    }

    #[test]
    fn test_parse_test_id_double_quotes() {
        let sel = Selector::parse("[data-testid=\"login\"]").unwrap();
        assert_eq!(sel, Selector::TestId("login".to_string()));
    }

    #[test]
    fn test_parse_unquoted_value() {
        let sel = Selector::parse("[role=button]").unwrap();
        assert_eq!(sel, Selector::Role("button".to_string()));
    }

    #[test]
    fn test_parse_label_with_spaces_and_brackets() {
        let sel = Selector::parse("[aria-label='Show 5 more [all]']").unwrap();
        assert_eq!(sel, Selector::Label("Show 5 more [all]".to_string()));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("#id"), Err(SelectorError::UnexpectedChar('#')));
        assert_eq!(Selector::parse("[data-testid]"), Err(SelectorError::InvalidAttribute));
        assert_eq!(
            Selector::parse("[data-testid='x'"),
            Err(SelectorError::UnclosedAttribute)
        );
        assert_eq!(
            Selector::parse("[data-testid='x]"),
            Err(SelectorError::UnclosedAttribute)
        );
        assert_eq!(
            Selector::parse("[class='x']"),
            Err(SelectorError::UnknownAttribute("class".to_string()))
        );
        assert_eq!(Selector::parse("Button Text"), Err(SelectorError::UnexpectedChar(' ')));
    }

    proptest::proptest! {
        #[test]
        fn prop_quoted_test_id_roundtrips(id in "[a-zA-Z0-9 _\\-\\[\\]]{0,24}") {
            let sel = Selector::parse(&format!("[data-testid='{id}']")).unwrap();
            proptest::prop_assert_eq!(sel, Selector::TestId(id));
        }

        #[test]
        fn prop_parse_never_panics(input in "\\PC{0,32}") {
            let _ = Selector::parse(&input);
        }
    }

    #[test]
    fn test_selector_error_display() {
        assert_eq!(SelectorError::Empty.to_string(), "empty selector");
        assert_eq!(
            SelectorError::UnexpectedChar('@').to_string(),
            "unexpected character: '@'"
        );
        assert_eq!(
            SelectorError::UnknownAttribute("x".into()).to_string(),
            "unsupported attribute: 'x'"
        );
    }
}
