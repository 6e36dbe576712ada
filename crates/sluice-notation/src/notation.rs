//! The bracket-notation grammar.
//!
//! ```text
//! value    = list | scalar
//! list     = "[" [ element { "," element } ] "]"
//! element  = { char | "'" quoted "'" }
//! quoted   = { char | "\" any }        (commas are literal here)
//! scalar   = any text without "[" or "]"
//! ```
//!
//! Surrounding whitespace of the whole value is ignored. A list element is
//! everything between two top-level commas; quotes only change how commas
//! and backslashes are read, they are not part of the element. An empty
//! trailing element is not emitted, so `[]` is the empty list.

use crate::error::{NotationError, Result};
use crate::params::{ParsedParameters, RawParameters, RawValue};
use crate::value::Arg;

/// How unquoted list elements are typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scalars {
    /// Every list element is a string, exactly as submitted.
    #[default]
    Verbatim,
    /// Unquoted elements that spell a boolean or a number become typed.
    Infer,
}

/// Bracket-notation parser.
///
/// Parsing is deterministic and keeps no state between calls.
///
/// # Example
///
/// ```
/// use sluice_notation::{Arg, Notation};
///
/// let notation = Notation::new();
/// let args = notation.parse_str("['new york', 'london']").unwrap();
/// assert_eq!(args, vec![Arg::from("new york"), Arg::from(" london")]);
///
/// let typed = Notation::new().infer_scalars(true);
/// assert_eq!(
///     typed.parse_str("[age,>,'18',18]").unwrap(),
///     vec![Arg::from("age"), Arg::from(">"), Arg::from("18"), Arg::Int(18)]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Notation {
    scalars: Scalars,
}

impl Notation {
    /// Creates a parser that keeps list elements verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches scalar inference for unquoted list elements on or off.
    pub fn infer_scalars(mut self, infer: bool) -> Self {
        self.scalars = if infer {
            Scalars::Infer
        } else {
            Scalars::Verbatim
        };
        self
    }

    /// Returns the configured scalar mode.
    pub fn scalars(&self) -> Scalars {
        self.scalars
    }

    /// Parses one raw parameter value.
    ///
    /// Structured lists pass through unchanged and non-string scalars
    /// become a one-element list with their type intact. String scalars go
    /// through the grammar like text.
    pub fn parse(&self, raw: &RawValue) -> Result<Vec<Arg>> {
        match raw {
            RawValue::List(args) => Ok(args.clone()),
            RawValue::Scalar(Arg::Str(text)) => self.parse_str(text),
            RawValue::Scalar(arg) => Ok(vec![arg.clone()]),
            RawValue::Text(text) => self.parse_str(text),
        }
    }

    /// Parses a bracket-notation string.
    pub fn parse_str(&self, raw: &str) -> Result<Vec<Arg>> {
        let trimmed = raw.trim();

        if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
            return self.parse_list(&trimmed[1..trimmed.len() - 1], raw);
        }

        if !trimmed.contains(['[', ']']) {
            return Ok(vec![Arg::Str(raw.to_string())]);
        }

        Err(NotationError::StrayBracket {
            value: raw.to_string(),
        })
    }

    /// Parses every entry of a parameter mapping, in order.
    ///
    /// Malformed entries keep their place but are left out of
    /// [`ParsedParameters::iter`]; see [`ParsedParameters::rejected`]. The
    /// remaining entries are unaffected.
    pub fn parse_params(&self, raw: &RawParameters) -> ParsedParameters {
        let mut parsed = ParsedParameters::new();
        for (key, value) in raw.iter() {
            let result = self.parse(value);
            if let Err(error) = &result {
                tracing::debug!(key = %key, %error, "dropping malformed parameter");
            }
            parsed.insert(key.clone(), result);
        }
        parsed
    }

    fn parse_list(&self, inner: &str, raw: &str) -> Result<Vec<Arg>> {
        let mut items = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut had_quotes = false;
        let mut chars = inner.chars();

        while let Some(c) = chars.next() {
            match c {
                '\'' => {
                    in_quotes = !in_quotes;
                    had_quotes = true;
                }
                '\\' if in_quotes => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => {
                        return Err(NotationError::TrailingEscape {
                            value: raw.to_string(),
                        })
                    }
                },
                ',' if !in_quotes => {
                    items.push(self.element(std::mem::take(&mut current), had_quotes));
                    had_quotes = false;
                }
                _ => current.push(c),
            }
        }

        if !current.is_empty() {
            items.push(self.element(current, had_quotes));
        }

        Ok(items)
    }

    fn element(&self, token: String, quoted: bool) -> Arg {
        match self.scalars {
            Scalars::Infer if !quoted => Arg::infer(token),
            _ => Arg::Str(token),
        }
    }
}

/// Parses a bracket-notation string with the default (verbatim) parser.
pub fn parse(raw: &str) -> Result<Vec<Arg>> {
    Notation::new().parse_str(raw)
}

/// Renders an argument list back into bracket notation.
///
/// Strings are always quoted with `'` and `\` escaped; other values are
/// written bare. A verbatim parse of the output yields the original
/// strings, and an inferring parse yields the original typed values.
///
/// A trailing empty string is followed by a comma, since the grammar drops
/// an empty final element: `[""]` renders as `['',]`.
pub fn render(args: &[Arg]) -> String {
    let mut out = String::from("[");
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match arg {
            Arg::Str(s) => {
                out.push('\'');
                for c in s.chars() {
                    if matches!(c, '\'' | '\\') {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push('\'');
            }
            Arg::Float(n) => out.push_str(&format!("{n:?}")),
            other => out.push_str(&other.to_string()),
        }
    }
    if matches!(args.last(), Some(Arg::Str(s)) if s.is_empty()) {
        out.push(',');
    }
    out.push(']');
    out
}
