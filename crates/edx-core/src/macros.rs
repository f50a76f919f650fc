//! Scanning `#define` lines out of a header.
//!
//! Only single-line definitions that start in column 0 are recognised, and
//! only when the value is a decimal number, a hex literal, or a quoted
//! string. Everything else (comments, continuations, `#ifdef` blocks,
//! macro expressions) is ignored.

use edx_schema::{Version, names};
use regex::Regex;
use std::sync::LazyLock;

static DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^#define\s+(\w+)\s+(0x[0-9A-Fa-f]+|[0-9]+|"[^"]*")"#)
        .expect("define pattern is valid")
});

/// Kind of value token. Only decimal digits are kept; the derived string
/// and hex macros are scanned so they never pass for a number.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MacroValue {
    /// Decimal digits, verbatim (leading zeros included).
    Number(String),
    Hex,
    Quoted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MacroDef {
    name: String,
    value: MacroValue,
}

/// Errors produced while decoding the version fields of a [`MacroSet`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// One or more of the numeric version macros has no definition.
    #[error("Could not find all version components in resource.h (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A numeric version macro does not fit in 32 bits.
    #[error("{name} value {value} is out of range")]
    OutOfRange {
        /// Macro name.
        name: &'static str,
        /// The digits as found in the header.
        value: String,
    },
}

/// All recognised definitions in a header, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroSet {
    defs: Vec<MacroDef>,
}

impl MacroSet {
    /// Scan a header's text.
    pub fn scan(text: &str) -> Self {
        let defs = text
            .lines()
            .filter_map(|raw| {
                let caps = DEFINE.captures(raw)?;
                let token = &caps[2];
                let value = if token.starts_with("0x") {
                    MacroValue::Hex
                } else if token.starts_with('"') {
                    MacroValue::Quoted
                } else {
                    MacroValue::Number(token.to_string())
                };
                Some(MacroDef {
                    name: caps[1].to_string(),
                    value,
                })
            })
            .collect();
        Self { defs }
    }

    /// Digits of the last decimal definition of `name`.
    ///
    /// Later definitions with a non-decimal value do not hide an earlier
    /// decimal one.
    pub fn number(&self, name: &str) -> Option<&str> {
        self.defs.iter().rev().find_map(|d| match &d.value {
            MacroValue::Number(digits) if d.name == name => Some(digits.as_str()),
            _ => None,
        })
    }

    /// Decode `EDX_MAJOR`, `EDX_MINOR`, `EDX_PATCH` and `EDX_BUILD`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingFields`] listing every absent macro, or
    /// [`DecodeError::OutOfRange`] if a value overflows `u32`.
    pub fn decode_version(&self) -> Result<Version, DecodeError> {
        let missing: Vec<&'static str> = names::NUMERIC
            .into_iter()
            .filter(|name| self.number(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(DecodeError::MissingFields(missing));
        }

        let mut fields = [0u32; 4];
        for (slot, name) in fields.iter_mut().zip(names::NUMERIC) {
            let digits = self.number(name).unwrap_or_default();
            *slot = digits.parse().map_err(|_| DecodeError::OutOfRange {
                name,
                value: digits.to_string(),
            })?;
        }

        let [major, minor, patch, build] = fields;
        Ok(Version::new(major, minor, patch, build))
    }
}
