//! Rule-driven rewriting of `#define` values.
//!
//! A patch is a pure function from the current header text and an ordered
//! table of [`Rule`]s to the new text. Nothing here touches the filesystem.
//!
//! There are two rewrite styles and the drivers rely on their differences:
//!
//! - [`rewrite_lines`]: each line is matched against the rules in order and
//!   only the first match applies. The matched line is rebuilt as the
//!   `#define NAME ` prefix plus the new value, so anything after the old
//!   value (a trailing comment, say) is dropped. Output is normalised to
//!   `\n` line endings with exactly one trailing newline.
//! - [`splice_values`]: each rule is applied to the whole text in turn and
//!   rewrites every line it matches. Decimal values are spliced in place and
//!   the rest of the line survives. Quoted and hex values only match when
//!   nothing but whitespace follows them. Line endings are left alone.

use regex::Regex;
use std::fmt;

/// The shape of the value a rule expects after the macro name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// A run of decimal digits.
    Decimal,
    /// A double-quoted string.
    Quoted,
    /// A `0x`-prefixed hex literal.
    Hex,
}

/// What to do when no line matches a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnMissing {
    /// Leave the text alone.
    Skip,
    /// Append a new `#define NAME\t\t\tVALUE` line at the end of the text.
    Append,
}

/// One substitution: a macro name, the value shape it must have, and the
/// replacement value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    shape: Shape,
    value: String,
    on_missing: OnMissing,
}

impl Rule {
    /// Replace a decimal value.
    pub fn decimal(name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(name, Shape::Decimal, value.to_string())
    }

    /// Replace the contents of a quoted string. `value` is given unquoted.
    pub fn quoted(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Shape::Quoted, value.into())
    }

    /// Replace a hex literal. `literal` includes its `0x` prefix.
    pub fn hex(name: impl Into<String>, literal: impl Into<String>) -> Self {
        Self::new(name, Shape::Hex, literal.into())
    }

    fn new(name: impl Into<String>, shape: Shape, value: String) -> Self {
        Self {
            name: name.into(),
            shape,
            value,
            on_missing: OnMissing::Skip,
        }
    }

    /// Append a definition when no line matches.
    pub fn or_append(mut self) -> Self {
        self.on_missing = OnMissing::Append;
        self
    }

    /// The value as it is written into the header.
    fn rendered(&self) -> String {
        match self.shape {
            Shape::Quoted => format!("\"{}\"", self.value),
            Shape::Decimal | Shape::Hex => self.value.clone(),
        }
    }

    fn appended_line(&self) -> String {
        format!("#define {}\t\t\t{}", self.name, self.rendered())
    }

    /// Prefix-anchored pattern used by [`rewrite_lines`]. Group 1 is the
    /// `#define NAME ` prefix.
    fn line_pattern(&self) -> Result<Regex, regex::Error> {
        let value = match self.shape {
            Shape::Decimal => "[0-9]+",
            Shape::Quoted => "\".*\"",
            Shape::Hex => "0x[0-9A-Fa-f]+",
        };
        Regex::new(&format!(
            r"^(#define\s+{}\s+){value}",
            regex::escape(&self.name)
        ))
    }

    /// Whole-line pattern used by [`splice_values`]. Group 1 is everything
    /// before the value, group 2 the value, group 3 whatever may follow it.
    fn splice_pattern(&self) -> Result<Regex, regex::Error> {
        let name = regex::escape(&self.name);
        let pattern = match self.shape {
            Shape::Decimal => format!(r"^(#define\s+{name}\s+)([0-9]+)(.*)$"),
            Shape::Quoted => format!(r#"^(#define\s+{name}\s+)("[^"]*")(\s*)$"#),
            Shape::Hex => format!(r"^(#define\s+{name}\s+)(0x[0-9A-Fa-f]+)(\s*)$"),
        };
        Regex::new(&pattern)
    }
}

/// How a single rule fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Macro name.
    pub name: String,
    /// Lines rewritten.
    pub matched: usize,
    /// True when the rule appended a new definition.
    pub appended: bool,
}

impl RuleOutcome {
    /// True when the rule neither matched nor appended.
    pub fn skipped(&self) -> bool {
        self.matched == 0 && !self.appended
    }
}

/// Result of applying a rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    /// The new header text.
    pub text: String,
    /// One entry per rule, in rule order.
    pub outcomes: Vec<RuleOutcome>,
}

/// Errors produced while compiling a rule table.
#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    /// A rule's matching pattern failed to compile.
    #[error("Invalid pattern for macro {name}: {source}")]
    Pattern {
        /// Macro name.
        name: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}

fn compile(
    rules: &[Rule],
    pattern: impl Fn(&Rule) -> Result<Regex, regex::Error>,
) -> Result<Vec<Regex>, PatchError> {
    rules
        .iter()
        .map(|rule| {
            pattern(rule).map_err(|source| PatchError::Pattern {
                name: rule.name.clone(),
                source,
            })
        })
        .collect()
}

/// Rebuild matched lines as prefix plus new value, first rule wins.
///
/// # Errors
///
/// Returns [`PatchError::Pattern`] if a rule's pattern cannot be compiled.
pub fn rewrite_lines(text: &str, rules: &[Rule]) -> Result<Patched, PatchError> {
    let patterns = compile(rules, Rule::line_pattern)?;
    let mut matched = vec![0usize; rules.len()];

    let mut lines: Vec<String> = text
        .lines()
        .map(|line| {
            for (idx, (rule, re)) in rules.iter().zip(&patterns).enumerate() {
                if let Some(caps) = re.captures(line) {
                    matched[idx] += 1;
                    return format!("{}{}", &caps[1], rule.rendered());
                }
            }
            line.to_string()
        })
        .collect();

    let mut outcomes = Vec::with_capacity(rules.len());
    for (rule, count) in rules.iter().zip(matched) {
        let appended = count == 0 && rule.on_missing == OnMissing::Append;
        if appended {
            lines.push(rule.appended_line());
        }
        outcomes.push(RuleOutcome {
            name: rule.name.clone(),
            matched: count,
            appended,
        });
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(Patched {
        text: out,
        outcomes,
    })
}

/// Apply each rule over the whole text in order, splicing values in place.
///
/// # Errors
///
/// Returns [`PatchError::Pattern`] if a rule's pattern cannot be compiled.
pub fn splice_values(text: &str, rules: &[Rule]) -> Result<Patched, PatchError> {
    let patterns = compile(rules, Rule::splice_pattern)?;
    let mut current = text.to_string();
    let mut outcomes = Vec::with_capacity(rules.len());

    for (rule, re) in rules.iter().zip(&patterns) {
        let (next, matched) = splice_one(&current, rule, re);
        current = next;

        let appended = matched == 0 && rule.on_missing == OnMissing::Append;
        if appended {
            current.push('\n');
            current.push_str(&rule.appended_line());
            current.push('\n');
        }
        outcomes.push(RuleOutcome {
            name: rule.name.clone(),
            matched,
            appended,
        });
    }

    Ok(Patched {
        text: current,
        outcomes,
    })
}

fn splice_one(text: &str, rule: &Rule, re: &Regex) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut matched = 0;

    for piece in text.split_inclusive('\n') {
        let (body, ending) = split_ending(piece);
        match re.captures(body) {
            Some(caps) => {
                matched += 1;
                out.push_str(&caps[1]);
                out.push_str(&rule.rendered());
                // Decimal lines keep whatever followed the number; quoted and
                // hex lines only matched because the tail was blank.
                if rule.shape == Shape::Decimal {
                    out.push_str(&caps[3]);
                }
                out.push_str(ending);
            }
            None => out.push_str(piece),
        }
    }

    (out, matched)
}

fn split_ending(piece: &str) -> (&str, &str) {
    let cut = if piece.ends_with("\r\n") {
        piece.len() - 2
    } else if piece.ends_with('\n') {
        piece.len() - 1
    } else {
        piece.len()
    };
    piece.split_at(cut)
}
