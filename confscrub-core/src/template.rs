//! Replacement templates.
//!
//! A template is the second quoted string of a rule line. It may contain a
//! placeholder that receives the identifier assigned to a captured value:
//!
//! * `{}` or `{0}`, optionally followed by a format spec `:[0][width][d]`
//!   (`{0:03}` renders identifier 7 as `007`, `{:4}` as `   7`);
//! * `{{` and `}}` render literal braces.
//!
//! `{0}` may be repeated. `{}` uses automatic numbering, so only the first one
//! refers to the identifier, and mixing `{}` with `{0}` is rejected. Templates
//! are parsed once, at load time, into a flat segment list.
//!
//! License: MIT OR APACHE 2.0

use std::fmt::Write as _;

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Identifier { width: usize, zero_pad: bool },
}

/// A parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTemplate {
    source: String,
    segments: Vec<Segment>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Unset,
    Automatic,
    Manual,
}

impl ReplacementTemplate {
    /// Parses a template string. The error is a human-readable reason.
    pub fn parse(source: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut numbering = Numbering::Unset;
        let mut auto_index = 0usize;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut field = String::new();
                    let mut closed = false;
                    for f in chars.by_ref() {
                        if f == '}' {
                            closed = true;
                            break;
                        }
                        field.push(f);
                    }
                    if !closed {
                        return Err("unclosed '{' in template".to_string());
                    }

                    let (name, spec) = match field.split_once(':') {
                        Some((name, spec)) => (name, spec),
                        None => (field.as_str(), ""),
                    };

                    let index = if name.is_empty() {
                        if numbering == Numbering::Manual {
                            return Err("cannot mix '{}' with numbered fields".to_string());
                        }
                        numbering = Numbering::Automatic;
                        auto_index += 1;
                        auto_index - 1
                    } else if name.chars().all(|d| d.is_ascii_digit()) {
                        if numbering == Numbering::Automatic {
                            return Err("cannot mix '{}' with numbered fields".to_string());
                        }
                        numbering = Numbering::Manual;
                        name.parse::<usize>().map_err(|e| e.to_string())?
                    } else {
                        return Err(format!("named field '{}' is not supported", name));
                    };

                    if index != 0 {
                        return Err(format!(
                            "field {} referenced, but only the identifier (field 0) is supplied",
                            index
                        ));
                    }

                    let (width, zero_pad) = parse_spec(spec)?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Identifier { width, zero_pad });
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err("single '}' encountered in template".to_string()),
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Renders the template with `id` substituted for every placeholder.
    pub fn render(&self, id: u64) -> String {
        let mut out = String::with_capacity(self.source.len() + 4);
        self.render_into(&mut out, id);
        out
    }

    /// Appends the rendered template to `out`.
    fn render_into(&self, out: &mut String, id: u64) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Identifier { width, zero_pad: true } => {
                    let _ = write!(out, "{:0width$}", id, width = *width);
                }
                Segment::Identifier { width, zero_pad: false } => {
                    let _ = write!(out, "{:>width$}", id, width = *width);
                }
            }
        }
    }

    /// The template as written in the rule file.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Parses `[0][width][d]`.
fn parse_spec(spec: &str) -> Result<(usize, bool), String> {
    let digits = spec.strip_suffix('d').unwrap_or(spec);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("unsupported format spec '{}'", spec));
    }
    if digits.is_empty() {
        return Ok((0, false));
    }
    let zero_pad = digits.len() > 1 && digits.starts_with('0');
    let width = digits.parse::<usize>().map_err(|e| e.to_string())?;
    Ok((width, zero_pad))
}
