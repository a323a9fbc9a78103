//! Two-pass token engine for skeleton templates.
//!
//! Pass one evaluates conditional blocks of the form
//! `{if tag=="literal"} ... {endif}`; pass two substitutes flat
//! `##tag##` placeholders. Conditional blocks do not nest, and there is
//! no escaping mechanism; the skeleton templates shipped with this
//! crate are the only supported input.

use crate::domain::{AppError, TagStore};

const IF_MARKER: &str = "{if ";
const ENDIF_MARKER: &str = "{endif}";

/// Resolve all tokens in `text` against `tags`.
///
/// Deterministic: the same buffer and tag snapshot always produce the
/// same output. `file` is only used for error reporting.
pub fn resolve(text: &str, tags: &TagStore, file: &str) -> Result<String, AppError> {
    let conditionals_applied = resolve_conditionals(text, tags, file)?;
    resolve_placeholders(&conditionals_applied, tags, file)
}

fn syntax_error(file: &str, details: impl Into<String>) -> AppError {
    AppError::TemplateSyntax { file: file.to_string(), details: details.into() }
}

fn unresolved(tag: &str, file: &str) -> AppError {
    AppError::UnresolvedReference { tag: tag.to_string(), file: file.to_string() }
}

fn is_tag_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Evaluate `{if tag=="literal"}` blocks: keep the body when the tag's
/// value equals the literal, drop the whole block otherwise.
fn resolve_conditionals(text: &str, tags: &TagStore, file: &str) -> Result<String, AppError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(IF_MARKER) {
        out.push_str(&rest[..start]);

        let after_marker = &rest[start + IF_MARKER.len()..];
        let close = after_marker
            .find('}')
            .ok_or_else(|| syntax_error(file, "unterminated '{if' marker"))?;
        let (tag, literal) = parse_condition(&after_marker[..close], file)?;

        let mut body_and_rest = &after_marker[close + 1..];
        // Marker on its own line: swallow the line break.
        if let Some(stripped) = body_and_rest.strip_prefix('\n') {
            body_and_rest = stripped;
        }

        let end = body_and_rest
            .find(ENDIF_MARKER)
            .ok_or_else(|| syntax_error(file, "missing '{endif}' marker"))?;
        let body = &body_and_rest[..end];
        if body.contains(IF_MARKER) {
            return Err(syntax_error(file, "nested conditional blocks are not supported"));
        }

        let value = tags.get(tag).ok_or_else(|| unresolved(tag, file))?;
        if value == literal {
            out.push_str(body);
        }

        let mut tail = &body_and_rest[end + ENDIF_MARKER.len()..];
        if let Some(stripped) = tail.strip_prefix('\n') {
            tail = stripped;
        }
        rest = tail;
    }

    out.push_str(rest);
    Ok(out)
}

fn parse_condition<'a>(expr: &'a str, file: &str) -> Result<(&'a str, &'a str), AppError> {
    let (tag, literal) = expr
        .split_once("==")
        .ok_or_else(|| syntax_error(file, format!("invalid condition '{expr}'")))?;

    let tag = tag.trim();
    if !is_tag_name(tag) {
        return Err(syntax_error(file, format!("invalid tag name in condition '{expr}'")));
    }

    let literal = literal
        .trim()
        .strip_prefix('"')
        .and_then(|l| l.strip_suffix('"'))
        .ok_or_else(|| syntax_error(file, format!("condition literal must be quoted in '{expr}'")))?;

    Ok((tag, literal))
}

/// Replace every `##tag##` occurrence with the tag's value, verbatim.
///
/// A `##...##` pair whose inner text is not identifier-shaped (Markdown
/// headings, PHP comments) is left untouched; an identifier-shaped
/// placeholder naming an unknown tag is an error.
fn resolve_placeholders(text: &str, tags: &TagStore, file: &str) -> Result<String, AppError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let Some(open) = rest.find("##") else {
            out.push_str(rest);
            return Ok(out);
        };
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("##") else {
            out.push_str(rest);
            return Ok(out);
        };

        let name = &after_open[..close];
        if is_tag_name(name) {
            out.push_str(&rest[..open]);
            out.push_str(tags.get(name).ok_or_else(|| unresolved(name, file))?);
            rest = &after_open[close + 2..];
        } else {
            out.push_str(&rest[..open + 2]);
            rest = after_open;
        }
    }
}
