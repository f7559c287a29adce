//! A small scanner for JSX/HTML-style tags.
//!
//! It recognises open tags (with attributes), self-closing tags and close
//! tags, and is aware of quoted attribute values and `{...}` expressions so a
//! `>` inside `onClick={() => x > 1}` does not end the tag. It does not build
//! a tree; pairing open and close tags is left to the caller.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Open,
    SelfClosing,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    pub kind: TagKind,
    pub name: &'a str,
    /// Byte range of the name inside the scanned source.
    pub name_span: Range<usize>,
    /// Byte range of the whole tag, `<` through `>`.
    pub span: Range<usize>,
    /// Raw attribute text between the name and the closing `>` (or `/>`).
    pub attrs: &'a str,
}

/// Value of a single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue<'a> {
    /// `name="..."`, `name='...'` or an unquoted token.
    Literal(&'a str),
    /// `name={...}`; holds the text between the braces.
    Expression(&'a str),
    /// `name` with no value.
    Bare,
}

impl<'a> AttrValue<'a> {
    /// The value as text when it is known without evaluating anything: a
    /// literal, or an expression that is a single plain string.
    pub fn static_text(&self) -> Option<&'a str> {
        match *self {
            AttrValue::Literal(s) => Some(s),
            AttrValue::Expression(e) => {
                let e = e.trim();
                let q = *e.as_bytes().first()?;
                if e.len() < 2 || !matches!(q, b'"' | b'\'' | b'`') || !e.ends_with(q as char) {
                    return None;
                }
                let inner = &e[1..e.len() - 1];
                if inner.contains(q as char) || (q == b'`' && inner.contains("${")) {
                    return None;
                }
                Some(inner)
            }
            AttrValue::Bare => None,
        }
    }
}

/// Scan `src` left to right and return every tag found, in source order.
pub fn scan_tags(src: &str) -> Vec<Tag<'_>> {
    let mut tags = Vec::new();
    let mut i = 0;
    while let Some(off) = src[i..].find('<') {
        let start = i + off;
        match parse_tag(src, start) {
            Some(tag) => {
                i = tag.span.end;
                tags.push(tag);
            }
            None => i = start + 1,
        }
    }
    tags
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_' | b':')
}

fn parse_tag(src: &str, start: usize) -> Option<Tag<'_>> {
    let bytes = src.as_bytes();
    let mut pos = start + 1;
    let closing = bytes.get(pos) == Some(&b'/');
    if closing {
        pos += 1;
    }

    let name_start = pos;
    if !bytes.get(pos)?.is_ascii_alphabetic() {
        return None;
    }
    while pos < bytes.len() && is_name_byte(bytes[pos]) {
        pos += 1;
    }
    let name_span = name_start..pos;
    let name = &src[name_span.clone()];

    if closing {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'>') {
            return None;
        }
        return Some(Tag {
            kind: TagKind::Close,
            name,
            name_span,
            span: start..pos + 1,
            attrs: "",
        });
    }

    let next = *bytes.get(pos)?;
    if !(next == b'>' || next == b'/' || next.is_ascii_whitespace()) {
        return None;
    }

    let end = find_tag_end(bytes, pos)?;
    let raw = &src[pos..end];
    let trimmed = raw.trim_end();
    let (kind, attrs) = match trimmed.strip_suffix('/') {
        Some(rest) => (TagKind::SelfClosing, rest),
        None => (TagKind::Open, raw),
    };

    Some(Tag {
        kind,
        name,
        name_span,
        span: start..end + 1,
        attrs,
    })
}

/// Index of the `>` that ends the tag whose attributes start at `pos`.
fn find_tag_end(bytes: &[u8], mut pos: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    while pos < bytes.len() {
        let b = bytes[pos];
        match quote {
            Some(q) => {
                if b == b'\\' && depth > 0 {
                    pos += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'`' if depth > 0 => quote = Some(b),
                b'{' => depth += 1,
                b'}' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => return Some(pos),
                b'<' if depth == 0 => return None,
                _ => {}
            },
        }
        pos += 1;
    }
    None
}

/// Index just past the `}` matching the `{` at `pos`.
pub(crate) fn skip_braced(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = pos;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' | b'`' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

/// Look up attribute `name` in the raw attribute text of an open tag.
pub fn attr<'a>(attrs: &'a str, name: &str) -> Option<AttrValue<'a>> {
    let b = attrs.as_bytes();
    let len = b.len();
    let mut pos = 0;

    let skip_ws = |mut p: usize| {
        while p < len && b[p].is_ascii_whitespace() {
            p += 1;
        }
        p
    };

    loop {
        pos = skip_ws(pos);
        if pos >= len {
            return None;
        }
        if b[pos] == b'{' {
            // spread: {...props}
            pos = skip_braced(b, pos)?;
            continue;
        }

        let name_start = pos;
        while pos < len && (is_name_byte(b[pos]) || b[pos] == b'$') {
            pos += 1;
        }
        if pos == name_start {
            pos += 1;
            continue;
        }
        let current = &attrs[name_start..pos];

        pos = skip_ws(pos);
        let value = if b.get(pos) == Some(&b'=') {
            pos = skip_ws(pos + 1);
            match b.get(pos) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let start = pos + 1;
                    let end = start + attrs[start..].find(q as char)?;
                    pos = end + 1;
                    AttrValue::Literal(&attrs[start..end])
                }
                Some(b'{') => {
                    let end = skip_braced(b, pos)?;
                    let inner = &attrs[pos + 1..end - 1];
                    pos = end;
                    AttrValue::Expression(inner)
                }
                Some(_) => {
                    let start = pos;
                    while pos < len && !b[pos].is_ascii_whitespace() {
                        pos += 1;
                    }
                    AttrValue::Literal(&attrs[start..pos])
                }
                None => AttrValue::Bare,
            }
        } else {
            AttrValue::Bare
        };

        if current == name {
            return Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scans_open_close_and_self_closing() {
        let src = r#"<div className="x"><img src="/a.png" /><a href="/b">b</a></div>"#;
        let tags = scan_tags(src);
        let summary: Vec<(TagKind, &str)> = tags.iter().map(|t| (t.kind, t.name)).collect();
        assert_eq!(
            summary,
            vec![
                (TagKind::Open, "div"),
                (TagKind::SelfClosing, "img"),
                (TagKind::Open, "a"),
                (TagKind::Close, "a"),
                (TagKind::Close, "div"),
            ]
        );
        assert_eq!(&src[tags[2].name_span.clone()], "a");
        assert_eq!(&src[tags[2].span.clone()], r#"<a href="/b">"#);
    }

    #[test]
    fn arrow_inside_expression_does_not_end_tag() {
        let src = r#"<a onClick={() => go(x > 1)} href="/x">go</a>"#;
        let tags = scan_tags(src);
        assert_eq!(tags.len(), 2);
        assert_eq!(attr(tags[0].attrs, "href"), Some(AttrValue::Literal("/x")));
    }

    #[test]
    fn comparison_is_not_a_tag() {
        let tags = scan_tags("if (a < b && c<d) { return 1 }");
        assert!(tags.is_empty());
    }

    #[test]
    fn member_expression_names_are_kept_whole() {
        let tags = scan_tags("<Foo.Bar x='1'></Foo.Bar >");
        assert_eq!(tags[0].name, "Foo.Bar");
        assert_eq!(tags[1].kind, TagKind::Close);
        assert_eq!(tags[1].name, "Foo.Bar");
    }

    #[test]
    fn attr_reads_quoted_braced_and_bare_values() {
        let attrs = r#" {...rest} target='_blank' href={`/a/${id}`} download data-x=plain"#;
        assert_eq!(attr(attrs, "target"), Some(AttrValue::Literal("_blank")));
        assert_eq!(
            attr(attrs, "href"),
            Some(AttrValue::Expression("`/a/${id}`"))
        );
        assert_eq!(attr(attrs, "download"), Some(AttrValue::Bare));
        assert_eq!(attr(attrs, "data-x"), Some(AttrValue::Literal("plain")));
        assert_eq!(attr(attrs, "missing"), None);
    }

    #[test]
    fn static_text_unwraps_plain_string_expressions() {
        assert_eq!(AttrValue::Expression(r#" "/about" "#).static_text(), Some("/about"));
        assert_eq!(AttrValue::Expression("'/x'").static_text(), Some("/x"));
        assert_eq!(AttrValue::Expression("`/x`").static_text(), Some("/x"));
        assert_eq!(AttrValue::Expression("`/x/${id}`").static_text(), None);
        assert_eq!(AttrValue::Expression("url").static_text(), None);
        assert_eq!(AttrValue::Bare.static_text(), None);
    }
}
