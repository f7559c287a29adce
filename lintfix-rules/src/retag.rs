use crate::markup::{Tag, TagKind, attr, scan_tags};
use crate::rule::{Rule, RuleKind, RuleMeta};
use std::borrow::Cow;
use std::ops::Range;

const ANCHOR: &str = "a";
const LINK: &str = "Link";

/// Turn internal `<a href="/...">` anchors into `<Link>` and make every
/// close tag in the `a`/`Link` family agree with its open tag.
///
/// Open and close tags are paired with a stack, so nested anchors (legal in
/// JSX even if not in HTML) pair correctly. Only paired tags are rewritten;
/// a dangling open or close tag is left alone.
#[derive(Debug, Clone)]
pub struct RetagLinks {
    key: &'static str,
    description: &'static str,
}

impl RetagLinks {
    pub fn new(key: &'static str, description: &'static str) -> Self {
        Self { key, description }
    }
}

fn is_family(tag: &Tag<'_>) -> bool {
    tag.name == ANCHOR || tag.name == LINK
}

/// Site-relative paths count as internal; protocol-relative `//host` does not.
pub(crate) fn is_internal_href(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

fn target_name(open: &Tag<'_>) -> &'static str {
    if open.name == LINK {
        return LINK;
    }
    let href = attr(open.attrs, "href").and_then(|v| v.static_text());
    match href {
        Some(h) if is_internal_href(h) => LINK,
        _ => ANCHOR,
    }
}

impl Rule for RetagLinks {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            key: self.key,
            description: self.description,
            kind: RuleKind::Retag,
        }
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        if !content.contains("<a") && !content.contains("Link") {
            return Cow::Borrowed(content);
        }

        let tags: Vec<Tag<'_>> = scan_tags(content)
            .into_iter()
            .filter(|t| is_family(t) && t.kind != TagKind::SelfClosing)
            .collect();

        let mut stack: Vec<usize> = Vec::new();
        let mut edits: Vec<(Range<usize>, &'static str)> = Vec::new();
        for (idx, tag) in tags.iter().enumerate() {
            match tag.kind {
                TagKind::Open => stack.push(idx),
                TagKind::Close => {
                    let Some(open_idx) = stack.pop() else { continue };
                    let open = &tags[open_idx];
                    let target = target_name(open);
                    if open.name != target {
                        edits.push((open.name_span.clone(), target));
                    }
                    if tag.name != target {
                        edits.push((tag.name_span.clone(), target));
                    }
                }
                TagKind::SelfClosing => {}
            }
        }

        if edits.is_empty() {
            return Cow::Borrowed(content);
        }
        edits.sort_by_key(|(span, _)| span.start);

        let mut out = String::with_capacity(content.len() + edits.len() * 3);
        let mut last = 0;
        for (span, name) in edits {
            out.push_str(&content[last..span.start]);
            out.push_str(name);
            last = span.end;
        }
        out.push_str(&content[last..]);
        Cow::Owned(out)
    }
}
