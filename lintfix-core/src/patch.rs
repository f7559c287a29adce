use camino::Utf8Path;
use diffy::PatchFormatter;

/// Unified diff of one file, with git-style headers.
///
/// Returns an empty string when `old == new`.
pub fn render_file_patch(path: &Utf8Path, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(old, new);
    let body = PatchFormatter::new().fmt_patch(&patch).to_string();
    // diffy emits its own ---/+++ header; keep only the hunks.
    let hunks = match body.find("\n@@") {
        Some(i) => &body[i + 1..],
        None => body.as_str(),
    };
    out.push_str(hunks);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
