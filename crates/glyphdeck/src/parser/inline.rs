use super::Inline;

type Wrap = fn(Vec<Inline>) -> Inline;

const PAIRED: [(&str, Wrap); 4] = [
    ("**", Inline::Bold),
    ("__", Inline::Bold),
    ("~~", Inline::Strikethrough),
    ("*", Inline::Italic),
];

/// Parse inline markdown spans: `**bold**`, `*italic*`, `_italic_`,
/// `~~strike~~`, `` `code` ``, `[text](url)` and backslash escapes.
/// Delimiters without a closing partner are kept as literal text.
pub fn parse(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '\\' {
            if let Some(next) = rest[1..].chars().next().filter(|n| n.is_ascii_punctuation()) {
                buf.push(next);
                rest = &rest[1 + next.len_utf8()..];
                continue;
            }
        }
        if let Some((span, after)) = span_at(rest, buf.chars().last()) {
            flush(&mut out, &mut buf);
            out.push(span);
            rest = after;
            continue;
        }
        buf.push(c);
        rest = &rest[c.len_utf8()..];
    }
    flush(&mut out, &mut buf);
    out
}

/// Plain text of a span tree, markup removed.
pub fn inlines_to_text(inlines: &[Inline]) -> String {
    let mut text = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(s) | Inline::Code(s) => text.push_str(s),
            Inline::Bold(children) | Inline::Italic(children) | Inline::Strikethrough(children) => {
                text.push_str(&inlines_to_text(children));
            }
            Inline::Link { text: t, .. } => text.push_str(&inlines_to_text(t)),
        }
    }
    text
}

fn flush(out: &mut Vec<Inline>, buf: &mut String) {
    if !buf.is_empty() {
        out.push(Inline::Text(std::mem::take(buf)));
    }
}

fn span_at(s: &str, prev: Option<char>) -> Option<(Inline, &str)> {
    if let Some(body) = s.strip_prefix('`') {
        let end = body.find('`')?;
        return Some((Inline::Code(body[..end].to_string()), &body[end + 1..]));
    }

    if let Some(body) = s.strip_prefix('[') {
        let close = body.find("](")?;
        let target = &body[close + 2..];
        let end = target.find(')')?;
        return Some((
            Inline::Link {
                text: parse(&body[..close]),
                url: target[..end].trim().to_string(),
            },
            &target[end + 1..],
        ));
    }

    // `_` inside a word (snake_case) is not emphasis.
    if s.starts_with('_') && !s.starts_with("__") && prev.is_some_and(char::is_alphanumeric) {
        return None;
    }
    if let Some(body) = s.strip_prefix('_').filter(|_| !s.starts_with("__")) {
        return emphasis(body, "_", Inline::Italic);
    }

    PAIRED.iter().find_map(|&(delim, wrap)| {
        let body = s.strip_prefix(delim)?;
        emphasis(body, delim, wrap)
    })
}

fn emphasis<'a>(body: &'a str, delim: &str, wrap: Wrap) -> Option<(Inline, &'a str)> {
    if body.starts_with(char::is_whitespace) {
        return None;
    }
    let end = body.find(delim).filter(|&end| end > 0)?;
    Some((wrap(parse(&body[..end])), &body[end + delim.len()..]))
}
