//! Directive scanner: splits a template into literal text and `%s` / `%p` directives.
//!
//! The scan runs once per template; rendering and parameter flattening both
//! walk the resulting segments, so they always agree on which argument each
//! directive consumes.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `%s`: splice the argument's text (or rendered fragment) inline.
    Inline,
    /// `%p`: emit one placeholder and bind the argument.
    Placeholder,
}

impl DirectiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "%s",
            Self::Placeholder => "%p",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text as a byte range of the template.
    Text(Range<usize>),
    /// A directive consuming argument `arg`; `offset` is the byte offset of its `%`.
    Directive {
        kind: DirectiveKind,
        arg: usize,
        offset: usize,
    },
}

/// Scan `template` left to right.
///
/// Only `%%`, `%s` and `%p` are directives. A `%` followed by anything else is
/// kept as literal text together with the following byte.
pub fn scan(template: &str) -> Vec<Segment> {
    let bytes = template.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0usize;
    let mut pending = false;
    let mut next_arg = 0usize;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'%' if pending => {
                push_text(&mut segments, start..i - 1);
                push_text(&mut segments, i..i + 1);
                start = i + 1;
                pending = false;
            }
            b'%' => pending = true,
            b's' | b'p' if pending => {
                let kind = if b == b's' {
                    DirectiveKind::Inline
                } else {
                    DirectiveKind::Placeholder
                };
                push_text(&mut segments, start..i - 1);
                segments.push(Segment::Directive {
                    kind,
                    arg: next_arg,
                    offset: i - 1,
                });
                next_arg += 1;
                start = i + 1;
                pending = false;
            }
            _ => pending = false,
        }
    }
    push_text(&mut segments, start..bytes.len());
    segments
}

/// Number of arguments the segments consume.
pub fn directive_count(segments: &[Segment]) -> usize {
    segments
        .iter()
        .filter(|s| matches!(s, Segment::Directive { .. }))
        .count()
}

fn push_text(segments: &mut Vec<Segment>, range: Range<usize>) {
    if range.is_empty() {
        return;
    }
    if let Some(Segment::Text(last)) = segments.last_mut()
        && last.end == range.start
    {
        last.end = range.end;
        return;
    }
    segments.push(Segment::Text(range));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts<'a>(template: &'a str, segments: &[Segment]) -> Vec<&'a str> {
        segments
            .iter()
            .map(|s| match s {
                Segment::Text(r) => &template[r.clone()],
                Segment::Directive { kind, .. } => kind.as_str(),
            })
            .collect()
    }

    #[test]
    fn plain_text_is_one_segment() {
        let t = "SELECT 1";
        assert_eq!(scan(t), vec![Segment::Text(0..8)]);
        assert_eq!(scan(""), Vec::<Segment>::new());
    }

    #[test]
    fn directives_consume_in_order() {
        let t = "a = %p AND %s LIMIT %p";
        let segs = scan(t);
        assert_eq!(texts(t, &segs), vec!["a = ", "%p", " AND ", "%s", " LIMIT ", "%p"]);
        let args: Vec<usize> = segs
            .iter()
            .filter_map(|s| match s {
                Segment::Directive { arg, .. } => Some(*arg),
                _ => None,
            })
            .collect();
        assert_eq!(args, vec![0, 1, 2]);
        assert_eq!(directive_count(&segs), 3);
    }

    #[test]
    fn double_percent_is_literal() {
        let t = "100%% done";
        let segs = scan(t);
        assert_eq!(texts(t, &segs), vec!["100", "% done"]);
        assert_eq!(directive_count(&segs), 0);
    }

    #[test]
    fn escaped_directives_stay_literal() {
        let t = "SELECT *, %%s, %%p, %, %% FROM t WHERE a = %p";
        let segs = scan(t);
        let rendered: String = texts(t, &segs).concat();
        assert_eq!(rendered, "SELECT *, %s, %p, %, % FROM t WHERE a = %p");
        assert_eq!(directive_count(&segs), 1);
    }

    #[test]
    fn unknown_directive_degrades_to_text() {
        let t = "%d %x %";
        let segs = scan(t);
        assert_eq!(texts(t, &segs), vec!["%d %x %"]);
        assert_eq!(directive_count(&segs), 0);
    }

    #[test]
    fn percent_run_before_directive() {
        let t = "%%%s";
        let segs = scan(t);
        assert_eq!(texts(t, &segs), vec!["%", "%s"]);
        assert_eq!(
            segs[1],
            Segment::Directive {
                kind: DirectiveKind::Inline,
                arg: 0,
                offset: 2
            }
        );
    }

    #[test]
    fn letters_without_percent_are_text() {
        let t = "sp %ps";
        let segs = scan(t);
        assert_eq!(texts(t, &segs), vec!["sp ", "%p", "s"]);
    }

    #[test]
    fn multibyte_text_is_preserved() {
        let t = "naïve = %p ok";
        let segs = scan(t);
        assert_eq!(texts(t, &segs), vec!["naïve = ", "%p", " ok"]);
    }
}
