const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unclosed action at byte {0}")]
    UnclosedAction(usize),
    #[error("unsupported action {0:?}")]
    UnsupportedAction(String),
}

/// A parsed page template.
///
/// Supports the two constructs the site's pages use: `{{.}}` inserts the
/// render value (HTML-escaped), and `{{/* ... */}}` comments are dropped.
/// Anything else between action delimiters is a parse error; a stray `}}`
/// with no opening delimiter is literal text.
#[derive(Debug)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug)]
enum Segment {
    Literal(String),
    Value,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, Error> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let after_open = &rest[start + OPEN.len()..];
            let end = match after_open.find(CLOSE) {
                Some(end) => end,
                None => return Err(Error::UnclosedAction(offset + start)),
            };

            match after_open[..end].trim() {
                "." => segments.push(Segment::Value),
                comment
                    if comment.len() >= 4
                        && comment.starts_with("/*")
                        && comment.ends_with("*/") => {}
                other => return Err(Error::UnsupportedAction(other.to_string())),
            }

            let consumed = start + OPEN.len() + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Template { segments })
    }

    pub fn render(&self, value: &str) -> String {
        let escaped = escape(value);
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Value => out.push_str(&escaped),
            }
        }
        out
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_text_passes_through() {
        let template = Template::parse("<h1>hello</h1>").unwrap();
        assert_eq!(template.render("ignored"), "<h1>hello</h1>");
    }

    #[test]
    fn value_is_substituted() {
        let template = Template::parse("<p>{{.}}</p>").unwrap();
        assert_eq!(template.render("score"), "<p>score</p>");
        assert_eq!(template.render(""), "<p></p>");
    }

    #[test]
    fn value_is_escaped() {
        let template = Template::parse("{{ . }}").unwrap();
        assert_eq!(template.render("<b>&\"'"), "&lt;b&gt;&amp;&#34;&#39;");
    }

    #[test]
    fn comments_are_dropped() {
        let template = Template::parse("a{{/* note to self */}}b").unwrap();
        assert_eq!(template.render(""), "ab");
    }

    #[test]
    fn stray_close_is_literal() {
        let template = Template::parse("a }} b").unwrap();
        assert_eq!(template.render(""), "a }} b");
    }

    #[test]
    fn unclosed_action_is_an_error() {
        assert_eq!(
            Template::parse("ok {{ nope").unwrap_err(),
            Error::UnclosedAction(3)
        );
    }

    #[test]
    fn unsupported_action_is_an_error() {
        assert_eq!(
            Template::parse("{{range .Items}}").unwrap_err(),
            Error::UnsupportedAction("range .Items".to_string())
        );
    }
}
