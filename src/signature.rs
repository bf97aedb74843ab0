use alloc::{
    borrow::Cow,
    string::{String, ToString as _},
    vec::Vec,
};
use tracing::{debug, error};

use crate::errors::SignatureErrorKind;

/// Where the dependency names of a factory come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyNames {
    /// Source text of the factory signature, parsed at registration.
    Source(Cow<'static, str>),
    /// Names given up front, used verbatim instead of parsing.
    Explicit(Vec<String>),
}

impl DependencyNames {
    /// Derives the ordered dependency names.
    ///
    /// # Errors
    /// Returns [`SignatureErrorKind`] if the source text has no parsable parameter list.
    pub fn extract(&self) -> Result<Vec<String>, SignatureErrorKind> {
        match self {
            Self::Source(signature) => extract_parameter_names::<&str>(signature, None),
            Self::Explicit(names) => extract_parameter_names("", Some(names.as_slice())),
        }
    }
}

/// Returns the ordered parameter names of a factory signature.
///
/// If `explicit_names` is passed, the names are returned trimmed and `signature` isn't looked at.
/// Otherwise the parameter list of `signature` is parsed:
/// - closures (`|a, b| ...`, `move |a| ...`) use the text between the pipes;
/// - anything else uses the first parenthesized list (`fn make(a, b) -> T`, `(a, b) => ...`).
///
/// Comments are stripped, type ascriptions and `mut`/`ref`/`&` are dropped, and tuple struct patterns
/// like `Inject(config)` yield their inner binding. Empty parameters are skipped.
///
/// # Errors
/// - Returns [`SignatureErrorKind::NoParameterList`] if the signature has no parameter list
/// - Returns [`SignatureErrorKind::Unbalanced`] if delimiters of the parameter list don't match
/// - Returns [`SignatureErrorKind::UnsupportedPattern`] if a parameter doesn't bind exactly one name
pub fn extract_parameter_names<S: AsRef<str>>(signature: &str, explicit_names: Option<&[S]>) -> Result<Vec<String>, SignatureErrorKind> {
    if let Some(names) = explicit_names {
        return Ok(names.iter().map(|name| name.as_ref().trim().to_string()).collect());
    }

    match parse_parameter_names(signature) {
        Ok(names) => {
            debug!(?names, "Parameter names extracted");
            Ok(names)
        }
        Err(err) => {
            error!("{}", err);
            Err(err)
        }
    }
}

fn parse_parameter_names(signature: &str) -> Result<Vec<String>, SignatureErrorKind> {
    let stripped = strip_comments(signature);
    let list = parameter_list(&stripped)?;
    let parts = split_top_level(list).ok_or_else(|| SignatureErrorKind::Unbalanced {
        signature: signature.to_string(),
    })?;

    let mut names = Vec::with_capacity(parts.len());
    for part in parts {
        if let Some(name) = binding_name(part)? {
            names.push(name);
        }
    }

    Ok(names)
}

/// Replaces `//` and (possibly nested) `/* */` comments with a single space.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match (ch, chars.peek().copied()) {
            ('/', Some('/')) => {
                for ch in chars.by_ref() {
                    if ch == '\n' {
                        break;
                    }
                }
                out.push(' ');
            }
            ('/', Some('*')) => {
                chars.next();
                let mut depth = 1usize;
                while depth > 0 {
                    match (chars.next(), chars.peek().copied()) {
                        (Some('/'), Some('*')) => {
                            chars.next();
                            depth += 1;
                        }
                        (Some('*'), Some('/')) => {
                            chars.next();
                            depth -= 1;
                        }
                        (Some(_), _) => {}
                        (None, _) => break,
                    }
                }
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }

    out
}

fn parameter_list(text: &str) -> Result<&str, SignatureErrorKind> {
    let trimmed = text.trim_start();
    let rest = strip_keyword(strip_keyword(trimmed, "async"), "move");

    if rest.starts_with("||") {
        return Ok("");
    }
    if let Some(body) = rest.strip_prefix('|') {
        let mut depth = 0usize;
        let mut prev = None;
        for (index, ch) in body.char_indices() {
            match ch {
                '(' | '[' | '{' | '<' => depth += 1,
                '>' if matches!(prev, Some('-' | '=')) => {}
                ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
                '|' if depth == 0 => return Ok(&body[..index]),
                _ => {}
            }
            prev = Some(ch);
        }
        return Err(SignatureErrorKind::Unbalanced {
            signature: text.trim().to_string(),
        });
    }

    let Some(open) = first_paren_outside_generics(rest) else {
        return Err(SignatureErrorKind::NoParameterList {
            signature: text.trim().to_string(),
        });
    };
    let body = &rest[open + 1..];
    let mut depth = 0usize;
    for (index, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return Ok(&body[..index]),
            ')' => depth -= 1,
            _ => {}
        }
    }

    Err(SignatureErrorKind::Unbalanced {
        signature: text.trim().to_string(),
    })
}

/// Byte index of the first `(` that isn't inside a `<...>` generic list, so `fn make<F: Fn(u8)>(f)` finds `(f)`.
fn first_paren_outside_generics(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut prev = None;

    for (index, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' if matches!(prev, Some('-' | '=')) => {}
            '>' => depth = depth.saturating_sub(1),
            '(' if depth == 0 => return Some(index),
            _ => {}
        }
        prev = Some(ch);
    }

    None
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> &'a str {
    match text.strip_prefix(keyword) {
        Some(rest) if rest.starts_with(|ch: char| ch.is_whitespace() || ch == '|') => rest.trim_start(),
        _ => text,
    }
}

/// Splits on commas that aren't nested in brackets. `None` if brackets don't match.
fn split_top_level(list: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut prev = None;

    for (index, ch) in list.char_indices() {
        match ch {
            '(' | '[' | '{' | '<' => depth += 1,
            // `->` and `=>` aren't closing brackets
            '>' if matches!(prev, Some('-' | '=')) => {}
            ')' | ']' | '}' | '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&list[start..index]);
                start = index + 1;
            }
            _ => {}
        }
        prev = Some(ch);
    }
    if depth != 0 {
        return None;
    }
    parts.push(&list[start..]);

    Some(parts)
}

/// Name bound by a single parameter. `None` for an empty slot left by a trailing comma.
///
/// Wildcards and patterns binding several names (`_`, `(a, b)`, `Point { x, y }`) are rejected.
fn binding_name(token: &str) -> Result<Option<String>, SignatureErrorKind> {
    let mut pattern = before_type_ascription(token).trim();

    loop {
        let next = pattern
            .strip_prefix('&')
            .or_else(|| pattern.strip_prefix("mut "))
            .or_else(|| pattern.strip_prefix("ref "))
            .map(str::trim_start);
        match next {
            Some(next) => pattern = next,
            None => break,
        }
    }

    if let (Some(open), true) = (pattern.find('('), pattern.ends_with(')')) {
        return binding_name(&pattern[open + 1..pattern.len() - 1]);
    }

    if pattern.is_empty() {
        return Ok(None);
    }
    if !is_identifier(pattern) {
        return Err(SignatureErrorKind::UnsupportedPattern {
            pattern: token.trim().to_string(),
        });
    }

    Ok(Some(pattern.to_string()))
}

fn is_identifier(text: &str) -> bool {
    let text = text.strip_prefix("r#").unwrap_or(text);
    let mut chars = text.chars();

    match chars.next() {
        Some('_') => !text[1..].is_empty() && chars.all(|ch| ch == '_' || ch.is_alphanumeric()),
        Some(ch) if ch.is_alphabetic() => chars.all(|ch| ch == '_' || ch.is_alphanumeric()),
        _ => false,
    }
}

/// Cuts `name: Type` down to `name`, leaving `::` paths alone.
fn before_type_ascription(token: &str) -> &str {
    let bytes = token.as_bytes();
    let mut depth = 0usize;

    for (index, &byte) in bytes.iter().enumerate() {
        match byte {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => {
                let prev_colon = index > 0 && bytes[index - 1] == b':';
                let next_colon = bytes.get(index + 1) == Some(&b':');
                if !prev_colon && !next_colon {
                    return &token[..index];
                }
            }
            _ => {}
        }
    }

    token
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{extract_parameter_names, DependencyNames};
    use crate::errors::SignatureErrorKind;

    use alloc::{
        borrow::Cow,
        string::{String, ToString as _},
        vec,
        vec::Vec,
    };
    use tracing_test::traced_test;

    fn names(signature: &str) -> Result<Vec<String>, SignatureErrorKind> {
        extract_parameter_names::<&str>(signature, None)
    }

    #[test]
    #[traced_test]
    fn test_function_signature() {
        assert_eq!(names("fn logger(config, clock) -> Logger").unwrap(), ["config", "clock"]);
        assert_eq!(names("function (a, b) { return a + b; }").unwrap(), ["a", "b"]);
        assert_eq!(names("(first, second) => first").unwrap(), ["first", "second"]);
    }

    #[test]
    #[traced_test]
    fn test_closure_signature() {
        assert_eq!(
            names("|Inject(config): Inject<AppConfig>, clock: Value| Ok(Logger::new(config))").unwrap(),
            ["config", "clock"]
        );
        assert_eq!(names("move | mut a : u8 , & b | a").unwrap(), ["a", "b"]);
        assert_eq!(names("|| Ok(Database)").unwrap(), Vec::<String>::new());
    }

    #[test]
    #[traced_test]
    fn test_comments_are_stripped() {
        let signature = "fn make(config /* app config */, // the clock\n clock, /* multi\n line */ db /* a /* nested */ one */)";

        assert_eq!(names(signature).unwrap(), ["config", "clock", "db"]);
        assert_eq!(names("fn make(/* nothing here */)").unwrap(), Vec::<String>::new());
    }

    #[test]
    #[traced_test]
    fn test_trailing_comma_and_nested_generics() {
        assert_eq!(names("fn make(a, b,)").unwrap(), ["a", "b"]);
        assert_eq!(
            names("|map: HashMap<String, Vec<u8>>, f: fn(u8) -> u8, (x): (u8)| map").unwrap(),
            ["map", "f", "x"]
        );
        assert_eq!(names("|path: core::any::TypeId| path").unwrap(), ["path"]);
    }

    #[test]
    #[traced_test]
    fn test_generic_function_signature() {
        assert_eq!(names("fn make<F: Fn(u8) -> u8>(config, f: F) -> Logger").unwrap(), ["config", "f"]);
        assert_eq!(
            names("fn make<'a, T: Into<Cow<'a, str>>, const N: usize>(name: T, sizes: [u8; N])").unwrap(),
            ["name", "sizes"]
        );
    }

    #[test]
    #[traced_test]
    fn test_unsupported_patterns() {
        assert_eq!(
            names("|_: Value| 1"),
            Err(SignatureErrorKind::UnsupportedPattern { pattern: "_".to_string() })
        );
        assert!(matches!(
            names("|(a, b): (u8, u8)| a + b"),
            Err(SignatureErrorKind::UnsupportedPattern { .. })
        ));
        assert!(matches!(
            names("fn make(Point { x, y }: Point)"),
            Err(SignatureErrorKind::UnsupportedPattern { .. })
        ));
        assert_eq!(names("|_config: Value, r#type: Value| 1").unwrap(), ["_config", "r#type"]);
        assert!(logs_contain("list dependency names explicitly"));
    }

    #[test]
    #[traced_test]
    fn test_no_parameter_list() {
        assert_eq!(
            names("not a function"),
            Err(SignatureErrorKind::NoParameterList {
                signature: "not a function".into()
            })
        );
        assert!(matches!(names("fn make(a, b"), Err(SignatureErrorKind::Unbalanced { .. })));
        assert!(matches!(names("|a: Vec<u8| a"), Err(SignatureErrorKind::Unbalanced { .. })));
    }

    #[test]
    #[traced_test]
    fn test_explicit_names() {
        let explicit = [" a ", "b"];

        assert_eq!(extract_parameter_names("this is ignored", Some(&explicit[..])).unwrap(), ["a", "b"]);
        assert_eq!(
            DependencyNames::Explicit(vec![" config".into()]).extract().unwrap(),
            ["config"]
        );
        assert_eq!(
            DependencyNames::Source(Cow::Borrowed("fn make(db)")).extract().unwrap(),
            ["db"]
        );
    }
}
