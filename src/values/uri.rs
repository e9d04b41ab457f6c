//! XSD anyURI values
//!
//! RFC 3986 syntactic validation only: a single left-to-right scan splits
//! the input into scheme, authority, path, query and fragment, each
//! component is validated against its own character class, and the
//! reassembled components must reproduce the accepted input exactly.
//! No resolution against a base URI, no normalization.

use crate::error::{Error, GrammarError, Result};
use std::fmt;

/// An XSD anyURI value with its five RFC 3986 components
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: Option<String>,
    authority: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Uri {
    /// Parse an anyURI lexical form (whitespace-collapsed first).
    ///
    /// Construction verifies that reassembling the parsed components
    /// reproduces the input; a mismatch is an invariant violation and
    /// indicates parser/serializer drift, never a property of the input.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let uri = Self::split(value)?;

        uri.validate()?;

        let reassembled = uri.lexical();
        if reassembled != value {
            return Err(Error::Invariant(format!(
                "URI round-trip mismatch: '{}' reassembled as '{}'",
                value, reassembled
            )));
        }
        Ok(uri)
    }

    /// Scheme component, without the trailing `:`
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Authority component, without the leading `//`
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// Path component; always present, possibly empty
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query component, without the leading `?`
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Fragment component, without the leading `#`
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Reassemble the components into the lexical form
    pub fn lexical(&self) -> String {
        let mut out = String::new();
        if let Some(ref scheme) = self.scheme {
            out.push_str(scheme);
            out.push(':');
        }
        if let Some(ref authority) = self.authority {
            out.push_str("//");
            out.push_str(authority);
        }
        out.push_str(&self.path);
        if let Some(ref query) = self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(ref fragment) = self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }

    /// Split into components in one pass, without backtracking
    fn split(value: &str) -> Result<Self> {
        let (scheme, rest) = match split_scheme(value) {
            Some((scheme, rest)) => (Some(scheme.to_string()), rest),
            None => (None, value),
        };

        let (authority, rest) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after
                    .find(['/', '?', '#'])
                    .unwrap_or(after.len());
                (Some(after[..end].to_string()), &after[end..])
            }
            None => (None, rest),
        };

        let (before_fragment, fragment) = match rest.split_once('#') {
            Some((before, fragment)) => (before, Some(fragment.to_string())),
            None => (rest, None),
        };
        let (path, query) = match before_fragment.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (before_fragment.to_string(), None),
        };

        Ok(Self {
            scheme,
            authority,
            path,
            query,
            fragment,
        })
    }

    fn validate(&self) -> Result<()> {
        if let Some(ref scheme) = self.scheme {
            validate_scheme(scheme)?;
        }
        if let Some(ref authority) = self.authority {
            validate_authority(authority)?;
        }
        validate_path(&self.path)?;
        if let Some(ref query) = self.query {
            validate_component(query, "query")?;
        }
        if let Some(ref fragment) = self.fragment {
            validate_component(fragment, "fragment")?;
        }
        Ok(())
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

// =============================================================================
// Component grammars
// =============================================================================

/// Locate the scheme terminator: a `:` preceded by a valid scheme-char
/// run from position 0, before any `/`, `?` or `#`
fn split_scheme(value: &str) -> Option<(&str, &str)> {
    for (i, c) in value.char_indices() {
        match c {
            ':' => {
                if i == 0 {
                    return None;
                }
                let candidate = &value[..i];
                if is_valid_scheme(candidate) {
                    return Some((candidate, &value[i + 1..]));
                }
                return None;
            }
            '/' | '?' | '#' => return None,
            _ => {}
        }
    }
    None
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

fn is_sub_delim(c: char) -> bool {
    matches!(c, '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=')
}

fn grammar_error(component: &str, detail: impl fmt::Display) -> Error {
    GrammarError::new(format!("invalid URI {}: {}", component, detail)).into()
}

/// Walk a component's characters, accepting percent-encoding triplets and
/// handing every other character to `accept`
fn scan_component(text: &str, component: &str, mut accept: impl FnMut(char) -> bool) -> Result<()> {
    let bytes = text.as_bytes();
    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '%' {
            let valid = bytes.len() >= i + 3
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(grammar_error(component, "incomplete percent-encoding"));
            }
            chars.next();
            chars.next();
        } else if !accept(c) {
            return Err(grammar_error(component, format!("character '{}' not allowed", c)));
        }
    }
    Ok(())
}

fn validate_scheme(scheme: &str) -> Result<()> {
    if !is_valid_scheme(scheme) {
        return Err(grammar_error("scheme", scheme));
    }
    Ok(())
}

/// Authority: at most one `@`; after the user-info the host may open an
/// IPv6 bracket literal, and once a `:` introduces the port region only
/// hex digits, `:` and dots remain valid
fn validate_authority(authority: &str) -> Result<()> {
    if authority.matches('@').count() > 1 {
        return Err(grammar_error("authority", "more than one '@'"));
    }
    let (userinfo, host) = match authority.rsplit_once('@') {
        Some((userinfo, host)) => (Some(userinfo), host),
        None => (None, authority),
    };
    if let Some(userinfo) = userinfo {
        scan_component(userinfo, "authority", |c| {
            is_unreserved(c) || is_sub_delim(c) || c == ':'
        })?;
    }

    let mut in_brackets = false;
    let mut port_region = false;
    scan_component(host, "authority", |c| {
        if in_brackets {
            if c == ']' {
                in_brackets = false;
                return true;
            }
            return c.is_ascii_hexdigit() || c == ':' || c == '.';
        }
        if port_region {
            return c.is_ascii_hexdigit() || c == ':' || c == '.';
        }
        match c {
            '[' => {
                in_brackets = true;
                true
            }
            ':' => {
                port_region = true;
                true
            }
            c => is_unreserved(c) || is_sub_delim(c),
        }
    })?;
    if in_brackets {
        return Err(grammar_error("authority", "unterminated IPv6 literal"));
    }
    Ok(())
}

/// Path characters plus a ban on the empty segments a `//` run produces
fn validate_path(path: &str) -> Result<()> {
    if path.contains("//") {
        return Err(grammar_error("path", "empty segment"));
    }
    scan_component(path, "path", |c| {
        is_unreserved(c) || is_sub_delim(c) || matches!(c, ':' | '@' | '/')
    })
}

/// Query and fragment share the pchar-plus-`/`-plus-`?` class
fn validate_component(text: &str, component: &str) -> Result<()> {
    scan_component(text, component, |c| {
        is_unreserved(c) || is_sub_delim(c) || matches!(c, ':' | '@' | '/' | '?')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_isolation() {
        let uri = Uri::parse("https://a.example/p?q=1#f").unwrap();
        assert_eq!(uri.scheme(), Some("https"));
        assert_eq!(uri.authority(), Some("a.example"));
        assert_eq!(uri.path(), "/p");
        assert_eq!(uri.query(), Some("q=1"));
        assert_eq!(uri.fragment(), Some("f"));
        assert_eq!(uri.lexical(), "https://a.example/p?q=1#f");
    }

    #[test]
    fn test_round_trip() {
        for s in [
            "https://a.example/p?q=1#f",
            "mailto:user@example.com",
            "file:///etc/hosts",
            "relative/path",
            "#fragment",
            "?query",
            "",
            "urn:isbn:0451450523",
            "http://[2001:db8::1]:8080/x",
            "http://user:pw@host.example:443/a/b",
            "a/b%20c",
        ] {
            assert_eq!(Uri::parse(s).unwrap().lexical(), s, "round trip of '{}'", s);
        }
    }

    #[test]
    fn test_rejects_bad_characters() {
        assert!(Uri::parse("a b").is_err());
        assert!(Uri::parse("http://ex ample.com").is_err());
        assert!(Uri::parse("p#f#g").is_err());
        assert!(Uri::parse("a%2").is_err());
        assert!(Uri::parse("a%GG").is_err());
        assert!(Uri::parse("{braces}").is_err());
    }

    #[test]
    fn test_authority_rules() {
        assert!(Uri::parse("http://a@b@c/").is_err());
        assert!(Uri::parse("http://[2001:db8::1/").is_err());
        assert!(Uri::parse("http://host:80x80/").is_err());
        assert!(Uri::parse("http://user:pw@host/").is_ok());
    }

    #[test]
    fn test_path_empty_segments() {
        assert!(Uri::parse("a//b").is_err());
        assert!(Uri::parse("https://host/a//b").is_err());
        assert!(Uri::parse("https://host/a/b").is_ok());
    }

    #[test]
    fn test_scheme_detection() {
        // No valid scheme run before ':' means no scheme at all
        let uri = Uri::parse("1:2").unwrap();
        assert_eq!(uri.scheme(), None);
        assert_eq!(uri.path(), "1:2");

        let uri = Uri::parse("mailto:x").unwrap();
        assert_eq!(uri.scheme(), Some("mailto"));
        assert_eq!(uri.path(), "x");

        // ':' after a '/' is path territory
        let uri = Uri::parse("a/b:c").unwrap();
        assert_eq!(uri.scheme(), None);
    }

    #[test]
    fn test_empty_authority() {
        let uri = Uri::parse("file:///etc/hosts").unwrap();
        assert_eq!(uri.scheme(), Some("file"));
        assert_eq!(uri.authority(), Some(""));
        assert_eq!(uri.path(), "/etc/hosts");
    }

    #[test]
    fn test_whitespace_collapse() {
        let uri = Uri::parse("  https://a.example/  ").unwrap();
        assert_eq!(uri.lexical(), "https://a.example/");
    }
}
