//! Route pattern compilation and reverse generation
//!
//! Supported syntax is the subset of Python-style regular expressions that
//! route declarations actually use: optional `^`/`$` anchors, literal text
//! (with `\x` escapes and bare `.`), and named groups `(?P<name>subpattern)`.
//! Quantifiers on a literal character generate their minimum count: `?` and
//! `*` drop the character, `+` keeps one, `{n,m}` repeats it `n` times, so
//! `^a/(?P<id>\d+)/?$` generates `a/1`. Anything else that would make
//! reverse generation ambiguous outside a named group (unnamed groups,
//! alternation, character classes, quantified groups) is rejected when the
//! pattern is compiled.

use crate::errors::*;
use permalink::{GenerationError, ParameterValueMap};
use regex::Regex;

/// A piece of a compiled pattern
#[derive(Debug, Clone)]
pub enum Segment {
    /// Text emitted verbatim
    Literal(String),
    /// Named parameter; generated values must fully match `constraint`
    Parameter { name: String, constraint: Regex },
}

/// Route pattern ready for reverse generation
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    segments: Vec<Segment>,
    parameters: Vec<String>,
}

impl CompiledPattern {
    /// Compile a route pattern
    pub fn parse(source: &str) -> Result<Self> {
        Parser::new(source).run()
    }

    /// The pattern as declared
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parameter names in pattern order
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Human-readable shape, e.g. `read-article/{id}_{slug}.html`
    pub fn template(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Parameter { name, .. } => format!("{{{name}}}"),
            })
            .collect()
    }

    /// Substitute `values` into the pattern.
    ///
    /// The value map must cover exactly the declared parameters and every
    /// value must satisfy its group's subpattern.
    pub fn reverse(
        &self,
        prefix: &str,
        values: &ParameterValueMap,
    ) -> std::result::Result<String, GenerationError> {
        let mismatch = || GenerationError::ParameterMismatch {
            expected: self.parameters.clone(),
            provided: values.keys().cloned().collect(),
        };

        if values.len() != self.parameters.len()
            || !self.parameters.iter().all(|p| values.contains_key(p))
        {
            return Err(mismatch());
        }

        let mut address = String::from(prefix);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => address.push_str(text),
                Segment::Parameter { name, constraint } => {
                    let value = values.get(name).ok_or_else(mismatch)?;
                    if !constraint.is_match(value) {
                        return Err(GenerationError::ConstraintViolation {
                            parameter: name.clone(),
                            value: value.clone(),
                        });
                    }
                    address.push_str(value);
                }
            }
        }
        Ok(address)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
    end: usize,
    /// Previous token was a quantifier; a following `?` is a lazy modifier
    after_quantifier: bool,
    literal: String,
    segments: Vec<Segment>,
    parameters: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let pos = usize::from(chars.first() == Some(&'^'));
        let mut end = chars.len();
        if end > pos && chars[end - 1] == '$' && !is_escaped(&chars, end - 1) {
            end -= 1;
        }
        Self {
            source,
            chars,
            pos,
            end,
            after_quantifier: false,
            literal: String::new(),
            segments: Vec::new(),
            parameters: Vec::new(),
        }
    }

    fn run(mut self) -> Result<CompiledPattern> {
        while self.pos < self.end {
            let c = self.chars[self.pos];
            if !matches!(c, '?' | '*' | '+' | '{') {
                self.after_quantifier = false;
            }
            match c {
                '\\' => {
                    if self.pos + 1 >= self.end {
                        return Err(self.invalid("dangling escape at end of pattern"));
                    }
                    let escaped = self.chars[self.pos + 1];
                    if escaped.is_ascii_alphanumeric() {
                        return Err(self.invalid(format!(
                            "escape '\\{escaped}' is only allowed inside a named group"
                        )));
                    }
                    self.literal.push(escaped);
                    self.pos += 2;
                }
                '(' => self.named_group()?,
                '?' | '*' | '+' | '{' => self.quantifier(c)?,
                '^' | '$' | '|' | '[' | ')' => {
                    return Err(self.invalid(format!(
                        "'{c}' is only allowed inside a named group"
                    )));
                }
                _ => {
                    self.literal.push(c);
                    self.pos += 1;
                }
            }
        }
        self.flush_literal();

        Ok(CompiledPattern {
            source: self.source.to_string(),
            segments: self.segments,
            parameters: self.parameters,
        })
    }

    fn quantifier(&mut self, c: char) -> Result<()> {
        if self.after_quantifier {
            if c == '?' {
                self.after_quantifier = false;
                self.pos += 1;
                return Ok(());
            }
            return Err(self.invalid(format!("'{c}' cannot follow another quantifier")));
        }
        let Some(last) = self.literal.pop() else {
            return Err(self.invalid(format!("'{c}' must follow a literal character")));
        };

        let count = match c {
            '?' | '*' => {
                self.pos += 1;
                0
            }
            '+' => {
                self.pos += 1;
                1
            }
            _ => self.repetition()?,
        };
        for _ in 0..count {
            self.literal.push(last);
        }
        self.after_quantifier = true;
        Ok(())
    }

    /// `{n}`, `{n,}`, `{n,m}` or `{,m}`; yields the minimum
    fn repetition(&mut self) -> Result<usize> {
        let start = self.pos + 1;
        let mut close = start;
        while close < self.end && self.chars[close] != '}' {
            close += 1;
        }
        if close >= self.end {
            return Err(self.invalid("unterminated repetition"));
        }
        let body: String = self.chars[start..close].iter().collect();
        let min = body.split(',').next().unwrap_or_default().trim();
        let count = if min.is_empty() {
            0
        } else {
            min.parse::<usize>()
                .map_err(|_| self.invalid(format!("invalid repetition '{{{body}}}'")))?
        };
        self.pos = close + 1;
        Ok(count)
    }

    fn named_group(&mut self) -> Result<()> {
        if !self.lookahead("(?P<") {
            return Err(self.invalid("only named groups of the form (?P<name>...) are supported"));
        }
        self.pos += 4;

        let name_start = self.pos;
        while self.pos < self.end && self.chars[self.pos] != '>' {
            self.pos += 1;
        }
        if self.pos >= self.end {
            return Err(self.invalid("unterminated group name"));
        }
        let name: String = self.chars[name_start..self.pos].iter().collect();
        if !is_identifier(&name) {
            return Err(self.invalid(format!("invalid parameter name '{name}'")));
        }
        self.pos += 1;

        let body_start = self.pos;
        let mut depth = 1usize;
        let mut in_class = false;
        while self.pos < self.end {
            match self.chars[self.pos] {
                '\\' => {
                    self.pos += 2;
                    continue;
                }
                '[' if !in_class => {
                    in_class = true;
                    self.pos += 1;
                    // `[^]...]` and `[]...]` keep the leading bracket literal
                    if self.chars.get(self.pos) == Some(&'^') {
                        self.pos += 1;
                    }
                    if self.chars.get(self.pos) == Some(&']') {
                        self.pos += 1;
                    }
                    continue;
                }
                ']' if in_class => in_class = false,
                '(' if !in_class => depth += 1,
                ')' if !in_class => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
        if depth != 0 {
            return Err(self.invalid(format!("unterminated group for parameter '{name}'")));
        }

        let body: String = self.chars[body_start..self.pos].iter().collect();
        self.pos += 1;

        if self.parameters.contains(&name) {
            return Err(RegistryError::DuplicateParameter {
                pattern: self.source.to_string(),
                parameter: name,
            });
        }
        let constraint = Regex::new(&format!("^(?:{body})$"))
            .map_err(|e| self.invalid(format!("parameter '{name}': {e}")))?;

        self.flush_literal();
        self.parameters.push(name.clone());
        self.segments.push(Segment::Parameter { name, constraint });
        Ok(())
    }

    fn lookahead(&self, expected: &str) -> bool {
        let mut pos = self.pos;
        for c in expected.chars() {
            if pos >= self.end || self.chars[pos] != c {
                return false;
            }
            pos += 1;
        }
        true
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.segments.push(Segment::Literal(text));
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> RegistryError {
        RegistryError::InvalidPattern {
            pattern: self.source.to_string(),
            reason: reason.into(),
        }
    }
}

fn is_escaped(chars: &[char], index: usize) -> bool {
    let backslashes = chars[..index].iter().rev().take_while(|&&c| c == '\\').count();
    backslashes % 2 == 1
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ARTICLE: &str = r"^read-article/(?P<id>\d+)_(?P<slug>[-\w]+).html$";

    fn values(pairs: &[(&str, &str)]) -> ParameterValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_article_pattern() {
        let pattern = CompiledPattern::parse(ARTICLE).unwrap();

        assert_eq!(pattern.parameters(), &["id".to_string(), "slug".to_string()]);
        assert_eq!(pattern.template(), "read-article/{id}_{slug}.html");
        assert_eq!(pattern.source(), ARTICLE);
        assert_eq!(pattern.segments().len(), 5);
    }

    #[test]
    fn test_reverse_article_pattern() {
        let pattern = CompiledPattern::parse(ARTICLE).unwrap();
        let address = pattern
            .reverse("", &values(&[("id", "1"), ("slug", "example-article")]))
            .unwrap();
        assert_eq!(address, "read-article/1_example-article.html");
    }

    #[test]
    fn test_reverse_applies_prefix() {
        let pattern = CompiledPattern::parse(ARTICLE).unwrap();
        let address = pattern
            .reverse("/", &values(&[("id", "1"), ("slug", "a")]))
            .unwrap();
        assert_eq!(address, "/read-article/1_a.html");
    }

    #[test]
    fn test_reverse_rejects_constraint_violation() {
        let pattern = CompiledPattern::parse(ARTICLE).unwrap();
        let err = pattern
            .reverse("", &values(&[("id", "one"), ("slug", "a")]))
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::ConstraintViolation {
                parameter: "id".to_string(),
                value: "one".to_string(),
            }
        );
    }

    #[test]
    fn test_constraint_must_match_whole_value() {
        let pattern = CompiledPattern::parse(ARTICLE).unwrap();
        let err = pattern
            .reverse("", &values(&[("id", "12/34"), ("slug", "a")]))
            .unwrap_err();
        assert!(matches!(err, GenerationError::ConstraintViolation { .. }));
    }

    #[test]
    fn test_reverse_rejects_extra_or_missing_values() {
        let pattern = CompiledPattern::parse(ARTICLE).unwrap();

        let extra = values(&[("id", "1"), ("slug", "a"), ("category", "news")]);
        assert!(matches!(
            pattern.reverse("", &extra),
            Err(GenerationError::ParameterMismatch { .. })
        ));

        let missing = values(&[("id", "1")]);
        assert!(matches!(
            pattern.reverse("", &missing),
            Err(GenerationError::ParameterMismatch { .. })
        ));
    }

    #[test]
    fn test_escapes_and_anchors() {
        let pattern = CompiledPattern::parse(r"^feeds\/(?P<slug>\w+)\.xml$").unwrap();
        assert_eq!(pattern.template(), "feeds/{slug}.xml");

        let literal_dollar = CompiledPattern::parse(r"price\$").unwrap();
        assert_eq!(literal_dollar.template(), "price$");
    }

    #[test]
    fn test_nested_groups_inside_parameter() {
        let pattern = CompiledPattern::parse(r"^archive/(?P<month>(\d{4})-(\d{2}))/$").unwrap();
        assert_eq!(pattern.parameters(), &["month".to_string()]);
        assert_eq!(
            pattern.reverse("", &values(&[("month", "2009-06")])).unwrap(),
            "archive/2009-06/"
        );
    }

    #[test]
    fn test_parentheses_in_character_class() {
        let pattern = CompiledPattern::parse(r"^tags/(?P<tag>[()\w]+)/$").unwrap();
        assert_eq!(
            pattern.reverse("", &values(&[("tag", "c(s)"),])).unwrap(),
            "tags/c(s)/"
        );
    }

    #[test]
    fn test_optional_trailing_slash() {
        let pattern = CompiledPattern::parse(r"^a/(?P<id>\d+)/?$").unwrap();
        assert_eq!(pattern.template(), "a/{id}");
        assert_eq!(pattern.reverse("", &values(&[("id", "1")])).unwrap(), "a/1");
    }

    #[test]
    fn test_literal_quantifiers_use_minimum() {
        let cases = [
            (r"^colou?r/$", "color/"),
            (r"^index\.html?$", "index.htm"),
            (r"^a+b*/$", "a/"),
            (r"^x{3}/$", "xxx/"),
            (r"^x{2,5}y{,4}/$", "xx/"),
            (r"^a/*?b$", "ab"),
        ];
        for (source, template) in cases {
            let pattern = CompiledPattern::parse(source).unwrap();
            assert_eq!(pattern.template(), template, "template of {source}");
        }
    }

    #[test]
    fn test_pattern_without_parameters() {
        let pattern = CompiledPattern::parse("^about/$").unwrap();
        assert!(pattern.parameters().is_empty());
        assert_eq!(pattern.reverse("", &ParameterValueMap::new()).unwrap(), "about/");
    }

    #[test]
    fn test_rejects_unsupported_syntax() {
        for source in [
            r"^articles/(\d+)/$",
            r"^articles/(?:\d+)/$",
            r"^articles/\d+/$",
            r"^(a|b)/$",
            r"^(?P<id>\d+)?/$",
            r"^?a/$",
            r"^a/*+$",
            r"^a{2/$",
            r"^a{x}/$",
            r"^list/[a-z]/$",
            r"^articles/(?P<id>\d+/$",
            r"^articles/(?P<1id>\d+)/$",
            r"^articles/(?P<id>a{2,1})/$",
            r"^articles\",
        ] {
            assert!(
                matches!(
                    CompiledPattern::parse(source),
                    Err(RegistryError::InvalidPattern { .. })
                ),
                "expected {source} to be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_duplicate_parameters() {
        let err = CompiledPattern::parse(r"^(?P<id>\d+)/(?P<id>\d+)/$").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateParameter { ref parameter, .. } if parameter == "id"
        ));
    }

    proptest! {
        #[test]
        fn prop_reverse_substitutes_valid_values(id in 0u32..1_000_000, slug in "[a-z0-9-]{1,24}") {
            let pattern = CompiledPattern::parse(ARTICLE).unwrap();
            let id = id.to_string();
            let address = pattern
                .reverse("", &values(&[("id", id.as_str()), ("slug", slug.as_str())]))
                .unwrap();
            prop_assert_eq!(address, format!("read-article/{id}_{slug}.html"));
        }
    }
}
