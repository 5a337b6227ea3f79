//! Text format checks.

use super::{on_text, Check};
use crate::error::CheckError;
use crate::message::MessageArg;
use crate::value::Value;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::OnceLock;

// Pre-compiled regex patterns
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static MARKUP_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static HTML_ENTITY_REGEX: OnceLock<Regex> = OnceLock::new();
static XSS_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(
            r"^[\w!#$%&'*+/=?^_`{|}~-]+(?:\.[\w!#$%&'*+/=?^_`{|}~-]+)*@(?:[\w](?:[\w-]*[\w])?\.)+[a-zA-Z0-9](?:[\w-]*[\w])?$",
        )
        .unwrap()
    })
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        Regex::new(
            r"^((((https?|ftps?|gopher|telnet|nntp)://)|(mailto:|news:))(%[0-9A-Fa-f]{2}|[-()_.!~*';/?:@&=+$,A-Za-z0-9])+)([).!';/?:,][[:blank:]])?$",
        )
        .unwrap()
    })
}

fn markup_tag_regex() -> &'static Regex {
    MARKUP_TAG_REGEX.get_or_init(|| Regex::new(r"<[A-Za-z/!?][^>]*>").unwrap())
}

fn html_entity_regex() -> &'static Regex {
    HTML_ENTITY_REGEX.get_or_init(|| {
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6}|[A-Za-z]{2,8});").unwrap()
    })
}

fn xss_regex() -> &'static Regex {
    XSS_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)<\s*/?\s*(script|iframe|frame|frameset|object|embed|applet|meta|style|link|base|form|svg|img|body)\b|(javascript|vbscript)\s*:|<[^>]*\bon[a-z]+\s*=",
        )
        .unwrap()
    })
}

/// Requires a string to match a pattern in full.
///
/// The pattern is anchored at both ends, so `Match::new("[0-9]+")` rejects
/// `"12a"`. Regex options such as case folding are set with
/// [`Match::with_options`] or carried over from a regex passed to
/// [`Match::from_regex`].
#[derive(Debug, Clone)]
pub struct Match {
    pattern: String,
    regex: Regex,
}

impl Match {
    /// Compile a full-match check from a pattern.
    pub fn new(pattern: impl Into<String>) -> Result<Self, CheckError> {
        Self::with_options(pattern, |builder| builder)
    }

    /// Compile a full-match check, letting `configure` set regex options.
    ///
    /// ```rust
    /// use formcheck_validate::check::{Check, Match};
    /// use formcheck_validate::Value;
    ///
    /// let check = Match::with_options("a|ab", |b| b.case_insensitive(true)).unwrap();
    /// assert!(check.is_satisfied(&Value::from("AB")));
    /// ```
    pub fn with_options<F>(pattern: impl Into<String>, configure: F) -> Result<Self, CheckError>
    where
        F: FnOnce(&mut RegexBuilder) -> &mut RegexBuilder,
    {
        let pattern = pattern.into();
        let mut builder = RegexBuilder::new(&format!("^(?:{pattern})$"));
        let regex = configure(&mut builder)
            .build()
            .map_err(|source| CheckError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        Ok(Self { pattern, regex })
    }

    /// Use an already compiled regex as is, flags included.
    ///
    /// The whole string must be covered by the leftmost match. An unanchored
    /// alternation therefore prefers its earlier branches: `a|ab` rejects
    /// `"ab"` here, while [`Match::new`] accepts it.
    pub fn from_regex(regex: &Regex) -> Self {
        Self {
            pattern: regex.as_str().to_string(),
            regex: regex.clone(),
        }
    }

    /// The pattern as written by the caller.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Check for Match {
    fn name(&self) -> &'static str {
        "match"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_text("match", value, |s| {
            self.regex
                .find(s)
                .is_some_and(|m| m.start() == 0 && m.end() == s.len())
        })
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.match", vec![self.pattern.clone().into()])
    }

    fn default_message(&self) -> String {
        format!("Must match {}", self.pattern)
    }
}

/// Requires a string to be an email address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email;

impl Check for Email {
    fn name(&self) -> &'static str {
        "email"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_text("email", value, |s| email_regex().is_match(s))
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.email", Vec::new())
    }

    fn default_message(&self) -> String {
        "Must be a valid email address".to_string()
    }
}

/// Requires a string to be a domain name such as `example.com`.
///
/// At most 253 characters, at least two labels, each label 1..=63 ASCII
/// alphanumerics or hyphens not starting or ending with a hyphen, and an
/// alphabetic top-level label of two or more characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain;

fn is_domain(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }
    let labels: Vec<&str> = s.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    });
    let tld = labels[labels.len() - 1];
    labels_ok && tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic())
}

impl Check for Domain {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_text("domain", value, is_domain)
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.domain", Vec::new())
    }

    fn default_message(&self) -> String {
        "Must be a valid domain address".to_string()
    }
}

/// Requires a string to be a URL (`http`, `https`, `ftp`, `ftps`, `gopher`,
/// `telnet`, `nntp`, `mailto:` or `news:`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url;

const MAX_URL_LEN: usize = 2083;

impl Check for Url {
    fn name(&self) -> &'static str {
        "url"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_text("url", value, |s| s.len() <= MAX_URL_LEN && url_regex().is_match(s))
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.url", Vec::new())
    }

    fn default_message(&self) -> String {
        "Must be a valid URL address".to_string()
    }
}

/// Requires a string to be a hardware address.
///
/// Accepts IEEE 802 MAC-48, EUI-48, EUI-64 and 20-octet IP over InfiniBand
/// addresses, written as colon- or hyphen-separated octets
/// (`00:00:5e:00:53:01`) or dot-separated 16-bit groups (`0000.5e00.5301`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacAddr;

fn hex_groups(s: &str, sep: char, width: usize, counts: &[usize]) -> bool {
    let groups: Vec<&str> = s.split(sep).collect();
    counts.contains(&groups.len())
        && groups
            .iter()
            .all(|g| g.len() == width && g.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn is_mac(s: &str) -> bool {
    let bytes = s.as_bytes();
    match (bytes.get(2), bytes.get(4)) {
        (Some(b':'), _) => hex_groups(s, ':', 2, &[6, 8, 20]),
        (Some(b'-'), _) => hex_groups(s, '-', 2, &[6, 8, 20]),
        (_, Some(b'.')) => hex_groups(s, '.', 4, &[3, 4, 10]),
        _ => false,
    }
}

impl Check for MacAddr {
    fn name(&self) -> &'static str {
        "mac_addr"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_text("mac_addr", value, is_mac)
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.mac_addr", Vec::new())
    }

    fn default_message(&self) -> String {
        "Must be a valid MAC address".to_string()
    }
}

/// Character class enforced by [`PureText`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMode {
    /// Rejects control characters and script-capable markup, after decoding
    /// HTML entities and percent-encoding.
    #[default]
    Normal,
    /// Rejects control characters, invisible formatting characters, any
    /// markup tag and any HTML entity.
    Strict,
}

/// Requires a string to be plain text.
///
/// Tab, line feed and carriage return are always allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PureText {
    /// Which character class to enforce
    pub mode: TextMode,
}

impl PureText {
    /// Create a pure text check.
    pub fn new(mode: TextMode) -> Self {
        Self { mode }
    }
}

fn is_disallowed_control(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r')
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
    )
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        _ => {
            let numeric = entity.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn unescape_html(s: &str) -> Cow<'_, str> {
    html_entity_regex().replace_all(s, |caps: &regex::Captures<'_>| {
        decode_entity(&caps[1]).map_or_else(|| caps[0].to_string(), String::from)
    })
}

fn is_pure_strict(s: &str) -> bool {
    !s.chars().any(|c| is_disallowed_control(c) || is_invisible(c))
        && !markup_tag_regex().is_match(s)
        && !html_entity_regex().is_match(s)
}

fn is_pure_normal(s: &str) -> bool {
    let unescaped = unescape_html(s);
    let decoded = urlencoding::decode(&unescaped).unwrap_or(Cow::Borrowed(&*unescaped));
    !decoded.chars().any(is_disallowed_control) && !xss_regex().is_match(&decoded)
}

impl Check for PureText {
    fn name(&self) -> &'static str {
        "pure_text"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_text("pure_text", value, |s| match self.mode {
            TextMode::Normal => is_pure_normal(s),
            TextMode::Strict => is_pure_strict(s),
        })
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.pure_text", Vec::new())
    }

    fn default_message(&self) -> String {
        "Must be a valid text".to_string()
    }
}

/// What a [`FilePath`] may contain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// A single file name: no separators, never `.` or `..`.
    #[default]
    OnlyFilename,
    /// A relative path: `/`-separated, not absolute, no `..` segment.
    AllowRelativePath,
}

/// Requires a string to be a sanitary file name or relative path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePath {
    /// Whether separators are allowed
    pub mode: PathMode,
}

impl FilePath {
    /// Create a file path check.
    pub fn new(mode: PathMode) -> Self {
        Self { mode }
    }
}

const MAX_FILENAME_LEN: usize = 255;

fn is_sanitary_char(c: char) -> bool {
    !c.is_control() && !matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\\')
}

fn is_filename(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_FILENAME_LEN
        && s != "."
        && s != ".."
        && !s.contains('/')
        && s.chars().all(is_sanitary_char)
}

fn is_relative_path(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('/')
        && s.chars().all(is_sanitary_char)
        && s.split('/').all(|segment| segment != ".." && segment.len() <= MAX_FILENAME_LEN)
}

impl Check for FilePath {
    fn name(&self) -> &'static str {
        "file_path"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_text("file_path", value, |s| match self.mode {
            PathMode::OnlyFilename => is_filename(s),
            PathMode::AllowRelativePath => is_relative_path(s),
        })
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.file_path", Vec::new())
    }

    fn default_message(&self) -> String {
        "Must be a sanitary file path".to_string()
    }
}
