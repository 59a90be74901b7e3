//! Anchor markup generation
//!
//! Builds self-revealing `<a>` tags. The reveal logic ships inside the tag as
//! an inline `onclick` handler, so the generated markup works standalone in
//! any page with no script dependencies.

use crate::codec::{Codec, EncodeError};

/// Address used when the caller leaves the email field blank
pub const DEFAULT_EMAIL: &str = "you@gmail.com";
/// Link text used when the caller leaves the label blank
pub const DEFAULT_LABEL: &str = "Contact";

// Inline handler for encrypted links. Mirrors Codec::decode exactly: base
// from the first and last characters, payload parsed two characters at a
// time, then navigate. Changing the token format means changing both sides.
const DECODE_HANDLER_OPEN: &str = concat!(
    "(function(s){",
    "var b=s.slice(0,1)+\"\"+s.slice(-1);",
    "s=s.slice(1,-1);",
    "var o=\"\";",
    "for(var i=0;i<s.length;i+=2)",
    "o+=String.fromCharCode(parseInt(s.substr(i,2),b).toString(10));",
    "document.location.href=o;",
    "})(\"",
);
const DECODE_HANDLER_CLOSE: &str = "\")";

// Inline handler for plain links. Reassembles the URL from the anchor's own
// data attributes at click time, so the tag stays hand-editable. The scheme
// is built from split fragments to keep the literal out of the markup, and
// the attribute name is chopped past the 5-character "data-" prefix.
const ASSEMBLE_HANDLER: &str = concat!(
    "(function(e){var d={};var a=e.attributes;for(var i=a.length;i--;){var b=a[i].name;",
    r#"d[b.substr(5)]=a[i].value.replace(/\\n/g,"%0D%0A");"#,
    "}a=\"ma\"+\"il\"+\"to\"+\":\"+d.u+\"@\"+d.d",
    "+(d.s?\"?subject=\"+d.s:\"\")",
    "+(d.b?(d.s?\"&\":\"?\")+\"body=\"+d.b:\"\");",
    "document.location.href=a;})(this);",
);

/// Input fields for one link build
#[derive(Debug, Clone, Default)]
pub struct LinkConfig {
    /// Target address; blank falls back to the builder's default policy
    pub email: String,
    /// Optional subject line
    pub subject: String,
    /// Optional message body
    pub message: String,
    /// Visible link text; blank falls back to [`DEFAULT_LABEL`]
    pub label: String,
    /// Encode the whole mailto URL into a token instead of data attributes
    pub encrypt: bool,
}

/// Error type for link building
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Email is blank and the builder has no default address
    MissingEmail,
    /// Plain mode needs a user@domain address to split
    InvalidEmail { email: String },
    /// Token encoding failed in encrypted mode
    Encode(EncodeError),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::MissingEmail => {
                write!(f, "No email address given and no default configured")
            }
            BuildError::InvalidEmail { email } => {
                write!(f, "Email '{}' has no '@' to split on", email)
            }
            BuildError::Encode(err) => {
                write!(f, "Failed to encode mailto URL: {}", err)
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EncodeError> for BuildError {
    fn from(err: EncodeError) -> Self {
        BuildError::Encode(err)
    }
}

/// Builds reveal-on-click anchor markup from [`LinkConfig`] fields
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    codec: Codec,
    default_email: Option<String>,
}

impl LinkBuilder {
    /// Create a builder with a random-base codec and the stock default address
    pub fn new() -> Self {
        Self {
            codec: Codec::new(),
            default_email: Some(DEFAULT_EMAIL.to_string()),
        }
    }

    /// Replace the codec (e.g. one with a pinned base)
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Replace the fallback address used for blank email fields
    pub fn with_default_email(mut self, email: impl Into<String>) -> Self {
        self.default_email = Some(email.into());
        self
    }

    /// Make blank email fields an error instead of falling back
    pub fn without_default_email(mut self) -> Self {
        self.default_email = None;
        self
    }

    /// Build the anchor markup for one link.
    ///
    /// Subject, message, and label pass through [`clean_text`] once here;
    /// the branches below use the cleaned values as-is.
    pub fn build(&self, config: &LinkConfig) -> Result<String, BuildError> {
        let email = if config.email.trim().is_empty() {
            match &self.default_email {
                Some(fallback) => fallback.clone(),
                None => return Err(BuildError::MissingEmail),
            }
        } else {
            config.email.clone()
        };
        let subject = clean_text(&config.subject);
        let message = clean_text(&config.message);
        let label = if config.label.trim().is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            clean_text(&config.label)
        };

        let mut out = String::new();
        out.push_str("<a href=\"#\"");
        out.push_str(" title=\"");
        out.push_str(&label);
        out.push('"');

        if config.encrypt {
            let url = format!("mailto:{}?subject={}&body={}", email, subject, message);
            let token = self.codec.encode(&url)?;

            out.push_str(" onclick='");
            out.push_str(DECODE_HANDLER_OPEN);
            out.push_str(&token);
            out.push_str(DECODE_HANDLER_CLOSE);
            out.push('\'');
        } else {
            let (user, domain) = email
                .split_once('@')
                .ok_or_else(|| BuildError::InvalidEmail {
                    email: email.clone(),
                })?;

            out.push_str(&format!(" data-u=\"{}\"", user));
            out.push_str(&format!(" data-d=\"{}\"", domain));
            out.push_str(&format!(" data-s=\"{}\"", subject));
            out.push_str(&format!(" data-b=\"{}\"", message));
            out.push_str(" onclick='");
            out.push_str(ASSEMBLE_HANDLER);
            out.push('\'');
        }

        out.push('>');
        out.push_str(&label);
        out.push_str("</a>");

        Ok(out)
    }
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape quotes and normalize line endings for mailto fields.
///
/// Single and double quotes get a backslash; `\r\n`, `\r`, and `\n` all
/// become the quoted-printable CRLF `%0D%0A` that mailto bodies expect.
/// Quote escaping runs first so the inserted `%0D%0A` text is never
/// re-escaped.
pub fn clean_text(text: &str) -> String {
    text.replace('\'', "\\'")
        .replace('"', "\\\"")
        .replace("\r\n", "%0D%0A")
        .replace('\r', "%0D%0A")
        .replace('\n', "%0D%0A")
}

/// Wrap anchor markup in a minimal standalone HTML document
pub fn render_page(markup: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Contact link</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        markup
    )
}
