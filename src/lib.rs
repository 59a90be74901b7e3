//! # mailcloak
//!
//! Harvester-resistant mailto link generation.
//!
//! Email addresses dropped into a page as plain text get scraped by bots.
//! This crate builds `<a>` tags whose address only exists after client-side
//! script execution, in one of two flavors:
//!
//! ## Encrypted links
//!
//! The whole `mailto:` URL is encoded into a variable-radix token and
//! decoded by an inline click handler:
//!
//! ```text
//! <a href="#" title="Contact" onclick='(function(s){...})("14...6")'>Contact</a>
//! ```
//!
//! The token carries its own base: the first and last characters are the two
//! decimal digits of a base in [12, 35], and everything between is a run of
//! two-digit radix numerals, one per character of the URL. The base is
//! randomized per encode, so the same address yields a different-looking
//! token on every build.
//!
//! ## Plain links
//!
//! The address is split across `data-*` attributes and reassembled on click:
//!
//! ```text
//! <a href="#" data-u="you" data-d="gmail.com" data-s="" data-b=""
//!    onclick='...'>Contact</a>
//! ```
//!
//! Less opaque than the encrypted form, but the tag stays hand-editable
//! without regenerating it.
//!
//! Neither mode is cryptography. Both only raise the cost of scraping above
//! what a plain-text scanner will pay.
//!
//! ## Example
//!
//! ```
//! use mailcloak::{LinkBuilder, LinkConfig};
//!
//! let builder = LinkBuilder::new();
//! let markup = builder.build(&LinkConfig {
//!     email: "a@b.com".to_string(),
//!     label: "Contact".to_string(),
//!     encrypt: true,
//!     ..Default::default()
//! })?;
//! assert!(markup.starts_with("<a href=\"#\""));
//! # Ok::<(), mailcloak::BuildError>(())
//! ```

pub mod codec;
pub mod link;

pub use codec::{convert, Codec, DecodeError, EncodeError, MAX_BASE, MIN_BASE};
pub use link::{
    clean_text, render_page, BuildError, LinkBuilder, LinkConfig, DEFAULT_EMAIL, DEFAULT_LABEL,
};
