//! # Token Codec
//!
//! Encodes navigation state into the opaque tokens carried by button-tap
//! events, and decodes them back. The wire grammar is `<medium>_medium`,
//! `<medium>_medium_<subject>`, `<medium>_medium_<subject>_<year>`, plus the
//! root marker. Decoding parses by grammar against the fixed vocabularies,
//! never by substring containment: subject codes that themselves contain the
//! `_` delimiter (`sinhala_lit`, `english_lit`) round-trip losslessly because
//! the year suffix is checked first and the remaining tail is matched against
//! the catalog as a whole code.
//!
//! Also home of [`FileKey`], the canonical `(medium, subject, year)` key the
//! repository stores under, and its strict manual upload-tag parser.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::application::catalog::{self, Medium};
use crate::domain::errors::BotError;

/// Token for the root of the menu tree.
pub const ROOT_TOKEN: &str = "menu";

fn year_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^20\d{2}$").expect("year pattern is valid"))
}

/// A decoded path through the catalog tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavPath {
    Root,
    Medium(Medium),
    Subject(Medium, &'static str),
    Paper(Medium, &'static str, String),
}

impl NavPath {
    /// Encode this path to its wire token.
    pub fn encode(&self) -> String {
        match self {
            NavPath::Root => ROOT_TOKEN.to_string(),
            NavPath::Medium(m) => format!("{m}_medium"),
            NavPath::Subject(m, code) => format!("{m}_medium_{code}"),
            NavPath::Paper(m, code, year) => format!("{m}_medium_{code}_{year}"),
        }
    }

    /// Decode a wire token back into the exact path that was encoded.
    ///
    /// Classification checks a trailing year suffix before matching subject
    /// codes, so `sinhala_medium_sinhala_lit` (a subject) and
    /// `sinhala_medium_sinhala_lit_2023` (a paper) both resolve unambiguously.
    pub fn decode(token: &str) -> Result<NavPath, BotError> {
        let token = token.trim();
        if token == ROOT_TOKEN {
            return Ok(NavPath::Root);
        }

        for medium in Medium::ALL {
            let head = format!("{medium}_medium");
            if token == head {
                return Ok(NavPath::Medium(medium));
            }
            let Some(tail) = token
                .strip_prefix(head.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
            else {
                continue;
            };

            if let Some((code, year)) = tail.rsplit_once('_') {
                if year_pattern().is_match(year) {
                    return match catalog::subject(medium, code) {
                        Some(subject) => {
                            Ok(NavPath::Paper(medium, subject.code, year.to_string()))
                        }
                        None => Err(BotError::Decode(token.to_string())),
                    };
                }
            }

            return match catalog::subject(medium, tail) {
                Some(subject) => Ok(NavPath::Subject(medium, subject.code)),
                None => Err(BotError::Decode(token.to_string())),
            };
        }

        Err(BotError::Decode(token.to_string()))
    }

}

/// Canonical composite key `(medium, subject, year)` identifying a stored
/// document. Always normalized; construct via [`FileKey::parse`] or
/// [`NavPath::file_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub medium: Medium,
    pub subject: &'static str,
    pub year: String,
}

impl FileKey {
    /// Parse the strict manual upload-tag form `medium_medium_subject_year`
    /// (e.g. `sinhala_medium_maths_2023`). Input is trimmed and lowercased
    /// before checking. The subject code must belong to the named medium's
    /// own vocabulary and the year must match `20\d{2}`.
    pub fn parse(text: &str) -> Result<FileKey, BotError> {
        let normalized = text.trim().to_lowercase();

        for medium in Medium::ALL {
            let head = format!("{medium}_medium_");
            let Some(tail) = normalized.strip_prefix(head.as_str()) else {
                continue;
            };
            if let Some((code, year)) = tail.rsplit_once('_') {
                if year_pattern().is_match(year) {
                    if let Some(subject) = catalog::subject(medium, code) {
                        return Ok(FileKey {
                            medium,
                            subject: subject.code,
                            year: year.to_string(),
                        });
                    }
                }
            }
            break;
        }

        Err(BotError::InvalidKeyFormat(text.trim().to_string()))
    }

    /// The flat string form the repository persists under, identical to the
    /// terminal navigation token.
    pub fn storage_key(&self) -> String {
        format!("{}_medium_{}_{}", self.medium, self.subject, self.year)
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}
