//! # Catalog Tree
//!
//! The static three-level hierarchy the navigation walks: medium, subject,
//! year. Defined entirely at build time; nothing here mutates at runtime and
//! nothing here touches I/O.

use std::fmt;
use std::str::FromStr;

use crate::domain::errors::BotError;

/// Subject buttons per row.
pub const SUBJECT_COLUMNS: usize = 2;
/// Year buttons per row.
pub const YEAR_COLUMNS: usize = 3;

/// One of the two fixed language tracks of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medium {
    Sinhala,
    English,
}

impl Medium {
    pub const ALL: [Medium; 2] = [Medium::Sinhala, Medium::English];

    /// Lowercase wire name, as used in tokens and file keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Medium::Sinhala => "sinhala",
            Medium::English => "english",
        }
    }

    /// Human-facing name.
    pub fn title(&self) -> &'static str {
        match self {
            Medium::Sinhala => "Sinhala",
            Medium::English => "English",
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Medium {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sinhala" => Ok(Medium::Sinhala),
            "english" => Ok(Medium::English),
            other => Err(BotError::UnknownMedium(other.to_string())),
        }
    }
}

/// A curriculum subject: stable short code plus the button label shown to
/// the user, in the language of its medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub code: &'static str,
    pub title: &'static str,
}

const SINHALA_SUBJECTS: &[Subject] = &[
    Subject { code: "buddhism", title: "බුද්ධ ධර්මය" },
    Subject { code: "sinhala", title: "සිංහල" },
    Subject { code: "maths", title: "ගණිතය" },
    Subject { code: "science", title: "විද්‍යාව" },
    Subject { code: "english", title: "English" },
    Subject { code: "history", title: "ඉතිහාසය" },
    Subject { code: "geography", title: "භූගෝල විද්‍යාව" },
    Subject { code: "civic", title: "පුරවැසි අධ්‍යාපනය" },
    Subject { code: "business", title: "ව්‍යාපාර හා ගිණුම්කරණය" },
    Subject { code: "health", title: "සෞඛ්‍ය හා ශාරීරික අධ්‍යාපනය" },
    Subject { code: "art", title: "චිත්‍ර කලාව" },
    Subject { code: "dancing", title: "නර්තනය" },
    Subject { code: "music", title: "සංගීතය" },
    Subject { code: "drama", title: "නාට්‍ය හා රංග කලාව" },
    Subject { code: "sinhala_lit", title: "සිංහල සාහිත්‍ය" },
    Subject { code: "ict", title: "තොරතුරු හා සන්නිවේදන තාක්ෂණය" },
];

const ENGLISH_SUBJECTS: &[Subject] = &[
    Subject { code: "buddhism", title: "Buddhism" },
    Subject { code: "maths", title: "Mathematics" },
    Subject { code: "science", title: "Science" },
    Subject { code: "history", title: "History" },
    Subject { code: "geography", title: "Geography" },
    Subject { code: "civic", title: "Civic Education" },
    Subject { code: "business", title: "Business & Accounting" },
    Subject { code: "health", title: "Health & Physical Education" },
    Subject { code: "english", title: "English" },
    Subject { code: "english_lit", title: "English Literature" },
    Subject { code: "art", title: "Art" },
    Subject { code: "dancing", title: "Dancing" },
    Subject { code: "music", title: "Music" },
    Subject { code: "drama", title: "Drama & Theatre" },
    Subject { code: "french", title: "French" },
    Subject { code: "tamil", title: "Tamil" },
    Subject { code: "ict", title: "ICT" },
];

/// Exam years offered in the year menu, newest first.
const YEARS: &[&str] = &[
    "2023", "2022", "2021", "2020", "2019", "2018", "2017", "2016", "2015",
];

/// Ordered subject list for a medium.
pub fn subjects(medium: Medium) -> &'static [Subject] {
    match medium {
        Medium::Sinhala => SINHALA_SUBJECTS,
        Medium::English => ENGLISH_SUBJECTS,
    }
}

/// Look up a subject by code within a medium's vocabulary.
pub fn subject(medium: Medium, code: &str) -> Option<&'static Subject> {
    subjects(medium).iter().find(|s| s.code == code)
}

/// Ordered year list, descending.
pub fn years() -> &'static [&'static str] {
    YEARS
}

/// Arrange an ordered list into rows of at most `columns` entries,
/// preserving order. Deterministic for identical input.
pub fn button_rows<T: Clone>(items: &[T], columns: usize) -> Vec<Vec<T>> {
    items
        .chunks(columns.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Both vocabularies rendered for the upload instruction message.
pub fn subject_list_text() -> String {
    let render = |medium: Medium| {
        subjects(medium)
            .iter()
            .map(|s| format!("{} ({})", s.title, s.code))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "*Sinhala Medium:*\n{}\n\n*English Medium:*\n{}",
        render(Medium::Sinhala),
        render(Medium::English)
    )
}
