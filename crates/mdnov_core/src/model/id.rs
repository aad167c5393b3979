//! Typed element identifiers.
//!
//! # Responsibility
//! - Map the category-prefix ID convention of the mdnov format onto a
//!   closed enum, validated once at parse time.
//!
//! # Invariants
//! - The rendered form is always `<prefix><number>` with the prefix
//!   matching the category.
//! - Parsing an ID under the wrong expected category is rejected, never
//!   silently accepted.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Element category of the novel document model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Chapter,
    Section,
    Character,
    Location,
    Item,
    PlotLine,
    PlotPoint,
    ProjectNote,
}

impl Category {
    /// ID prefix used by the mdnov text format.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Chapter => "ch",
            Self::Section => "sc",
            Self::Character => "cr",
            Self::Location => "lc",
            Self::Item => "it",
            Self::PlotLine => "ac",
            Self::PlotPoint => "ap",
            Self::ProjectNote => "pn",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ch" => Some(Self::Chapter),
            "sc" => Some(Self::Section),
            "cr" => Some(Self::Character),
            "lc" => Some(Self::Location),
            "it" => Some(Self::Item),
            "ac" => Some(Self::PlotLine),
            "ap" => Some(Self::PlotPoint),
            "pn" => Some(Self::ProjectNote),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Chapter => "chapter",
            Self::Section => "section",
            Self::Character => "character",
            Self::Location => "location",
            Self::Item => "item",
            Self::PlotLine => "plot line",
            Self::PlotPoint => "plot point",
            Self::ProjectNote => "project note",
        };
        write!(f, "{label}")
    }
}

/// Stable element identifier carrying the category and numeric suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Chapter(u32),
    Section(u32),
    Character(u32),
    Location(u32),
    Item(u32),
    PlotLine(u32),
    PlotPoint(u32),
    ProjectNote(u32),
}

impl ElementId {
    pub fn new(category: Category, number: u32) -> Self {
        match category {
            Category::Chapter => Self::Chapter(number),
            Category::Section => Self::Section(number),
            Category::Character => Self::Character(number),
            Category::Location => Self::Location(number),
            Category::Item => Self::Item(number),
            Category::PlotLine => Self::PlotLine(number),
            Category::PlotPoint => Self::PlotPoint(number),
            Category::ProjectNote => Self::ProjectNote(number),
        }
    }

    pub fn category(self) -> Category {
        match self {
            Self::Chapter(_) => Category::Chapter,
            Self::Section(_) => Category::Section,
            Self::Character(_) => Category::Character,
            Self::Location(_) => Category::Location,
            Self::Item(_) => Category::Item,
            Self::PlotLine(_) => Category::PlotLine,
            Self::PlotPoint(_) => Category::PlotPoint,
            Self::ProjectNote(_) => Category::ProjectNote,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Self::Chapter(n)
            | Self::Section(n)
            | Self::Character(n)
            | Self::Location(n)
            | Self::Item(n)
            | Self::PlotLine(n)
            | Self::PlotPoint(n)
            | Self::ProjectNote(n) => n,
        }
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.category().prefix(), self.number())
    }
}

/// Error for a token that is not a well-formed element ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    pub token: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "bad element ID: `{}`", self.token)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for ElementId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let split = token
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(token.len());
        let (prefix, digits) = token.split_at(split);
        let category = Category::from_prefix(prefix);
        let number = digits.parse::<u32>().ok();
        match (category, number) {
            (Some(category), Some(number)) => Ok(ElementId::new(category, number)),
            _ => Err(ParseIdError {
                token: token.to_string(),
            }),
        }
    }
}
