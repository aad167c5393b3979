//! Document model: typed elements, identifiers, and the ordering tree.

pub mod chapter;
pub mod element;
pub mod id;
pub mod novel;
pub mod plot;
pub mod section;
pub mod tree;
pub mod world;

pub use chapter::{Chapter, ChapterLevel, ChapterType};
pub use element::{ChangeSignal, ElementCore, Link, ProjectNote};
pub use id::{Category, ElementId, ParseIdError};
pub use novel::Novel;
pub use plot::{PlotLine, PlotPoint};
pub use section::{count_content_words, SceneKind, Section, SectionType, Status};
pub use tree::{ParentKey, Tree};
pub use world::{Character, WorldElement};
