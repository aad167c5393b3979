//! Shared element building blocks.
//!
//! # Responsibility
//! - Provide the change-notification handle every element carries.
//! - Provide the fields common to all elements (title, description,
//!   linked files) as an embedded sub-struct instead of inheritance.
//!
//! # Invariants
//! - Setters fire the change signal only when the value actually changes.
//! - Link order is insertion order and round-trips through the formats.

use std::cell::Cell;
use std::rc::Rc;

/// Cloneable dirty-flag handle distributed to every element of a novel.
///
/// The surrounding application keeps one clone, polls `take()` to learn
/// whether anything changed, and clears it after saving. Elements call
/// `notify()` from their setters. The model is single-threaded by
/// contract, so a plain `Rc<Cell<_>>` is sufficient.
#[derive(Clone, Default)]
pub struct ChangeSignal(Rc<Cell<bool>>);

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the document as modified.
    pub fn notify(&self) {
        self.0.set(true);
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Clears the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl std::fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ChangeSignal").field(&self.0.get()).finish()
    }
}

// Signals are bookkeeping, not element data: two elements with equal
// fields compare equal regardless of their signal state.
impl PartialEq for ChangeSignal {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for ChangeSignal {}

/// Externally linked file: project-relative path plus optional absolute
/// fallback path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub path: String,
    pub full_path: Option<String>,
}

/// Fields shared by every element kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementCore {
    signal: ChangeSignal,
    title: Option<String>,
    desc: Option<String>,
    links: Vec<Link>,
}

impl ElementCore {
    pub fn new(signal: ChangeSignal) -> Self {
        Self {
            signal,
            title: None,
            desc: None,
            links: Vec::new(),
        }
    }

    pub(crate) fn signal(&self) -> &ChangeSignal {
        &self.signal
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, value: Option<String>) {
        if self.title != value {
            self.title = value;
            self.signal.notify();
        }
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn set_desc(&mut self, value: Option<String>) {
        if self.desc != value {
            self.desc = value;
            self.signal.notify();
        }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn set_links(&mut self, value: Vec<Link>) {
        if self.links != value {
            self.links = value;
            self.signal.notify();
        }
    }

    pub fn add_link(&mut self, link: Link) {
        self.links.push(link);
        self.signal.notify();
    }
}

/// Project note: free-standing title/description/links, nothing more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNote {
    core: ElementCore,
}

impl ProjectNote {
    pub fn new(signal: ChangeSignal) -> Self {
        Self {
            core: ElementCore::new(signal),
        }
    }

    pub fn core(&self) -> &ElementCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeSignal, ElementCore, Link};

    #[test]
    fn setter_fires_signal_only_on_change() {
        let signal = ChangeSignal::new();
        let mut core = ElementCore::new(signal.clone());
        core.set_title(Some("Draft".to_string()));
        assert!(signal.take());
        core.set_title(Some("Draft".to_string()));
        assert!(!signal.is_set());
    }

    #[test]
    fn signal_state_does_not_affect_equality() {
        let a = ElementCore::new(ChangeSignal::new());
        let mut b = ElementCore::new(ChangeSignal::new());
        b.signal().notify();
        assert_eq!(a, b);
    }

    #[test]
    fn links_keep_order() {
        let mut core = ElementCore::new(ChangeSignal::new());
        core.add_link(Link {
            path: "notes/a.md".to_string(),
            full_path: None,
        });
        core.add_link(Link {
            path: "notes/b.md".to_string(),
            full_path: Some("/home/x/notes/b.md".to_string()),
        });
        assert_eq!(core.links()[0].path, "notes/a.md");
        assert_eq!(core.links()[1].full_path.as_deref(), Some("/home/x/notes/b.md"));
    }
}
