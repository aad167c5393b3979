//! Story-world elements: locations, items, and characters.

use crate::model::element::{ChangeSignal, ElementCore};
use chrono::NaiveDate;

/// Location or item: title/desc/links plus notes, tags, and an
/// alternate name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldElement {
    core: ElementCore,
    notes: Option<String>,
    tags: Vec<String>,
    aka: Option<String>,
}

impl WorldElement {
    pub fn new(signal: ChangeSignal) -> Self {
        Self {
            core: ElementCore::new(signal),
            notes: None,
            tags: Vec::new(),
            aka: None,
        }
    }

    pub fn core(&self) -> &ElementCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_notes(&mut self, value: Option<String>) {
        if self.notes != value {
            self.notes = value;
            self.core.signal().notify();
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_tags(&mut self, value: Vec<String>) {
        if self.tags != value {
            self.tags = value;
            self.core.signal().notify();
        }
    }

    pub fn aka(&self) -> Option<&str> {
        self.aka.as_deref()
    }

    pub fn set_aka(&mut self, value: Option<String>) {
        if self.aka != value {
            self.aka = value;
            self.core.signal().notify();
        }
    }
}

/// Character: a world element extended with biography fields and the
/// major/minor distinction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    world: WorldElement,
    full_name: Option<String>,
    is_major: bool,
    birth_date: Option<NaiveDate>,
    death_date: Option<NaiveDate>,
    bio: Option<String>,
    goals: Option<String>,
}

impl Character {
    pub fn new(signal: ChangeSignal) -> Self {
        Self {
            world: WorldElement::new(signal),
            full_name: None,
            is_major: false,
            birth_date: None,
            death_date: None,
            bio: None,
            goals: None,
        }
    }

    pub fn world(&self) -> &WorldElement {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldElement {
        &mut self.world
    }

    pub fn core(&self) -> &ElementCore {
        self.world.core()
    }

    pub fn core_mut(&mut self) -> &mut ElementCore {
        self.world.core_mut()
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn set_full_name(&mut self, value: Option<String>) {
        if self.full_name != value {
            self.full_name = value;
            self.world.core().signal().notify();
        }
    }

    pub fn is_major(&self) -> bool {
        self.is_major
    }

    pub fn set_is_major(&mut self, value: bool) {
        if self.is_major != value {
            self.is_major = value;
            self.world.core().signal().notify();
        }
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn set_birth_date(&mut self, value: Option<NaiveDate>) {
        if self.birth_date != value {
            self.birth_date = value;
            self.world.core().signal().notify();
        }
    }

    pub fn death_date(&self) -> Option<NaiveDate> {
        self.death_date
    }

    pub fn set_death_date(&mut self, value: Option<NaiveDate>) {
        if self.death_date != value {
            self.death_date = value;
            self.world.core().signal().notify();
        }
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn set_bio(&mut self, value: Option<String>) {
        if self.bio != value {
            self.bio = value;
            self.world.core().signal().notify();
        }
    }

    pub fn goals(&self) -> Option<&str> {
        self.goals.as_deref()
    }

    pub fn set_goals(&mut self, value: Option<String>) {
        if self.goals != value {
            self.goals = value;
            self.world.core().signal().notify();
        }
    }
}
