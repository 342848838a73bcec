//! Tracked contacts and the noise filters that guard them.

use tactile_core::logging::targets;
use tactile_core::{Point, Timestamp};

use crate::contact::{Contact, ContactId, ContactSource};

/// At most this many contacts are tracked at once.
pub const MAX_TRACKED_CONTACTS: usize = 2;

/// What [`TouchRegistry::add`] did with a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Tracked; the registry now holds this many contacts.
    Added(usize),
    /// The id is already tracked. Ignored.
    Duplicate,
    /// A mouse pointer emulated for an ongoing touch. Ignored.
    Synthetic,
    /// A third contact displaced an emulated mouse contact.
    ReplacedSynthetic {
        removed: ContactId,
    },
    /// A third contact with nothing to displace. Ignored.
    Overflow,
}

/// Contacts in arrival order.
#[derive(Debug, Clone, Default)]
pub struct TouchRegistry {
    contacts: Vec<Contact>,
}

impl TouchRegistry {
    pub fn new() -> Self {
        Self {
            contacts: Vec::with_capacity(MAX_TRACKED_CONTACTS),
        }
    }

    /// Track a new contact unless it is noise.
    pub fn add(&mut self, contact: Contact) -> AddOutcome {
        if self.contains(contact.id) {
            tracing::debug!(
                target: targets::REGISTRY,
                id = ?contact.id,
                "duplicate contact ignored"
            );
            return AddOutcome::Duplicate;
        }

        if contact.source == ContactSource::Mouse
            && self.contacts.iter().any(|c| c.source == ContactSource::Touch)
        {
            tracing::debug!(
                target: targets::REGISTRY,
                id = ?contact.id,
                "synthetic pointer ignored"
            );
            return AddOutcome::Synthetic;
        }

        if self.contacts.len() < MAX_TRACKED_CONTACTS {
            self.contacts.push(contact);
            return AddOutcome::Added(self.contacts.len());
        }

        let synthetic = self
            .contacts
            .iter()
            .position(|c| c.source == ContactSource::Mouse);
        match synthetic {
            Some(index) if contact.source == ContactSource::Touch => {
                let removed = self.contacts.remove(index).id;
                self.contacts.push(contact);
                tracing::debug!(
                    target: targets::REGISTRY,
                    ?removed,
                    "synthetic pointer displaced by third contact"
                );
                AddOutcome::ReplacedSynthetic { removed }
            }
            _ => {
                tracing::debug!(
                    target: targets::REGISTRY,
                    id = ?contact.id,
                    "contact limit reached"
                );
                AddOutcome::Overflow
            }
        }
    }

    /// Stop tracking a contact.
    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let index = self.index_of(id)?;
        Some(self.contacts.remove(index))
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: ContactId) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.id == id)
    }

    /// Record a new position for a tracked contact.
    pub fn update(&mut self, id: ContactId, position: Point, time: Timestamp) -> Option<&Contact> {
        let contact = self.get_mut(id)?;
        contact.position = position;
        contact.update_time = time;
        Some(contact)
    }

    /// Arrival index of a tracked contact.
    pub fn index_of(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Ids in arrival order.
    pub fn ids(&self) -> impl Iterator<Item = ContactId> + '_ {
        self.contacts.iter().map(|c| c.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    /// The two tracked contacts, when there are exactly two.
    pub fn pair(&self) -> Option<(&Contact, &Contact)> {
        match self.contacts.as_slice() {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }
}
