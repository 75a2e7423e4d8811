//! Duplicate-label disambiguation.
//!
//! [`Uniquefier`] hands out occurrence indices per label so that every node a
//! generator creates has a display identity no other node shares, even when
//! source labels collide (duplicate steps, repeated scenarios, identical
//! example rows).

use std::collections::{HashMap, HashSet};

use crate::description::display_name;

/// Tracks the display identities issued so far.
#[derive(Debug, Clone, Default)]
pub struct Uniquefier {
    next: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl Uniquefier {
    /// Claim the next free occurrence index for `label`.
    ///
    /// The first claim of a label returns `0`. Later claims return the
    /// smallest index above the previous one whose display identity has not
    /// been issued, which also skips identities that happen to equal another
    /// label verbatim.
    ///
    /// ```rust
    /// use storytree::uniquefier::Uniquefier;
    ///
    /// let mut uniquefier = Uniquefier::default();
    /// assert_eq!(uniquefier.claim("Step1"), 0);
    /// assert_eq!(uniquefier.claim("Step1"), 1);
    /// assert_eq!(uniquefier.claim("Step2"), 0);
    /// ```
    pub fn claim(&mut self, label: &str) -> usize {
        self.claim_recorded(label).occurrence
    }

    /// Start a group of claims that is undone unless committed.
    ///
    /// ```rust
    /// use storytree::uniquefier::Uniquefier;
    ///
    /// let mut uniquefier = Uniquefier::default();
    /// {
    ///     let mut pending = uniquefier.transaction();
    ///     assert_eq!(pending.claim("Step1"), 0);
    /// }
    /// assert!(uniquefier.is_empty());
    /// ```
    #[must_use = "dropping a transaction rolls its claims back"]
    pub const fn transaction(&mut self) -> Transaction<'_> {
        Transaction {
            uniquefier: self,
            journal: Vec::new(),
        }
    }

    /// Number of display identities issued so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Returns `true` when nothing has been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    fn claim_recorded(&mut self, label: &str) -> Claim {
        let previous_next = self.next.get(label).copied();
        let mut occurrence = previous_next.unwrap_or_default();
        let mut issued = display_name(label, occurrence);
        while self.issued.contains(&issued) {
            occurrence += 1;
            issued = display_name(label, occurrence);
        }
        self.issued.insert(issued.clone());
        self.next.insert(label.to_owned(), occurrence + 1);
        Claim {
            label: label.to_owned(),
            issued,
            previous_next,
            occurrence,
        }
    }

    fn undo(&mut self, claim: Claim) {
        self.issued.remove(&claim.issued);
        match claim.previous_next {
            Some(next) => self.next.insert(claim.label, next),
            None => self.next.remove(&claim.label),
        };
    }
}

#[derive(Debug)]
struct Claim {
    label: String,
    issued: String,
    previous_next: Option<usize>,
    occurrence: usize,
}

/// Claims made against a [`Uniquefier`] that are rolled back on drop.
///
/// Only the claims of this transaction are journaled, so undoing them costs
/// nothing proportional to what the uniquefier already holds.
#[derive(Debug)]
pub struct Transaction<'a> {
    uniquefier: &'a mut Uniquefier,
    journal: Vec<Claim>,
}

impl Transaction<'_> {
    /// Claim the next free occurrence index for `label`.
    pub fn claim(&mut self, label: &str) -> usize {
        let claim = self.uniquefier.claim_recorded(label);
        let occurrence = claim.occurrence;
        self.journal.push(claim);
        occurrence
    }

    /// Keep every claim made so far.
    pub fn commit(mut self) {
        self.journal.clear();
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        while let Some(claim) = self.journal.pop() {
            self.uniquefier.undo(claim);
        }
    }
}
