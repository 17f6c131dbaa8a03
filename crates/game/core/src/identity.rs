//! Stable identity tokens for persistable entities.
//!
//! Every entity that participates in save documents carries an
//! [`IdentityToken`]. The [`IdentityRegistry`] guarantees that no two
//! simultaneously-live entities share a token. The registry is an explicit
//! object owned by the session (never a hidden singleton) so tests can
//! substitute a fresh one.
//!
//! Stale records are reclaimed lazily: a registration or uniqueness check
//! evicts an entry whose owner has been dropped, or whose owner's current
//! token no longer matches the key it was registered under (the token was
//! reassigned externally). Lookups are O(1); the registry is only exercised
//! at entity-construction time, never per frame.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// Immutable-by-convention string token identifying one persistable entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdentityToken(String);

impl IdentityToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The empty token: not yet assigned, never considered registered.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IdentityToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Shared cell through which an entity exposes its current token.
///
/// The registry holds a weak reference to the cell; when the owning entity
/// is dropped the record becomes stale and is evicted on the next conflict
/// check.
#[derive(Debug)]
pub struct IdentityCell {
    token: RefCell<IdentityToken>,
}

impl IdentityCell {
    pub fn new(token: IdentityToken) -> Rc<Self> {
        Rc::new(Self {
            token: RefCell::new(token),
        })
    }

    pub fn token(&self) -> IdentityToken {
        self.token.borrow().clone()
    }

    /// Reassigns the token. The registry notices the mismatch lazily.
    pub fn set_token(&self, token: IdentityToken) {
        *self.token.borrow_mut() = token;
    }
}

/// Process-scoped map from token to live registrant.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    entries: HashMap<IdentityToken, Weak<IdentityCell>>,
    next_serial: u64,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded tokens, stale entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks whether `candidate` may be used by the owner of `cell`,
    /// without mutating the registry.
    ///
    /// True when the token is unrecorded, recorded for `cell` itself, or
    /// recorded for a stale registrant (dropped, or reassigned away from
    /// the key).
    pub fn is_unique(&self, candidate: &IdentityToken, cell: &Rc<IdentityCell>) -> bool {
        let Some(recorded) = self.entries.get(candidate) else {
            return true;
        };
        match recorded.upgrade() {
            None => true,
            Some(existing) => Rc::ptr_eq(&existing, cell) || existing.token() != *candidate,
        }
    }

    /// Records `cell` under its current token.
    ///
    /// Fails only when the token is held by a different live registrant
    /// whose recorded token still matches; the caller must then mint a new
    /// token. A stale holder is evicted and the registration succeeds.
    pub fn register(&mut self, cell: &Rc<IdentityCell>) -> bool {
        let token = cell.token();
        if token.is_empty() || !self.is_unique(&token, cell) {
            return false;
        }
        self.entries.insert(token, Rc::downgrade(cell));
        true
    }

    /// Ensures `cell` carries a unique token and records it, minting a
    /// replacement when the current one is empty or collides.
    ///
    /// Duplicate identifiers are repaired here and never surfaced as an
    /// error to the caller.
    pub fn claim(&mut self, cell: &Rc<IdentityCell>) -> IdentityToken {
        let mut token = cell.token();
        if token.is_empty() || !self.is_unique(&token, cell) {
            token = self.mint();
            cell.set_token(token.clone());
        }
        self.entries.insert(token.clone(), Rc::downgrade(cell));
        token
    }

    /// Mints a token that no live registrant currently holds.
    fn mint(&mut self) -> IdentityToken {
        loop {
            let candidate = IdentityToken::new(format!("entity-{:08x}", self.next_serial));
            self.next_serial += 1;
            let live = self
                .entries
                .get(&candidate)
                .and_then(Weak::upgrade)
                .is_some();
            if !live {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_live_duplicate() {
        let mut registry = IdentityRegistry::new();
        let first = IdentityCell::new(IdentityToken::new("door-1"));
        let second = IdentityCell::new(IdentityToken::new("door-1"));

        assert!(registry.register(&first));
        assert!(!registry.register(&second));
        assert!(!registry.is_unique(&IdentityToken::new("door-1"), &second));
    }

    #[test]
    fn registering_twice_from_the_same_cell_is_fine() {
        let mut registry = IdentityRegistry::new();
        let cell = IdentityCell::new(IdentityToken::new("chest"));
        assert!(registry.register(&cell));
        assert!(registry.register(&cell));
    }

    #[test]
    fn dropped_owner_is_evicted_lazily() {
        let mut registry = IdentityRegistry::new();
        let first = IdentityCell::new(IdentityToken::new("guard"));
        assert!(registry.register(&first));
        drop(first);

        let second = IdentityCell::new(IdentityToken::new("guard"));
        assert!(registry.is_unique(&IdentityToken::new("guard"), &second));
        assert!(registry.register(&second));
    }

    #[test]
    fn reassigned_token_frees_the_old_key() {
        let mut registry = IdentityRegistry::new();
        let first = IdentityCell::new(IdentityToken::new("portal-a"));
        assert!(registry.register(&first));
        first.set_token(IdentityToken::new("portal-b"));

        let second = IdentityCell::new(IdentityToken::new("portal-a"));
        assert!(registry.register(&second));
    }

    #[test]
    fn claim_mints_on_collision() {
        let mut registry = IdentityRegistry::new();
        let first = IdentityCell::new(IdentityToken::new("npc"));
        let second = IdentityCell::new(IdentityToken::new("npc"));

        let kept = registry.claim(&first);
        let minted = registry.claim(&second);
        assert_eq!(kept, IdentityToken::new("npc"));
        assert_ne!(minted, kept);
        assert_eq!(second.token(), minted);
    }

    #[test]
    fn claim_mints_for_empty_token() {
        let mut registry = IdentityRegistry::new();
        let cell = IdentityCell::new(IdentityToken::empty());
        let token = registry.claim(&cell);
        assert!(!token.is_empty());
    }
}
