//! Lock fields and the lock state transition machine
//!
//! Each tag carries an independent lock state per [`LockField`]. A field that
//! was never locked has no entry at all; the first lock operation against it
//! synthesizes one from the requested privilege.

use thiserror::Error;

/// The five independently lockable units of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockField {
    /// Access password words of the PASSWORD bank
    AccessPassword,
    /// Kill password words of the PASSWORD bank
    KillPassword,
    /// The whole EPC bank
    EpcBank,
    /// The whole TID bank
    TidBank,
    /// The whole USER bank
    UserBank,
}

impl LockField {
    /// Returns a human-readable name for the field
    pub fn name(&self) -> &'static str {
        match self {
            LockField::AccessPassword => "ACCESS_PASSWORD",
            LockField::KillPassword => "KILL_PASSWORD",
            LockField::EpcBank => "EPC_BANK",
            LockField::TidBank => "TID_BANK",
            LockField::UserBank => "USER_BANK",
        }
    }

    /// The lock field guarding a whole memory bank, if any
    ///
    /// The PASSWORD bank has no single guard: its two password fields lock
    /// independently, resolved per access by word range.
    pub fn for_bank(bank: crate::MemoryBank) -> Option<LockField> {
        match bank {
            crate::MemoryBank::Epc => Some(LockField::EpcBank),
            crate::MemoryBank::Tid => Some(LockField::TidBank),
            crate::MemoryBank::User => Some(LockField::UserBank),
            crate::MemoryBank::Password => None,
        }
    }
}

/// Requested lock transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Privilege {
    /// Lock the field (reversible)
    Lock,
    /// Unlock the field (reversible)
    Unlock,
    /// Lock the field permanently
    Permalock,
    /// Unlock the field permanently
    Permaunlock,
}

/// Lock state of a single field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockState {
    /// Field is currently locked
    pub locked: bool,
    /// State can no longer be changed
    pub permanent: bool,
}

/// A transition that would alter a permanent lock state
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LockTransitionError {
    /// Field is perma-locked; only a redundant permalock is accepted
    #[error("field is perma-locked")]
    PermanentlyLocked,

    /// Field is perma-unlocked; only a redundant perma-unlock is accepted
    #[error("field is perma-unlocked")]
    PermanentlyUnlocked,
}

impl LockState {
    /// Lock state synthesized for a field that has never been locked
    pub fn from_privilege(privilege: Privilege) -> LockState {
        LockState {
            locked: matches!(privilege, Privilege::Lock | Privilege::Permalock),
            permanent: matches!(privilege, Privilege::Permalock | Privilege::Permaunlock),
        }
    }

    /// Apply a privilege to this state
    ///
    /// Transitions between the non-permanent states are free in either
    /// direction; entering a permanent state is always allowed from a
    /// non-permanent one; every attempt to leave or flip a permanent state
    /// fails. Redundant transitions (locking a locked field, perma-locking a
    /// perma-locked field, ...) are accepted as no-ops.
    pub fn apply(self, privilege: Privilege) -> Result<LockState, LockTransitionError> {
        match (self.locked, self.permanent, privilege) {
            // open
            (false, false, Privilege::Lock) => Ok(LockState { locked: true, permanent: false }),
            (false, false, Privilege::Unlock) => Ok(self),
            (false, false, Privilege::Permalock) => Ok(LockState { locked: true, permanent: true }),
            (false, false, Privilege::Permaunlock) => {
                Ok(LockState { locked: false, permanent: true })
            }

            // locked
            (true, false, Privilege::Lock) => Ok(self),
            (true, false, Privilege::Unlock) => Ok(LockState { locked: false, permanent: false }),
            (true, false, Privilege::Permalock) => Ok(LockState { locked: true, permanent: true }),
            (true, false, Privilege::Permaunlock) => {
                Ok(LockState { locked: false, permanent: true })
            }

            // perma-locked
            (true, true, Privilege::Permalock) => Ok(self),
            (true, true, _) => Err(LockTransitionError::PermanentlyLocked),

            // perma-unlocked
            (false, true, Privilege::Permaunlock) => Ok(self),
            (false, true, _) => Err(LockTransitionError::PermanentlyUnlocked),
        }
    }
}
