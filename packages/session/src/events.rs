//! Change flags and the notification port.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::path::Path;

/// Bit set of lifecycle change events.
///
/// Bits `0..=7` are reserved for this layer; applications allocate their
/// own flags from bit 8 up via [`ChangeFlags::bit`].
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeFlags(u32);

impl ChangeFlags {
    /// No change.
    pub const NONE: Self = Self(0);
    /// The active SCM backend changed.
    pub const NEW_SCM: Self = Self::bit(0);
    /// The project-manager selection changed.
    pub const NEW_PM: Self = Self::bit(1);
    /// The process working directory changed.
    pub const CHANGE_WD: Self = Self::bit(2);

    /// The flag occupying bit `n`.
    ///
    /// # Panics
    ///
    /// Panics when `n` does not fit the `u32` flag word (`n >= 32`).
    #[must_use]
    pub const fn bit(n: u32) -> Self {
        assert!(n < 32, "flag bit out of range");
        Self(1 << n)
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitOr for ChangeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChangeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ChangeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "ChangeFlags(NONE)");
        }
        let mut parts = Vec::new();
        if self.contains(Self::NEW_SCM) {
            parts.push("NEW_SCM");
        }
        if self.contains(Self::NEW_PM) {
            parts.push("NEW_PM");
        }
        if self.contains(Self::CHANGE_WD) {
            parts.push("CHANGE_WD");
        }
        let known = Self::NEW_SCM.0 | Self::NEW_PM.0 | Self::CHANGE_WD.0;
        let rest = self.0 & !known;
        let rest_repr;
        if rest != 0 {
            rest_repr = format!("{rest:#x}");
            parts.push(&rest_repr);
        }
        write!(f, "ChangeFlags({})", parts.join("|"))
    }
}

/// Port through which lifecycle routines publish change events.
pub trait ChangeNotifier: Send + Sync {
    /// Publish `events`, carrying the new working directory when it moved.
    fn notify_events(&self, events: ChangeFlags, new_wd: Option<&Path>);
}

/// Notifier that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl ChangeNotifier for NullNotifier {
    fn notify_events(&self, _events: ChangeFlags, _new_wd: Option<&Path>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_distinct_bits() {
        assert_eq!(ChangeFlags::NEW_SCM, ChangeFlags::bit(0));
        assert_eq!(ChangeFlags::NEW_PM, ChangeFlags::bit(1));
        assert_eq!(ChangeFlags::CHANGE_WD, ChangeFlags::bit(2));
        assert!(!ChangeFlags::NEW_SCM.contains(ChangeFlags::NEW_PM));
    }

    #[test]
    #[should_panic(expected = "flag bit out of range")]
    fn test_bit_rejects_out_of_range() {
        let _ = ChangeFlags::bit(32);
    }

    #[test]
    fn test_insert_and_contains() {
        let mut flags = ChangeFlags::NONE;
        assert!(flags.is_empty());
        flags.insert(ChangeFlags::NEW_SCM);
        flags |= ChangeFlags::CHANGE_WD;
        assert!(flags.contains(ChangeFlags::NEW_SCM));
        assert!(flags.contains(ChangeFlags::CHANGE_WD));
        assert!(!flags.contains(ChangeFlags::NEW_PM));
        assert!(flags.contains(ChangeFlags::NEW_SCM | ChangeFlags::CHANGE_WD));
    }

    #[test]
    fn test_debug_lists_flag_names() {
        assert_eq!(format!("{:?}", ChangeFlags::NONE), "ChangeFlags(NONE)");
        assert_eq!(
            format!("{:?}", ChangeFlags::NEW_SCM | ChangeFlags::CHANGE_WD),
            "ChangeFlags(NEW_SCM|CHANGE_WD)"
        );
        assert_eq!(format!("{:?}", ChangeFlags::bit(8)), "ChangeFlags(0x100)");
    }
}
