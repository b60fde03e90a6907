//! Permission reconciliation.
//!
//! Only a file's owner may change its mode bits without elevation. The oracle
//! compares the invoking identity with the launcher's owner and decides whether
//! the launcher needs a fix before a shortcut can point at it, which bits to flip
//! and whether the fix must go through privilege escalation.
//!
//! | caller    | state                                   | fix                          | elevated |
//! |-----------|-----------------------------------------|------------------------------|----------|
//! | owner     | not world-writable                      | none                         | -        |
//! | owner     | world-writable                          | remove others' write         | no       |
//! | non-owner | executable, not world-writable          | none                         | -        |
//! | non-owner | not executable, or world-writable       | remove write and/or add exec | yes      |
//!
//! An owner never gets an "add execute" fix. In copy mode the copy carries its own
//! mode bits, so the add-execute requirement only applies to symlinks.

use crate::config::{Identity, ShortcutMode};
use crate::metadata::{LauncherMetadata, Owner};
use serde::{Deserialize, Serialize};

/// Symbolic chmod clause removing write permission for others.
pub const REMOVE_WRITE_BY_OTHERS: &str = "o-w";
/// Symbolic chmod clause adding execute permission for everyone.
pub const ADD_EXECUTE: &str = "a+x";

/// Outcome of a permission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionDecision {
    pub needs_change: bool,
    pub requires_elevation: bool,
    pub remove_write_by_others: bool,
    pub add_execute: bool,
}

impl PermissionDecision {
    /// No fix required.
    pub const NONE: PermissionDecision = PermissionDecision {
        needs_change: false,
        requires_elevation: false,
        remove_write_by_others: false,
        add_execute: false,
    };

    fn fix(requires_elevation: bool, remove_write_by_others: bool, add_execute: bool) -> Self {
        Self {
            needs_change: remove_write_by_others || add_execute,
            requires_elevation,
            remove_write_by_others,
            add_execute,
        }
    }

    /// Symbolic mode expression applying exactly the flagged changes, e.g. `o-w,a+x`.
    ///
    /// Returns `None` when nothing needs to change.
    pub fn mode_expression(&self) -> Option<String> {
        let mut clauses = Vec::with_capacity(2);
        if self.remove_write_by_others {
            clauses.push(REMOVE_WRITE_BY_OTHERS);
        }
        if self.add_execute {
            clauses.push(ADD_EXECUTE);
        }
        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(","))
        }
    }
}

/// Pure decision function over (identity, metadata) for one shortcut mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionOracle {
    mode: ShortcutMode,
}

impl PermissionOracle {
    pub fn new(mode: ShortcutMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ShortcutMode {
        self.mode
    }

    /// Decide the minimal permission change for `metadata` as seen by `identity`.
    pub fn decide(&self, identity: &Identity, metadata: &LauncherMetadata) -> PermissionDecision {
        let is_owner = match &metadata.owner {
            Owner::Named(name) => name == identity.name(),
            Owner::Unknown => false,
        };

        if is_owner {
            return if metadata.writable_by_others {
                PermissionDecision::fix(false, true, false)
            } else {
                PermissionDecision::NONE
            };
        }

        let add_execute = match self.mode {
            ShortcutMode::Symlink => !metadata.can_execute,
            ShortcutMode::Copy => false,
        };
        if !add_execute && !metadata.writable_by_others {
            return PermissionDecision::NONE;
        }
        PermissionDecision::fix(true, metadata.writable_by_others, add_execute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity::new("alice")
    }

    fn md(owner: &str, can_execute: bool, writable_by_others: bool) -> LauncherMetadata {
        LauncherMetadata::new(Owner::Named(owner.into()), can_execute, writable_by_others)
    }

    #[test]
    fn test_owner_world_writable_self_fix() {
        for mode in [ShortcutMode::Copy, ShortcutMode::Symlink] {
            let decision = PermissionOracle::new(mode).decide(&alice(), &md("alice", false, true));
            assert_eq!(
                decision,
                PermissionDecision {
                    needs_change: true,
                    requires_elevation: false,
                    remove_write_by_others: true,
                    add_execute: false,
                }
            );
            assert_eq!(decision.mode_expression().as_deref(), Some("o-w"));
        }
    }

    #[test]
    fn test_owner_not_world_writable_no_fix() {
        for mode in [ShortcutMode::Copy, ShortcutMode::Symlink] {
            let oracle = PermissionOracle::new(mode);
            assert_eq!(oracle.decide(&alice(), &md("alice", false, false)), PermissionDecision::NONE);
            assert_eq!(oracle.decide(&alice(), &md("alice", true, false)), PermissionDecision::NONE);
        }
    }

    #[test]
    fn test_non_owner_executable_no_fix() {
        for mode in [ShortcutMode::Copy, ShortcutMode::Symlink] {
            let decision = PermissionOracle::new(mode).decide(&alice(), &md("root", true, false));
            assert!(!decision.needs_change);
            assert_eq!(decision.mode_expression(), None);
        }
    }

    #[test]
    fn test_non_owner_symlink_needs_elevated_fix() {
        let oracle = PermissionOracle::new(ShortcutMode::Symlink);
        let decision = oracle.decide(&alice(), &md("root", false, true));
        assert_eq!(
            decision,
            PermissionDecision {
                needs_change: true,
                requires_elevation: true,
                remove_write_by_others: true,
                add_execute: true,
            }
        );
        assert_eq!(decision.mode_expression().as_deref(), Some("o-w,a+x"));

        let decision = oracle.decide(&alice(), &md("root", false, false));
        assert!(decision.requires_elevation);
        assert!(!decision.remove_write_by_others);
        assert_eq!(decision.mode_expression().as_deref(), Some("a+x"));

        let decision = oracle.decide(&alice(), &md("root", true, true));
        assert!(!decision.add_execute);
        assert_eq!(decision.mode_expression().as_deref(), Some("o-w"));
    }

    #[test]
    fn test_non_owner_copy_ignores_execute_bit() {
        let oracle = PermissionOracle::new(ShortcutMode::Copy);
        assert_eq!(oracle.decide(&alice(), &md("root", false, false)), PermissionDecision::NONE);

        let decision = oracle.decide(&alice(), &md("root", false, true));
        assert!(decision.requires_elevation);
        assert!(decision.remove_write_by_others);
        assert!(!decision.add_execute);
    }

    #[test]
    fn test_unknown_owner_is_non_owner() {
        let oracle = PermissionOracle::new(ShortcutMode::Symlink);
        let unknown = LauncherMetadata::new(Owner::Unknown, true, true);
        let decision = oracle.decide(&alice(), &unknown);
        assert!(decision.needs_change);
        assert!(decision.requires_elevation);

        // Never treated as owned, even by an identity with an empty-looking name.
        let decision = oracle.decide(&Identity::new(""), &unknown);
        assert!(decision.requires_elevation);
    }

    #[test]
    fn test_decide_is_deterministic() {
        let identities = [Identity::new("alice"), Identity::new("bob")];
        let owners = [Owner::Named("alice".into()), Owner::Named("root".into()), Owner::Unknown];
        for mode in [ShortcutMode::Copy, ShortcutMode::Symlink] {
            let oracle = PermissionOracle::new(mode);
            for identity in &identities {
                for owner in &owners {
                    for can_execute in [false, true] {
                        for writable in [false, true] {
                            let metadata = LauncherMetadata::new(owner.clone(), can_execute, writable);
                            let first = oracle.decide(identity, &metadata);
                            let second = oracle.decide(identity, &metadata);
                            assert_eq!(first, second);
                            assert_eq!(first.needs_change, first.mode_expression().is_some());
                            if !first.needs_change {
                                assert!(!first.requires_elevation);
                            }
                        }
                    }
                }
            }
        }
    }
}
