//! User name lookups.

use crate::error::{Result, ShortcutError};
use tracing::debug;

/// Name of the user running this process.
///
/// # Platform Behavior
/// - **Unix**: passwd entry for the real uid, falling back to `$USER`
/// - **Other**: `$USER` / `$USERNAME`
pub fn current_user_name() -> Result<String> {
    #[cfg(unix)]
    {
        use nix::unistd::{Uid, User};
        match User::from_uid(Uid::current()) {
            Ok(Some(user)) => return Ok(user.name),
            Ok(None) => debug!("No passwd entry for uid {}", Uid::current()),
            Err(e) => debug!("passwd lookup failed: {}", e),
        }
    }

    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ShortcutError::Config {
            message: "Could not determine the current user name".to_string(),
        })
}

/// Name of the user with the given uid, if the user database knows one.
///
/// This call may hit NSS and block; async callers run it on a blocking thread.
#[cfg(unix)]
pub fn user_name_for_uid(uid: u32) -> Option<String> {
    use nix::unistd::{Uid, User};
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(user) => user.map(|u| u.name),
        Err(e) => {
            debug!("passwd lookup for uid {} failed: {}", uid, e);
            None
        }
    }
}

#[cfg(not(unix))]
pub fn user_name_for_uid(_uid: u32) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_name_not_empty() {
        // CI containers may lack both passwd entries and $USER.
        if let Ok(name) = current_user_name() {
            assert!(!name.is_empty());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unassigned_uid_has_no_name() {
        assert_eq!(user_name_for_uid(4_294_967_294 - 7), None);
    }
}
