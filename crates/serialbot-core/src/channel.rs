// ── Channel allow-list ──

use std::collections::HashSet;

use tracing::info;

use crate::error::Forbidden;

/// Allow only channels in `allowed`. Runs before any remote call so a
/// blocked channel never causes traffic to the cloud API.
pub fn authorize(channel_id: &str, allowed: &HashSet<String>) -> Result<(), Forbidden> {
    if allowed.contains(channel_id) {
        Ok(())
    } else {
        info!(channel_id, "blocked request from channel");
        Err(Forbidden {
            channel_id: channel_id.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> HashSet<String> {
        ["C0123", "C0456"].into_iter().map(String::from).collect()
    }

    #[test]
    fn listed_channel_passes() {
        assert_eq!(authorize("C0456", &allowed()), Ok(()));
    }

    #[test]
    fn unlisted_channel_forbidden() {
        let err = authorize("C9999", &allowed()).err();
        assert_eq!(
            err,
            Some(Forbidden {
                channel_id: "C9999".into()
            })
        );
    }

    #[test]
    fn match_is_exact() {
        assert!(authorize("c0123", &allowed()).is_err());
        assert!(authorize("", &allowed()).is_err());
    }
}
