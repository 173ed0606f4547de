/// Display formatting helpers
use std::time::Duration;

/// Render a duration as `m:ss`, the way the player bar shows elapsed/total time
///
/// Minutes are not wrapped into hours: 3725 seconds renders as `62:05`.
pub fn format_time(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
