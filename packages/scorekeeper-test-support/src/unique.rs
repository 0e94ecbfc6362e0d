//! Unique test data built from ULIDs, so parallel tests never collide.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use scorekeeper_test_support::unique_str;
///
/// let id1 = unique_str("game");
/// let id2 = unique_str("game");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique player id string, lowercase so it sorts predictably.
///
/// # Examples
/// ```
/// use scorekeeper_test_support::unique_player_id;
///
/// let id = unique_player_id("late");
/// assert!(id.starts_with("player-late-"));
/// ```
pub fn unique_player_id(prefix: &str) -> String {
    unique_str(&format!("player-{prefix}")).to_lowercase()
}
