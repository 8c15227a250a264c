//! Resolved caller identity.

/// A resolved, authenticated caller.
///
/// Produced by the auth middleware from validated session claims and
/// consumed by the tour service when creating or mutating progress.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Stable Google user id
    pub user_id: String,
    /// Display name (defaults to "User" if Google did not share one)
    pub display_name: String,
    /// Email address (defaults to "No email provided")
    pub email: String,
}
