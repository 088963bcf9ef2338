//! Navigation port

/// Hook into the front end's navigation.
///
/// Called after a forced sign-out so the user lands on the sign-in entry
/// point with no session data left behind.
pub trait Navigator: Send + Sync {
    /// Sends the user to the sign-in entry point.
    fn to_sign_in(&self);
}
