//! Terminal stand-in for the app's navigation.

use lockwallet_application::Navigator;

/// Tells the user to sign in again after a forced sign-out.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn to_sign_in(&self) {
        eprintln!("Your session has expired. Sign in again with `lockwallet sign-in`.");
    }
}
