//! Auth actions: sign-in, sign-out and start-up session restore.

mod initialize_auth;
mod sign_in;
mod sign_out;

pub use initialize_auth::{AuthState, InitializeAuth};
pub use sign_in::{SignIn, SignInInput, SignInOutput};
pub use sign_out::SignOut;
