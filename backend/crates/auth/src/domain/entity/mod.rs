pub mod session;
pub mod user_profile;

pub use session::{Session, SignInOutput};
pub use user_profile::UserProfile;
