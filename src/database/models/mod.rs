pub mod profile;
pub mod user;

pub use profile::{Profile, ProfileFields, ProfileOwner, Social};
pub use user::{NewUser, User};
