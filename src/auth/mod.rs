mod token;

pub use token::{AuthToken, Credentials};
