pub mod requests;

pub use requests::{LoginRequest, NumberOrString, RegisterRequest, SaveProgressRequest};
