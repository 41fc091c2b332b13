pub mod auth;
pub mod bitrate;
pub mod catalog;
pub mod completion;
pub mod password;
pub mod preferences;
pub mod progress;
pub mod seed;
pub mod token;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use progress::ProgressService;
pub use token::TokenSigner;
