pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod page;
pub mod security;
pub mod storage;
pub mod view_model;

pub use config::Config;
pub use error::{AuthenticationError, AuthenticationErrorType};
pub use view_model::UserUpdateViewModel;
