//! User accounts and JWT bearer-token sessions.

mod forgot_password;
mod log_in;
mod me;
mod register;
pub(crate) mod token;
mod update_user;

pub use forgot_password::forgot_password_endpoint;
pub use log_in::log_in_endpoint;
pub use me::me_endpoint;
pub use register::{UserForm, register_endpoint};
pub use token::{AuthState, Claims};
pub use update_user::update_user_endpoint;
