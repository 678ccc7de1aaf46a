pub mod errors;
pub mod events;
pub mod order;
pub mod ports;
pub mod validator;
