pub mod chat;
pub mod onboard;
pub mod read;
pub mod session;
