pub mod chat;
pub mod eval;
pub mod gateway;
pub mod onboard;
pub mod status;
