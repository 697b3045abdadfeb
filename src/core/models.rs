pub mod admin;
pub mod membership;
pub mod notification;
