pub mod fanout;
pub mod membership;
pub mod notification;

#[cfg(test)]
pub(crate) mod memory;
