use crate::serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Message {
    message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Message { message: message.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct Reply<T> {
    message: String,
    #[serde(flatten)]
    data: T,
}

impl<T> Reply<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Reply { message: message.into(), data }
    }
}
