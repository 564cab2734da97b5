pub mod extract;
pub mod gmail_client;
pub mod headers;
pub mod message;
pub mod sanitize;
pub mod threads;
