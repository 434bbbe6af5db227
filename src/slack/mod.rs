pub mod api;
pub mod command;
pub mod handler;
pub mod message;
pub mod modal;
pub mod oauth;
pub mod request;
pub mod signature;
#[cfg(test)]
pub mod test_support;
