pub mod rejection;
pub mod response_result;
pub mod server;
pub mod server_environment;
pub mod success_page;
