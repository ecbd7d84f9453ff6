pub mod http_client;
pub mod scripted_http;
