pub mod engine;
pub mod http;
pub mod seed;
pub mod subsystems;
