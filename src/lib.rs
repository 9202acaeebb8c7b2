//! Resilient Employee Gateway Library

pub mod client;
pub mod config;
pub mod http;
pub mod model;
pub mod observability;
pub mod resilience;
pub mod service;

pub use config::schema::GatewayConfig;
pub use http::GatewayServer;
pub use service::EmployeeService;
