pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod test_helpers;
