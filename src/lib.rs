#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "Contains the domain models, authentication and token machinery, per-entity"]
#![doc = "stores, the auth and task services, routing configuration, and error"]
#![doc = "handling for the Taskboard application. The main binary (`main.rs`) uses it"]
#![doc = "to construct and run the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
