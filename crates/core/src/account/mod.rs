pub mod account_service;
pub mod domain;
pub mod infrastructure;
