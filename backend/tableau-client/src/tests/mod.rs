mod config;
mod error;
mod response;
