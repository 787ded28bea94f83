pub mod app;
pub mod caltech;
pub mod cifar;
pub mod config;
pub mod domain;
pub mod error;
pub mod fs_util;
pub mod http;
pub mod output;
pub mod store;
