pub mod config;
pub mod logging;

pub mod browser;
pub mod catalog;
pub mod fetch;
pub mod filter;
pub mod meta;
pub mod normalize;
pub mod render;
pub mod view;
