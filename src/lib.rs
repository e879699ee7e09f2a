pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod post;
pub mod post_list;
pub mod splice;
pub mod view;
mod test_data;
