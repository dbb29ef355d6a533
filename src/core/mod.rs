pub mod errors;
pub mod photos;
pub mod services;
pub mod time;
pub mod utils;
