pub mod cache;
pub mod db;
pub mod email;
pub mod feed;
pub mod stripe;
