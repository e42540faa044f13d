pub mod db;
mod files;
pub mod models;
mod papers;
mod tables;

pub use db::{Database, DatabaseError};
pub use tables::*;
