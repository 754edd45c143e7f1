pub mod testing;
pub mod web;
