pub mod errors;
pub mod launcher;
pub mod pages;
pub mod routes;
pub mod startup;

pub use startup::{run, Deployment};
