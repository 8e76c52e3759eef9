pub mod build;
pub mod element;
