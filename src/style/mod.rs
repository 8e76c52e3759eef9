pub mod palette;
pub mod spec;
