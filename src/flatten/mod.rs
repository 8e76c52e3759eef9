pub mod curves;
pub(crate) mod simplify;
