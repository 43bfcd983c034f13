pub mod constants;
pub mod customer;
pub mod primitives;
