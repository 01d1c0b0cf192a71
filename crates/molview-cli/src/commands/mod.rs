pub mod info;
pub mod order;
