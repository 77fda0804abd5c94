pub mod entity;
pub mod file_type;
pub mod tree;
