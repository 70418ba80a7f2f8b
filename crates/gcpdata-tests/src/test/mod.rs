pub mod entity;
pub mod invalid;
