//! Domain model: the warranty item and its status/filter enums.

pub mod item;

pub use item::{ParseEnumError, WarrantyFilter, WarrantyItem, WarrantyStatus};
