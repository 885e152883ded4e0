pub mod batch;
pub mod condition;
pub mod info;
pub mod presets;
pub mod validate;
