pub mod clean;
pub mod upstream;
