pub mod billing;
pub mod pages;
