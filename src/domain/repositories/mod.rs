pub mod activities;
pub mod client_store;
pub mod pages;
