pub mod page_statuses;
pub mod page_types;
