pub mod activity_selection;
pub mod billing_checkout;
pub mod billing_webhook;
pub mod engagement;
pub mod page_lifecycle;
pub mod page_view;
