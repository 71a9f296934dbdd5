pub mod activity;
pub mod analytics;
pub mod deal;
pub mod notification;
