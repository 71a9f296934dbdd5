pub mod activity;
pub mod deal;
pub mod notification;
