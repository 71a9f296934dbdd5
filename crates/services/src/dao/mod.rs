pub mod activity;
pub mod base;
pub mod deal;
pub mod notification;

pub use activity::ActivityDao;
pub use base::{DaoError, DaoResult};
pub use deal::DealDao;
pub use notification::NotificationDao;
