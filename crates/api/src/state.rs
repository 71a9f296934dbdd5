use std::sync::Arc;

use dealdesk_config::Settings;
use dealdesk_services::{
    AnalyticsService,
    dao::{ActivityDao, DealDao, NotificationDao},
};
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub settings: Settings,
    pub deals: Arc<DealDao>,
    pub activities: Arc<ActivityDao>,
    pub notifications: Arc<NotificationDao>,
    pub analytics: Arc<AnalyticsService>,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, settings: Settings) -> Self {
        let deals = Arc::new(DealDao::new(&conn, &settings.pipeline));
        let activities = Arc::new(ActivityDao::new(&conn));
        let notifications = Arc::new(NotificationDao::new(&conn));
        let analytics = Arc::new(AnalyticsService::new(&conn, &settings.pipeline));

        Self {
            conn,
            settings,
            deals,
            activities,
            notifications,
            analytics,
        }
    }
}
