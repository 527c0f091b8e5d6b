use axum::{
    routing::{get, post, put},
    Router,
};

use tatami_db::Connection;

pub mod error;

mod activities;
mod dashboard;
mod ledger;
mod members;
mod notifications;
mod payments;
mod settings;
mod staff;

#[derive(Clone)]
pub struct AppState {
    pub db: Connection,
}

/// Build the back office router.
pub fn app(db: Connection) -> Router {
    Router::new()
        .route("/ledger", get(ledger::get_ledger))
        .route("/expenses", post(ledger::add_expense))
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route(
            "/members/:id",
            get(members::get_member).delete(members::delete_member),
        )
        .route(
            "/payments",
            get(payments::list_payments).post(payments::create_payment),
        )
        .route(
            "/activities",
            get(activities::list_activities).post(activities::create_activity),
        )
        .route("/staff", get(staff::list_staff).post(staff::create_staff))
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/:id/read", post(notifications::mark_read))
        .route("/settings", get(settings::list_settings))
        .route("/settings/:key", put(settings::put_setting))
        .route("/dashboard", get(dashboard::get_dashboard))
        .with_state(AppState { db })
}
