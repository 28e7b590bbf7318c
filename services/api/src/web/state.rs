//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use schedule_core::service::ScheduleService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub schedules: ScheduleService,
    pub config: Arc<Config>,
}
