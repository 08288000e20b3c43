use std::sync::Arc;

use infra::db::Db;

use crate::services::{AttendanceGate, DirectoryMembershipOracle, SchedulingService};

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub scheduling: SchedulingService,
    pub attendance: AttendanceGate,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        let scheduling = SchedulingService::new(db.clone());
        let oracle = Arc::new(DirectoryMembershipOracle::new(db.clone()));
        let attendance = AttendanceGate::new(db.clone(), scheduling.clone(), oracle);
        Self {
            db,
            scheduling,
            attendance,
        }
    }
}
