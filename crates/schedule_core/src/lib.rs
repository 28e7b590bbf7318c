pub mod conflict;
pub mod day;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod time;

pub use conflict::{check_candidate, detect_all};
pub use day::{normalize, DayLabel, Weekday};
pub use domain::{
    Conflict, Enrollment, NewEnrollment, Schedule, ScheduleView, TimeBlock, COLOR_PALETTE,
};
pub use error::{ScheduleError, ValidationError};
pub use ports::{CourseCatalog, PortError, PortResult, ScheduleRepository};
pub use service::{ScheduleService, MAX_NAME_LEN};
pub use time::TimeOfDay;
