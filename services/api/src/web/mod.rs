pub mod rest;
pub mod state;

// Re-export the handlers so the binary that builds the router can reach
// them without digging through the module tree.
pub use rest::{
    add_enrollment_handler, clear_schedule_handler, create_schedule_handler,
    delete_schedule_handler, get_schedule_handler, list_schedules_handler,
    remove_enrollment_handler, section_blocks_handler,
};
