pub mod delivery;
pub mod drive_log;
pub mod session;
pub mod session_summary;
pub mod work_state;
