pub mod check_in_commands;
pub mod scan_session_commands;
