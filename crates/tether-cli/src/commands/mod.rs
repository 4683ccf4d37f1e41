pub mod history;
pub mod status;
pub mod submit;
pub mod watch;
