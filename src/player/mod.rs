pub mod error;
pub mod monitor;
pub mod program;
pub mod remote;
pub mod state;
pub mod track;
