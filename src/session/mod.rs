pub mod history;
pub mod mode;
pub mod timer;
