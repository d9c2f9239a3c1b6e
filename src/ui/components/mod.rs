pub mod knob;
pub mod mode_row;
pub mod platter;
pub mod status;
pub mod timer_ring;
pub mod track_info;
