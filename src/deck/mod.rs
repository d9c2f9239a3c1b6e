pub mod knob;
pub mod platter;
