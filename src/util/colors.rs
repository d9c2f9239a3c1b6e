use ratatui::style::Color;

pub const BACKGROUND: Color = Color::from_u32(0x00080808);
pub const CHASSIS: Color = Color::from_u32(0x00121212);
pub const ACCENT: Color = Color::from_u32(0x00d4af37);
pub const COPPER: Color = Color::from_u32(0x00d2691e);
pub const SIGNAL: Color = Color::from_u32(0x00d91e18);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const DIM: Color = Color::from_u32(0x00262626);
pub const TEXT: Color = Color::from_u32(0x00e6e6e6);
