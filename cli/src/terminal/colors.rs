use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 140 };
pub const ACCENT: Color = Color::TrueColor { r: 230, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 210, g: 210, b: 210 };

pub const IPV4_ADDR: Color = Color::TrueColor { r: 110, g: 170, b: 240 };
pub const IPV4_PREFIX: Color = Color::TrueColor { r: 70, g: 120, b: 190 };
pub const MAC_ADDR: Color = Color::TrueColor { r: 200, g: 140, b: 230 };
pub const LATENCY: Color = Color::Yellow;
pub const OFFLINE: Color = Color::Red;
