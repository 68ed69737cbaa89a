use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 86, g: 204, b: 242 };
pub const ACCENT: Color = Color::TrueColor { r: 47, g: 128, b: 237 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const IPV4_ADDR: Color = Color::BrightGreen;
pub const IPV6_ADDR: Color = Color::BrightCyan;
pub const TIMESTAMP: Color = Color::Yellow;
