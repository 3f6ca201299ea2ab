use ratatui::style::Color;

pub const BG_PRIMARY: Color = Color::Rgb(0, 0, 0);
pub const BG_PANEL: Color = Color::Rgb(12, 12, 12);
pub const FG_PRIMARY: Color = Color::Rgb(190, 190, 190);
pub const FG_DIM: Color = Color::Rgb(128, 128, 128);

pub const BUTTON_BG: Color = Color::Rgb(79, 79, 79);
pub const BUTTON_TEXT: Color = Color::Rgb(240, 240, 240);
pub const BUTTON_DISABLED_TEXT: Color = Color::Rgb(120, 120, 120);

pub const BORDER_IDLE: Color = Color::Rgb(61, 120, 120);
pub const BORDER_FOCUS: Color = Color::Rgb(187, 94, 0);

pub const USER_FG: Color = Color::Cyan;
pub const AGENT_FG: Color = Color::Rgb(235, 235, 235);
pub const STATUS_PENDING_FG: Color = Color::Rgb(173, 173, 173);
pub const STATUS_OK_FG: Color = Color::Rgb(98, 190, 110);
pub const NOTICE_ERROR: Color = Color::Rgb(220, 70, 70);
pub const NOTICE_WARNING: Color = Color::Rgb(230, 170, 40);
