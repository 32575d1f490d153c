use crossterm::event::Event;

use crate::board::detector::Notification;
use crate::ui::Theme;

/// Everything the main loop reacts to, besides the board's own timers.
#[derive(Debug)]
pub enum AppEvent {
    Input(Event),
    Notify(Notification),
    ThemeUpdate(Theme),
}
