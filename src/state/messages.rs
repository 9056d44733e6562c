use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// Once a second, keeps the footer clock current.
    ClockTick,
}
