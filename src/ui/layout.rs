use tui::layout::{Constraint, Layout, Rect, Size};
pub const TAB_BAR_HEIGHT: u16 = 3;
pub const HEADER_HEIGHT: u16 = 2;
pub const FOOTER_HEIGHT: u16 = 1;
pub const LOG_PANE_HEIGHT: u16 = 8;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub header: Rect,
    pub tab_bar: [Rect; 2],
    pub main: Rect,
    pub logs: Rect,
    pub footer: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let log_height = if show_logs { LOG_PANE_HEIGHT } else { 0 };

        if full_screen {
            let [main, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(log_height)]).areas(area);
            return LayoutAreas {
                header: Rect::ZERO,
                tab_bar: [Rect::ZERO, Rect::ZERO],
                main,
                logs,
                footer: Rect::ZERO,
            };
        }

        let [header, tab, main, logs, footer] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(log_height),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area);

        LayoutAreas {
            header,
            tab_bar: Self::split_tab_bar(tab),
            main,
            logs,
            footer,
        }
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}
