use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::ui::format::{fit, format_start};
use crate::ui::layout::LayoutAreas;
use bracket_engine::{Division, ResolvedGame, ResolvedSlot, Side};

static TABS: &[&str; 4] = &["Schedule", "Bracket", "Enter Scores", "Standings"];

const HELP_TEXT: &str = "q=quit  1=Schedule  2=Bracket  3=Enter Scores  4=Standings  Tab/Shift-Tab=cycle tabs
f=full screen  \"=logs  ?=help  Esc=back

Enter Scores: j/k=game  h/l=side  Enter/Space=other side  0-9 and -=type  Backspace=delete  x=clear side";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_header(f, layout.header, app);
            draw_tabs(f, layout.tab_bar, app);
            draw_footer(f, layout.footer, app);
        }

        // Resolve once per frame; every tab reads the same snapshot.
        let games = app.resolver().resolve_all();

        match app.state.active_tab {
            MenuItem::Schedule => draw_schedule(f, layout.main, app, &games),
            MenuItem::Bracket => draw_bracket(f, layout.main, app, &games),
            MenuItem::Scores => draw_scores(f, layout.main, app, &games),
            MenuItem::Standings => draw_standings(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(
            app.tournament.name.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(app.tournament.dates.as_str(), Style::default().fg(Color::Gray))),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Help => app.state.previous_tab.tab_index(),
        tab => tab.tab_index(),
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let [venue, clock] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(10)]).areas(area);
    f.render_widget(
        Paragraph::new(app.tournament.venue.as_str()).style(Style::default().fg(Color::DarkGray)),
        venue,
    );
    f.render_widget(
        Paragraph::new(app.state.now.format("%-I:%M %p").to_string())
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        clock,
    );
}

/// Split the main area into one pane per division, side by side when there
/// is room.
fn division_panes(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints = vec![Constraint::Fill(1); count];
    let layout = if area.width >= 100 {
        Layout::horizontal(constraints)
    } else {
        Layout::vertical(constraints)
    };
    layout.split(area).to_vec()
}

fn division_games<'g>(division: &Division, games: &'g [ResolvedGame]) -> Vec<&'g ResolvedGame> {
    games
        .iter()
        .filter(|g| division.games.iter().any(|d| d.id == g.id))
        .collect()
}

fn slot_span(slot: &ResolvedSlot) -> Span<'static> {
    let style = if slot.is_pending() {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(Color::White)
    };
    Span::styled(slot.to_string(), style)
}

fn draw_schedule(f: &mut Frame, area: Rect, app: &App, games: &[ResolvedGame]) {
    let divisions = app.tournament.divisions();
    for (division, pane) in divisions.iter().zip(division_panes(area, divisions.len())) {
        let block = default_border(Color::White).title(format!(" {} Schedule ", division.name));
        let inner = block.inner(pane);
        f.render_widget(block, pane);

        let mut lines = Vec::new();
        for game in division_games(division, games) {
            let when = app
                .tournament
                .find_game(game.id)
                .and_then(|g| g.start)
                .map(format_start)
                .unwrap_or_else(|| "TBD".to_string());
            lines.push(Line::from(vec![
                Span::styled(format!("{when} - "), Style::default().fg(Color::Gray)),
                Span::raw(format!("{}: ", game.title)),
                slot_span(game.slot(Side::A)),
                Span::raw(" vs "),
                slot_span(game.slot(Side::B)),
            ]));
        }
        f.render_widget(Paragraph::new(lines), inner);
    }
}

fn draw_bracket(f: &mut Frame, area: Rect, app: &App, games: &[ResolvedGame]) {
    let divisions = app.tournament.divisions();
    for (division, pane) in divisions.iter().zip(division_panes(area, divisions.len())) {
        let block = default_border(Color::White).title(format!(" {} Bracket ", division.name));
        let inner = block.inner(pane);
        f.render_widget(block, pane);

        let mut lines = Vec::new();
        for game in division_games(division, games) {
            lines.push(Line::from(Span::styled(
                game.title.clone(),
                Style::default().fg(Color::Yellow),
            )));
            let score = game.score;
            for side in [Side::A, Side::B] {
                let runs = score
                    .map(|(a, b)| match side {
                        Side::A => a.to_string(),
                        Side::B => b.to_string(),
                    })
                    .unwrap_or_else(|| "--".to_string());
                let marker = if game.winning_side() == Some(side) { "▶ " } else { "  " };
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    slot_span(game.slot(side)),
                    Span::styled(format!("  {runs}"), Style::default().fg(Color::Gray)),
                ]));
            }
            lines.push(Line::from(""));
        }
        if let Some(url) = division.bracket_image.as_deref() {
            lines.push(Line::from(Span::styled(
                format!("Bracket sheet: {url}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
        f.render_widget(Paragraph::new(lines), inner);
    }
}

fn draw_scores(f: &mut Frame, area: Rect, app: &App, games: &[ResolvedGame]) {
    let block = default_border(Color::White).title(" Enter Scores ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [legend, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new("Keys: j/k=game  h/l=side  0-9=type  Backspace=delete  x=clear  Esc=back")
            .style(Style::default().fg(Color::DarkGray)),
        legend,
    );

    let name_width = (content.width.saturating_sub(20) / 2).clamp(8, 28) as usize;
    let entry = app.state.entry;
    let mut lines = Vec::with_capacity(games.len());

    for (idx, game) in games.iter().enumerate() {
        let selected = idx == entry.selected;
        let marker = if selected { ">" } else { " " };
        let input = |side: Side| {
            let raw = app.scores.raw_side(game.id, side);
            let active = selected && entry.side == side;
            let text = if active { format!("[{:>3}_]", raw) } else { format!("[{:>4}]", raw) };
            let style = if active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(text, style)
        };
        let team_a = format!("{:>width$}", game.slot(Side::A).to_string(), width = name_width);
        lines.push(Line::from(vec![
            Span::raw(format!("{marker} ")),
            Span::styled(fit(&team_a, name_width), team_style(game.slot(Side::A))),
            Span::raw(" "),
            input(Side::A),
            Span::raw(" vs "),
            input(Side::B),
            Span::raw(" "),
            Span::styled(
                fit(&game.slot(Side::B).to_string(), name_width),
                team_style(game.slot(Side::B)),
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines), content);
}

fn team_style(slot: &ResolvedSlot) -> Style {
    if slot.is_pending() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    }
}

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Standings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows: Vec<Row> = app
        .standings()
        .compute_standings()
        .into_iter()
        .map(|r| {
            Row::new(vec![
                r.team.clone(),
                r.division.clone(),
                r.games_played.to_string(),
                r.runs_earned.to_string(),
                r.runs_allowed.to_string(),
                format!("{:+}", r.run_differential()),
            ])
        })
        .collect();

    let header = Row::new(vec![
        "Team",
        "Division",
        "Games Played",
        "Runs Earned",
        "Runs Allowed",
        "Diff",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let table = Table::new(
        rows,
        [
            Constraint::Fill(3),
            Constraint::Length(9),
            Constraint::Length(13),
            Constraint::Length(12),
            Constraint::Length(13),
            Constraint::Length(5),
        ],
    )
    .header(header);
    f.render_widget(table, inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    f.render_widget(
        TuiLoggerWidget::default()
            .block(default_border(Color::DarkGray).title(" Logs "))
            .style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}
