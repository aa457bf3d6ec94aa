//! Terminal drawing and key bindings. Drawing reads the session; keys become [`Command`]s.

use std::io::{self, Stdout};
use std::panic;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::present;
use crate::session::{Command, Session, View};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

const TITLE: &str = "🏒 HOQUEI PATINS - COMPETICIÓ";

const HELP_LINES: [&str; 9] = [
    "Controls:",
    "",
    "↑/↓ - Navegar",
    "PageUp/PageDown - Pàgina",
    "Enter/E - Detalls del partit",
    "F - Filtres",
    "/ - Cercar",
    "R - Refrescar",
    "Q - Sortir",
];

pub fn init() -> io::Result<Tui> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

pub fn restore(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Leave raw mode and the alternate screen, and show the cursor again.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Put the terminal back before the panic message is printed.
pub fn install_panic_hook() {
    install_panic_hook_with(|| {
        let _ = restore_terminal();
    });
}

/// Chain `restore` in front of the current panic hook.
pub fn install_panic_hook_with(restore: impl Fn() + Send + Sync + 'static) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

/// Map a key press to a command for the current view.
pub fn command_for(view: View, key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    match view {
        View::Fixtures => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Refresh),
            KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::OpenFilters),
            KeyCode::Char('/') => Some(Command::OpenSearch),
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => Some(Command::ShowHelp),
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => Some(Command::OpenDetail),
            KeyCode::Up => Some(Command::ScrollUp),
            KeyCode::Down => Some(Command::ScrollDown),
            KeyCode::PageUp => Some(Command::PageUp),
            KeyCode::PageDown => Some(Command::PageDown),
            _ => None,
        },
        View::FilterPicker => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Command::PickerUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::PickerDown),
            KeyCode::Enter => Some(Command::ChooseFilter),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::CloseOverlay),
            _ => None,
        },
        View::Search => match key.code {
            KeyCode::Esc => Some(Command::SearchCancel),
            KeyCode::Enter => Some(Command::SearchAccept),
            KeyCode::Backspace => Some(Command::SearchBackspace),
            KeyCode::Char(c) => Some(Command::SearchInput(c)),
            _ => None,
        },
        View::Detail => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::CloseOverlay),
            _ => None,
        },
        View::Help => Some(Command::CloseOverlay),
    }
}

pub fn draw(frame: &mut Frame, session: &Session) {
    let [title, body, status] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)]).areas(frame.area());

    render_title(frame, title);
    render_body(frame, body, session);
    render_status(frame, status, session);

    match session.view() {
        View::FilterPicker => render_picker(frame, body, session),
        View::Search => render_search(frame, body, session),
        View::Help => render_help(frame, body),
        View::Detail => render_detail(frame, body, session),
        View::Fixtures => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(TITLE).style(Style::default().fg(Color::Green).bold()).alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_body(frame: &mut Frame, area: Rect, session: &Session) {
    let scroll = u16::try_from(session.scroll()).unwrap_or(u16::MAX);
    let selected = session.selected_line();
    let lines: Vec<Line> = session
        .body()
        .lines()
        .enumerate()
        .map(|(i, text)| {
            let line = Line::from(text.to_string());
            if Some(i) == selected { line.style(Style::default().bg(Color::DarkGray)) } else { line }
        })
        .collect();
    let body = Paragraph::new(lines)
        .scroll((scroll, 0))
        .block(Block::bordered().title(" Partits ").border_style(Style::default().fg(Color::Cyan)));
    frame.render_widget(body, area);
}

fn render_status(frame: &mut Frame, area: Rect, session: &Session) {
    let lines = vec![Line::from(session.summary()), Line::from(session.message().to_string())];
    let status = Paragraph::new(lines).style(Style::default().fg(Color::White).bg(Color::Blue));
    frame.render_widget(status, area);
}

fn render_picker(frame: &mut Frame, area: Rect, session: &Session) {
    let names = session.filter_names();
    let height = u16::try_from(names.len() + 4).unwrap_or(u16::MAX).min(20);
    let popup = centered(area, 60, height);
    let items: Vec<ListItem> = names.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(Block::bordered().title(" Seleccionar filtre ").border_style(Style::default().fg(Color::Cyan)))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol(">> ");
    let mut state = ListState::default().with_selected(Some(session.picker_cursor()));
    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut state);
}

fn render_search(frame: &mut Frame, area: Rect, session: &Session) {
    let prompt_area = Rect { height: area.height.min(3), ..area };
    let prompt = Paragraph::new(format!("/{}", session.query()))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::bordered().title(" CERCAR (conté) ").border_style(Style::default().fg(Color::Green)));
    frame.render_widget(Clear, prompt_area);
    frame.render_widget(prompt, prompt_area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 50, 12);
    let help = Paragraph::new(HELP_LINES.iter().map(|l| Line::from(*l)).collect::<Vec<_>>())
        .block(Block::bordered().title(" AJUDA "));
    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

fn render_detail(frame: &mut Frame, area: Rect, session: &Session) {
    let Some(fixture) = session.selected() else {
        return;
    };
    let mut lines = present::detail_lines(fixture).into_iter().map(Line::from);
    let mut text = vec![Line::from("")];
    text.extend(lines.next().map(|l| l.style(Style::default().fg(Color::Cyan).bold())));
    text.extend(lines);
    let detail = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title(" Detalls ").border_style(Style::default().fg(Color::Cyan)));
    frame.render_widget(Clear, area);
    frame.render_widget(detail, area);
}

/// A rect of `width_pct` percent width and `height` rows, centred in `area`.
fn centered(area: Rect, width_pct: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_pct) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
