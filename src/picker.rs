//! Full-screen fixture list: j/k or arrows to move, Enter to pick, q/Esc to quit.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::model::Fixture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    None,
    Pick(usize),
    Quit,
}

/// Selection state, kept apart from the terminal so key handling is testable.
#[derive(Debug, Clone)]
pub struct PickerState {
    len: usize,
    selected: usize,
}

impl PickerState {
    pub fn new(len: usize) -> Self {
        Self { len, selected: 0 }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn on_key(&mut self, key: KeyEvent) -> PickerAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => PickerAction::Quit,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.len > 0 {
                    self.selected = (self.selected + 1) % self.len;
                }
                PickerAction::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.len > 0 {
                    self.selected = (self.selected + self.len - 1) % self.len;
                }
                PickerAction::None
            }
            KeyCode::Enter if self.len > 0 => PickerAction::Pick(self.selected),
            _ => PickerAction::None,
        }
    }
}

pub fn fixture_line(idx: usize, f: &Fixture) -> String {
    let md = f
        .matchday
        .map(|m| m.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "{}. MD {md} | {} vs {} | {}",
        idx + 1,
        f.home_name,
        f.away_name,
        f.kickoff_label()
    )
}

/// Shows the list and returns the chosen index, or `None` when the user quits.
pub fn pick_fixture(fixtures: &[Fixture], competition: &str) -> io::Result<Option<usize>> {
    if fixtures.is_empty() {
        return Ok(None);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_picker(&mut terminal, fixtures, competition);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run_picker<B: Backend>(
    terminal: &mut Terminal<B>,
    fixtures: &[Fixture],
    competition: &str,
) -> io::Result<Option<usize>> {
    let mut state = PickerState::new(fixtures.len());
    let mut list_state = ListState::default();

    loop {
        list_state.select(Some(state.selected()));
        terminal.draw(|f| ui(f, fixtures, competition, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match state.on_key(key) {
                PickerAction::Pick(idx) => return Ok(Some(idx)),
                PickerAction::Quit => return Ok(None),
                PickerAction::None => {}
            }
        }
    }
}

fn ui(frame: &mut Frame, fixtures: &[Fixture], competition: &str, list_state: &mut ListState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.size());

    let items: Vec<ListItem> = fixtures
        .iter()
        .enumerate()
        .map(|(idx, f)| ListItem::new(fixture_line(idx, f)))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Upcoming {competition} Fixtures ")),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[0], list_state);

    let footer = Paragraph::new("j/k move  Enter predict  q quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[1]);
}
