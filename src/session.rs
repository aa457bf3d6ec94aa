//! The browsing session: everything the UI shows, and how each command changes it.
//!
//! `Session::handle` consumes the current session and returns the next one, plus an
//! [`Effect`] when the shell has work to do (fetching, quitting). Nothing in here does I/O.

use chrono::{DateTime, Utc};
use chrono_tz::Europe::Madrid;

use crate::filter;
use crate::model::filter::FilterDefinition;
use crate::model::fixture::FixtureRecord;
use crate::present;

/// Lines moved by PageUp/PageDown.
pub const PAGE_LINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Fixtures,
    FilterPicker,
    Search,
    Help,
    Detail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh,
    /// Outcome of a fetch started by [`Effect::Refresh`]; errors arrive already formatted.
    RefreshDone {
        result: Result<Vec<FixtureRecord>, String>,
        at: DateTime<Utc>,
    },
    SaveFailed(String),
    OpenFilters,
    PickerUp,
    PickerDown,
    ChooseFilter,
    OpenSearch,
    SearchInput(char),
    SearchBackspace,
    SearchAccept,
    SearchCancel,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ShowHelp,
    OpenDetail,
    CloseOverlay,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Refresh,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Session {
    fixtures: Vec<FixtureRecord>,
    filters: Vec<FilterDefinition>,
    active_filter: usize,
    query: String,
    visible: Vec<FixtureRecord>,
    view: View,
    scroll: usize,
    picker_cursor: usize,
    message: String,
    refreshing: bool,
}

impl Session {
    /// Start a session over loaded data. A catch-all filter is put first unless the filters
    /// file already starts with one or has one with the same name.
    pub fn new(fixtures: Vec<FixtureRecord>, mut filters: Vec<FilterDefinition>) -> Self {
        let all = FilterDefinition::all();
        let has_catch_all =
            filters.first().is_some_and(FilterDefinition::is_catch_all) || filters.iter().any(|f| f.name == all.name);
        if !has_catch_all {
            filters.insert(0, all);
        }
        let message = if fixtures.is_empty() {
            "No hi ha dades. Prem R per descarregar.".to_string()
        } else {
            format!("Carregats {} partits", fixtures.len())
        };
        let mut session = Self {
            fixtures,
            filters,
            active_filter: 0,
            query: String::new(),
            visible: Vec::new(),
            view: View::Fixtures,
            scroll: 0,
            picker_cursor: 0,
            message,
            refreshing: false,
        };
        session.recompute();
        session
    }

    /// Replace the status message, e.g. to report a file that failed to load.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn handle(mut self, command: Command) -> (Self, Option<Effect>) {
        let mut effect = None;
        match command {
            Command::Refresh => {
                if self.refreshing {
                    self.message = "Ja s'està refrescant, espera...".to_string();
                } else {
                    self.refreshing = true;
                    self.message = "Refrescant partits...".to_string();
                    effect = Some(Effect::Refresh);
                }
            }
            Command::RefreshDone { result, at } => {
                self.refreshing = false;
                match result {
                    Ok(fixtures) => {
                        let stamp = at.with_timezone(&Madrid).format("%H:%M");
                        self.message = format!("{} partits desats ({})", fixtures.len(), stamp);
                        self.fixtures = fixtures;
                        self.recompute();
                        self.clamp_scroll();
                    }
                    Err(reason) => {
                        self.message = format!("Error refrescant: {}", reason);
                    }
                }
            }
            Command::SaveFailed(reason) => {
                self.message = format!("No s'han pogut desar els partits: {}", reason);
            }
            Command::OpenFilters => {
                self.picker_cursor = self.active_filter;
                self.view = View::FilterPicker;
            }
            Command::PickerUp => {
                self.picker_cursor = self.picker_cursor.saturating_sub(1);
            }
            Command::PickerDown => {
                if self.picker_cursor + 1 < self.filters.len() {
                    self.picker_cursor += 1;
                }
            }
            Command::ChooseFilter => {
                if self.picker_cursor < self.filters.len() {
                    self.active_filter = self.picker_cursor;
                    self.query.clear();
                    self.recompute();
                    self.scroll = 0;
                    self.message = format!("Filtre: {} - {} partits", self.filters[self.active_filter].name, self.visible.len());
                }
                self.view = View::Fixtures;
            }
            Command::OpenSearch => {
                self.query.clear();
                self.recompute();
                self.view = View::Search;
            }
            Command::SearchInput(c) => {
                self.query.push(c);
                self.on_query_changed();
            }
            Command::SearchBackspace => {
                self.query.pop();
                self.on_query_changed();
            }
            Command::SearchAccept => {
                self.view = View::Fixtures;
            }
            Command::SearchCancel => {
                self.query.clear();
                self.recompute();
                self.scroll = 0;
                self.message = format!("{} partits", self.visible.len());
                self.view = View::Fixtures;
            }
            Command::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Command::ScrollDown => {
                self.scroll += 1;
                self.clamp_scroll();
            }
            Command::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_LINES),
            Command::PageDown => {
                self.scroll += PAGE_LINES;
                self.clamp_scroll();
            }
            Command::ShowHelp => self.view = View::Help,
            Command::OpenDetail => {
                if self.selected().is_some() {
                    self.view = View::Detail;
                } else {
                    self.message = "Cap partit seleccionat".to_string();
                }
            }
            Command::CloseOverlay => self.view = View::Fixtures,
            Command::Quit => effect = Some(Effect::Quit),
        }
        (self, effect)
    }

    fn on_query_changed(&mut self) {
        self.recompute();
        self.scroll = 0;
        self.message = if self.query.is_empty() {
            format!("Mostrant tots els partits: {}", self.visible.len())
        } else {
            format!("Cercant: \"{}\" - {} partits", self.query, self.visible.len())
        };
    }

    fn recompute(&mut self) {
        self.visible = if self.query.is_empty() {
            filter::apply(&self.fixtures, self.filters.get(self.active_filter))
        } else {
            filter::search(&self.fixtures, &self.query)
        };
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.body_lines().saturating_sub(1));
    }

    fn body_lines(&self) -> usize {
        self.visible.len().min(present::MAX_ROWS) + 2
    }

    pub fn fixtures(&self) -> &[FixtureRecord] {
        &self.fixtures
    }

    pub fn visible(&self) -> &[FixtureRecord] {
        &self.visible
    }

    pub fn active_filter(&self) -> Option<&FilterDefinition> {
        self.filters.get(self.active_filter)
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn picker_cursor(&self) -> usize {
        self.picker_cursor
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// The fixture on the topmost body line: the scroll offset past the header and rule.
    pub fn selected(&self) -> Option<&FixtureRecord> {
        self.visible.iter().take(present::MAX_ROWS).nth(self.scroll.saturating_sub(2))
    }

    /// Index of the selected fixture's line in [`Session::body`].
    pub fn selected_line(&self) -> Option<usize> {
        self.selected().map(|_| self.scroll.max(2))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Presenter output for the body region.
    pub fn body(&self) -> String {
        present::render(&self.visible)
    }

    /// Summary line for the status region.
    pub fn summary(&self) -> String {
        let name = if self.query.is_empty() {
            self.active_filter().map(|f| f.name.clone())
        } else {
            Some(format!("/{}", self.query))
        };
        present::status_line(self.visible.len(), name.as_deref())
    }
}
