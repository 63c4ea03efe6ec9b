//! Terminal explorer for a loaded dataset
//!
//! The sidebar edits the filter criteria; every change recomputes the
//! view from the full dataset. The main pane shows the current page or
//! the charts.

pub mod ui;

use crate::config::ExplorerConfig;

use std::io::Stdout;
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notescope_core::{compute_view, Dataset, Page, ViewResult};
use notescope_filters::FilterCriteria;
use ratatui::{backend::CrosstermBackend, Terminal};

// ─── App state ───────────────────────────────────────────────────────────────

/// Sidebar field with keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Keyword,
    Language,
    Sentiment,
    Week,
    Political,
    Hateful,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Keyword,
        Focus::Language,
        Focus::Sentiment,
        Focus::Week,
        Focus::Political,
        Focus::Hateful,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Table,
    Charts,
}

/// Options of one selector plus the current position. `All` is always first.
#[derive(Debug, Clone)]
pub struct Choice {
    pub options: Vec<String>,
    pub index: usize,
}

impl Choice {
    /// Position on `current`; a value missing from `options` (e.g. a stale
    /// week from a config file) is appended so it stays selectable
    fn new(mut options: Vec<String>, current: &str) -> Self {
        let index = match options.iter().position(|o| o == current) {
            Some(i) => i,
            None => {
                options.push(current.to_string());
                options.len() - 1
            }
        };
        Self { options, index }
    }

    pub fn current(&self) -> &str {
        self.options.get(self.index).map(String::as_str).unwrap_or("All")
    }

    /// A selector offering only `All` is disabled
    pub fn is_enabled(&self) -> bool {
        self.options.len() > 1
    }

    /// Step to the neighbouring option, wrapping. Returns false when disabled.
    fn cycle(&mut self, forward: bool) -> bool {
        let len = self.options.len();
        if len <= 1 {
            return false;
        }
        self.index = if forward {
            (self.index + 1) % len
        } else {
            (self.index + len - 1) % len
        };
        true
    }
}

pub struct App<'a> {
    pub dataset: &'a Dataset,
    /// File name shown in the title bar
    pub source: String,
    pub export_path: PathBuf,
    pub criteria: FilterCriteria,
    pub language: Choice,
    pub sentiment: Choice,
    pub week: Choice,
    pub political: Choice,
    pub hateful: Choice,
    pub focus: Focus,
    pub pane: Pane,
    /// 1-based, always within `1..=total_pages`
    pub page: usize,
    pub view: ViewResult<'a>,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(dataset: &'a Dataset, source: &Path, session: ExplorerConfig) -> Self {
        let options = dataset.options();
        let export_path = session.output_or_default();
        let criteria = session.criteria;

        let language = Choice::new(options.languages, &criteria.language.to_string());
        let sentiment = Choice::new(options.sentiments, &criteria.sentiment.to_string());
        let week = Choice::new(options.weeks, &criteria.week.to_string());
        let political = Choice::new(options.political, &criteria.is_political.to_string());
        let hateful = Choice::new(options.hateful, &criteria.is_hateful.to_string());

        let view = compute_view(dataset, &criteria);
        let source = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());

        Self {
            dataset,
            source,
            export_path,
            criteria,
            language,
            sentiment,
            week,
            political,
            hateful,
            focus: Focus::Keyword,
            pane: Pane::Table,
            page: 1,
            view,
            status: None,
            should_quit: false,
        }
    }

    fn choice_mut(&mut self, focus: Focus) -> Option<&mut Choice> {
        match focus {
            Focus::Keyword => None,
            Focus::Language => Some(&mut self.language),
            Focus::Sentiment => Some(&mut self.sentiment),
            Focus::Week => Some(&mut self.week),
            Focus::Political => Some(&mut self.political),
            Focus::Hateful => Some(&mut self.hateful),
        }
    }

    /// Move the focused selector to its next or previous option
    pub fn cycle(&mut self, forward: bool) {
        let focus = self.focus;
        let Some(choice) = self.choice_mut(focus) else {
            return;
        };
        if !choice.cycle(forward) {
            return;
        }
        let value = choice.current().to_string();
        self.apply(focus, &value);
    }

    fn apply(&mut self, focus: Focus, value: &str) {
        let criteria = &mut self.criteria;
        let result = match focus {
            Focus::Keyword => Ok(()),
            Focus::Language => value.parse().map(|v| criteria.language = v),
            Focus::Sentiment => value.parse().map(|v| criteria.sentiment = v),
            Focus::Week => value.parse().map(|v| criteria.week = v),
            Focus::Political => value.parse().map(|v| criteria.is_political = v),
            Focus::Hateful => value.parse().map(|v| criteria.is_hateful = v),
        };

        match result {
            Ok(()) => self.criteria_changed(),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    pub fn type_char(&mut self, c: char) {
        self.criteria.keyword.push(c);
        self.criteria_changed();
    }

    pub fn backspace(&mut self) {
        if self.criteria.keyword.pop().is_some() {
            self.criteria_changed();
        }
    }

    pub fn clear_keyword(&mut self) {
        if !self.criteria.keyword.is_empty() {
            self.criteria.keyword.clear();
            self.criteria_changed();
        }
    }

    fn criteria_changed(&mut self) {
        self.page = 1;
        self.status = None;
        self.refresh();
    }

    /// Recompute the view from the full dataset
    pub fn refresh(&mut self) {
        self.view = compute_view(self.dataset, &self.criteria);
        self.page = self.page.clamp(1, self.total_pages());
    }

    pub fn total_pages(&self) -> usize {
        self.view.subset.total_pages()
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.total_pages());
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn current_page(&self) -> Page<'a> {
        self.view.page(self.page)
    }

    pub fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Table => Pane::Charts,
            Pane::Charts => Pane::Table,
        };
    }

    /// Write the filtered subset to the export path
    pub fn export(&mut self) {
        self.status = Some(match self.view.subset.export(&self.export_path) {
            Ok(rows) => format!("Exported {} rows to {}", rows, self.export_path.display()),
            Err(e) => format!("Export failed: {}", e),
        });
    }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

pub fn run_tui(dataset: &Dataset, source: &Path, session: ExplorerConfig) -> Result<()> {
    let mut app = App::new(dataset, source, session);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, &mut app);

    // Always restore the terminal, even on error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Nothing runs in the background; block until the next event
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let editing = app.focus == Focus::Keyword;

    match key.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('s') if ctrl => app.export(),
        KeyCode::Tab | KeyCode::Down => app.focus = app.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.focus = app.focus.prev(),
        KeyCode::Left => app.cycle(false),
        KeyCode::Right => app.cycle(true),
        KeyCode::PageDown => app.next_page(),
        KeyCode::PageUp => app.prev_page(),
        KeyCode::Backspace if editing => app.backspace(),
        KeyCode::Esc if editing => app.clear_keyword(),
        KeyCode::Char(c) if editing && !ctrl => app.type_char(c),
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('v') => app.toggle_pane(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notescope_filters::{LanguageSelector, Selector};
    use notescope_formats::CsvReader;

    fn dataset(rows: usize) -> Dataset {
        let mut csv = String::from(
            "tweetId,createdAtMillis,detected_language,sentiment_category,is_political,summary_en\n",
        );
        for i in 0..rows {
            let lang = ["hi", "en", "ta"][i % 3];
            let sentiment = ["positive", "neutral", "negative"][i % 3];
            let millis = 1_704_240_000_000u64 + (i as u64 % 2) * 604_800_000;
            csv.push_str(&format!(
                "{},{},{},{},{},note {} about taxes\n",
                100 + i,
                millis,
                lang,
                sentiment,
                i % 2 == 0,
                i
            ));
        }
        Dataset::from_reader(CsvReader::new(csv.as_bytes()).unwrap()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app(ds: &Dataset) -> App<'_> {
        App::new(ds, Path::new("notes.csv"), ExplorerConfig::default())
    }

    #[test]
    fn test_focus_wraps() {
        assert_eq!(Focus::Keyword.prev(), Focus::Hateful);
        assert_eq!(Focus::Hateful.next(), Focus::Keyword);
        assert_eq!(Focus::Language.next(), Focus::Sentiment);
    }

    #[test]
    fn test_initial_state() {
        let ds = dataset(120);
        let app = app(&ds);

        assert_eq!(app.source, "notes.csv");
        assert_eq!(app.page, 1);
        assert_eq!(app.total_pages(), 3);
        assert_eq!(app.view.summary.filtered_rows, 120);
        assert_eq!(app.view.summary.india_count, Some(80));
        assert!(!app.hateful.is_enabled());
        assert!(app.week.is_enabled());
    }

    #[test]
    fn test_paging_is_clamped() {
        let ds = dataset(120);
        let mut app = app(&ds);

        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.page, 1);
        for _ in 0..5 {
            press(&mut app, KeyCode::PageDown);
        }
        assert_eq!(app.page, 3);
        assert_eq!(app.current_page().rows.len(), 20);
    }

    #[test]
    fn test_selector_change_resets_page() {
        let ds = dataset(120);
        let mut app = app(&ds);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.page, 2);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Language);
        press(&mut app, KeyCode::Right);

        assert_eq!(app.criteria.language, LanguageSelector::India);
        assert_eq!(app.page, 1);
        assert_eq!(app.view.summary.filtered_rows, 80);
    }

    #[test]
    fn test_cycle_wraps_back_to_all() {
        let ds = dataset(6);
        let mut app = app(&ds);
        app.focus = Focus::Political;

        press(&mut app, KeyCode::Left);
        assert_eq!(app.criteria.is_political, Selector::Only(false));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.criteria.is_political, Selector::Only(true));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.criteria.is_political, Selector::All);
    }

    #[test]
    fn test_disabled_selector_ignores_keys() {
        let ds = dataset(6);
        let mut app = app(&ds);
        app.focus = Focus::Hateful;

        press(&mut app, KeyCode::Right);
        assert!(app.criteria.is_hateful.is_all());
    }

    #[test]
    fn test_keyword_typing() {
        let ds = dataset(6);
        let mut app = app(&ds);

        for c in "note 5".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.criteria.keyword, "note 5");
        assert_eq!(app.view.summary.filtered_rows, 1);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.criteria.keyword, "note ");
        press(&mut app, KeyCode::Esc);
        assert!(app.criteria.keyword.is_empty());
        assert_eq!(app.view.summary.filtered_rows, 6);
    }

    #[test]
    fn test_q_and_v_outside_keyword() {
        let ds = dataset(6);
        let mut app = app(&ds);
        app.focus = Focus::Week;

        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.pane, Pane::Charts);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let ds = dataset(6);
        let mut app = app(&ds);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(app.criteria.keyword.is_empty());
    }

    #[test]
    fn test_stale_week_from_config() {
        let ds = dataset(6);
        let session = ExplorerConfig {
            criteria: FilterCriteria {
                week: Selector::Only("2020-01-06".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let app = App::new(&ds, Path::new("notes.csv"), session);

        assert_eq!(app.week.current(), "2020-01-06");
        assert!(app.view.subset.is_empty());
        assert_eq!(app.total_pages(), 1);
    }

    #[test]
    fn test_export_writes_file() {
        let ds = dataset(6);
        let dir = tempfile::tempdir().unwrap();
        let session = ExplorerConfig {
            output: Some(dir.path().join("out.csv")),
            ..Default::default()
        };
        let mut app = App::new(&ds, Path::new("notes.csv"), session);
        app.focus = Focus::Language;
        press(&mut app, KeyCode::Right);

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        let written = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert_eq!(written.lines().count(), 5);
        assert!(written.lines().next().unwrap().ends_with(",week"));
        assert!(app.status.unwrap().starts_with("Exported 4 rows"));
    }
}
