use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    constants::TIME_SETTINGS,
    domain::{BlockKey, plan::PlanField},
    error::StoreError,
    storage::FileStore,
    store::StateStore,
    timer::{CountdownBoard, TimerSlot},
};

mod books_view;
mod event_handlers;
mod input_modal_view;
mod plan_view;
mod render_views;
mod ui_helpers;
mod view_style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Dashboard,
    Today,
    Plan,
    Books,
    Settings,
}

impl Tab {
    const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Today,
        Tab::Plan,
        Tab::Books,
        Tab::Settings,
    ];

    fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Today => "Today",
            Tab::Plan => "90-Day Plan",
            Tab::Books => "Books",
            Tab::Settings => "Settings",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|&tab| tab == self).unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InputTarget {
    NewTask(BlockKey),
    BlockTopic(BlockKey),
    BlockLink(BlockKey),
    Notes,
    Reflection,
    PlanField { day: u32, field: PlanField },
    BookNotes(usize),
    BookLink(usize),
    StartDate,
    CurrentDay,
    ExportPath,
    ImportPath,
}

impl InputTarget {
    fn prompt(self) -> String {
        match self {
            InputTarget::NewTask(key) => format!("New task for block {}", key),
            InputTarget::BlockTopic(key) => format!("Topic for block {}", key),
            InputTarget::BlockLink(key) => format!("Link for block {}", key),
            InputTarget::Notes => "Notes for today".to_string(),
            InputTarget::Reflection => "Reflection".to_string(),
            InputTarget::PlanField { day, field } => format!("Day {} · {}", day, field),
            InputTarget::BookNotes(_) => "Your notes".to_string(),
            InputTarget::BookLink(_) => "Book link".to_string(),
            InputTarget::StartDate => "Start date (YYYY-MM-DD)".to_string(),
            InputTarget::CurrentDay => "Current day (1-90)".to_string(),
            InputTarget::ExportPath => "Export to".to_string(),
            InputTarget::ImportPath => "Import from".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UiMode {
    Main,
    Input(InputTarget),
    Focus(BlockKey),
}

struct App {
    store: StateStore<FileStore>,
    timers: CountdownBoard,
    tab: Tab,
    ui_mode: UiMode,
    selected_block: BlockKey,
    selected_task: usize,
    selected_plan_day: usize,
    selected_book: usize,
    input_buffer: String,
    status: Option<String>,
    render_needed: bool,
}

impl App {
    fn new(store: StateStore<FileStore>) -> Self {
        let selected_plan_day = store.state().current_day.saturating_sub(1) as usize;
        Self {
            store,
            timers: CountdownBoard::new(),
            tab: Tab::Dashboard,
            ui_mode: UiMode::Main,
            selected_block: BlockKey::A,
            selected_task: 0,
            selected_plan_day,
            selected_book: 0,
            input_buffer: String::new(),
            status: None,
            render_needed: true,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.render_needed = true;
    }

    /// Surfaces a persistence failure in the status line. The in-memory
    /// change stays applied.
    fn report<T>(&mut self, result: Result<T, StoreError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("event=ui_action status=error reason={}", e);
                self.set_status(format!("Error: {}", e));
                None
            }
        }
    }

    fn open_input(&mut self, target: InputTarget, initial: String) {
        self.ui_mode = UiMode::Input(target);
        self.input_buffer = initial;
        self.render_needed = true;
    }

    fn close_input(&mut self) {
        self.ui_mode = UiMode::Main;
        self.input_buffer.clear();
        self.render_needed = true;
    }

    fn in_focus(&self) -> bool {
        matches!(self.ui_mode, UiMode::Focus(_))
    }

    fn start_focus(&mut self, key: BlockKey) {
        let now = Instant::now();
        let length = Duration::from_secs(TIME_SETTINGS.focus_secs);
        self.timers.start(TimerSlot::Block(key), length, now);
        self.timers.start(TimerSlot::Focus, length, now);
        self.ui_mode = UiMode::Focus(key);
        info!("event=focus_start block={}", key);
        self.render_needed = true;
    }

    fn stop_focus(&mut self) {
        self.timers.cancel(TimerSlot::Focus);
        self.ui_mode = UiMode::Main;
        self.render_needed = true;
    }

    fn tick_timers(&mut self) {
        for slot in self.timers.take_finished(Instant::now()) {
            match slot {
                TimerSlot::Focus => {
                    if self.in_focus() {
                        self.ui_mode = UiMode::Main;
                    }
                    self.set_status("Focus session complete!");
                }
                TimerSlot::Block(key) => {
                    self.set_status(format!("Block {} timer finished", key));
                }
            }
        }
    }

    fn has_running_timers(&self) -> bool {
        self.timers.is_running(TimerSlot::Focus)
            || BlockKey::ALL
                .iter()
                .any(|&key| self.timers.is_running(TimerSlot::Block(key)))
    }
}

pub fn run_ui(store: StateStore<FileStore>) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);

    let tick_rate = Duration::from_millis(TIME_SETTINGS.tick_ms);
    let render_rate = Duration::from_millis(1000 / TIME_SETTINGS.target_fps);
    let mut last_tick = Instant::now();
    let mut last_render = Instant::now();

    loop {
        if last_tick.elapsed() >= tick_rate {
            app.tick_timers();
            if app.has_running_timers() {
                app.render_needed = true;
            }
            last_tick = Instant::now();
        }

        if last_render.elapsed() >= render_rate && app.render_needed {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed = false;
            last_render = Instant::now();
        }

        if event::poll(Duration::from_millis(20))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key)
        {
            break;
        }
    }

    if let Err(e) = app.store.save() {
        warn!("event=state_save status=error reason={}", e);
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
