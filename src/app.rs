use crate::checklist::ChecklistTree;
use crate::config::{Config, Hotkeys};
use crate::error::AppError;
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{CustomLogger, LogBuffer};
use crate::state::State;
use crate::store::FileStore;
use crate::ui::{Router, Theme};
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdout};
use std::path::PathBuf;

/// Paths given on the command line, taking precedence over the configuration.
///
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub checklist_file: Option<PathBuf>,
    pub state_file: Option<PathBuf>,
}

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: State,
    router: Router,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub fn start(config: Config, overrides: Overrides) -> Result<()> {
        let log = LogBuffer::new();
        CustomLogger::init(config.log_level_filter(), log.clone())?;

        info!("Starting application...");
        if let Some(path) = config.file_path() {
            if config.was_created() {
                info!("Wrote default configuration to {}", path.display());
            } else {
                debug!("Using configuration at {}", path.display());
            }
        }
        let checklist_file = overrides
            .checklist_file
            .or_else(|| config.checklist_file.clone());
        let tree = ChecklistTree::load(checklist_file.as_deref())?;
        info!("Loaded {} checklist categories", tree.categories().len());

        let state_file = match overrides.state_file {
            Some(path) => path,
            None => config.state_file_path()?,
        };
        debug!("Persisting item statuses to {}", state_file.display());

        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default", config.theme_name);
            Theme::default()
        });
        let state = State::new(tree, Box::new(FileStore::new(state_file)))
            .with_resume_on_enter(config.resume_on_enter)
            .with_theme(theme)
            .with_hotkeys(Hotkeys::with_overrides(&config.hotkeys))
            .with_log(log);

        let mut app = App {
            state,
            router: Router::default(),
        };
        app.start_ui()?;

        info!("Exiting application...");
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    fn start_ui(&mut self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)
            .and_then(|_| enable_raw_mode())
            .map_err(|e| AppError::Terminal(e.to_string()))?;

        let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore_terminal()?;
                return Err(AppError::Terminal(e.to_string()).into());
            }
        };

        // Errors from here on must not skip the teardown below.
        let result = terminal
            .hide_cursor()
            .map_err(anyhow::Error::from)
            .and_then(|_| self.run(&mut terminal));

        restore_terminal()?;
        terminal.show_cursor()?;

        result
    }

    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            self.state.process_messages();
            terminal.draw(|frame| crate::ui::render(frame, &self.state, &self.router))?;
            if !terminal_event_handler.handle_next(&mut self.state, &self.router)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}

/// Leave raw mode and the alternate screen.
///
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
