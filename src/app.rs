//=========================================================================
// Application Lifecycle
//=========================================================================
//
// Entry-point scaffolding around a window.
//
//   AppRunner::from_env() ──start(app)──► init_logging ► App::run ► App::quit
//                                                           │
//                                                  Err ──► exit code 1
//
//=========================================================================

//=== External Dependencies ===============================================

use env_logger::{Builder, Env};
use log::*;

//=== Logging =============================================================

/// Installs the `env_logger` sink.
///
/// The level is `debug` in debug mode and `info` otherwise; `RUST_LOG`
/// overrides both. Later calls leave the installed logger in place.
pub fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    if Builder::from_env(Env::default().default_filter_or(level)).try_init().is_err() {
        debug!(target: "app", "Logger already installed");
    }
}

//=== AppContext ==========================================================

/// Process-level state shared with the running [`App`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppContext {
    /// Command line, program name included.
    pub args: Vec<String>,

    /// Set when `-d` or `--debug` was passed.
    pub debug: bool,

    /// Returned by [`AppRunner::start`].
    pub exit_code: i32,
}

impl AppContext {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let debug = args.iter().any(|arg| arg == "-d" || arg == "--debug");

        Self {
            args,
            debug,
            exit_code: 0,
        }
    }
}

//=== App Trait ===========================================================

/// An application driven by [`AppRunner`].
///
/// ```no_run
/// use stagehand::app::{App, AppContext, AppRunner};
/// use stagehand::prelude::*;
///
/// struct Demo;
///
/// impl App for Demo {
///     fn run(&mut self, _ctx: &mut AppContext) -> anyhow::Result<()> {
///         Window::builder().title("Demo").build().open(&mut ())?;
///         Ok(())
///     }
/// }
///
/// std::process::exit(AppRunner::from_env().start(&mut Demo));
/// ```
pub trait App {
    /// The application body.
    fn run(&mut self, ctx: &mut AppContext) -> anyhow::Result<()>;

    /// Shutdown work. Runs after `run`, also when it failed.
    fn quit(&mut self, _ctx: &mut AppContext) {}
}

//=== AppRunner ===========================================================

#[derive(Debug)]
pub struct AppRunner {
    context: AppContext,
}

impl AppRunner {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            context: AppContext::new(args),
        }
    }

    /// A runner for the process's own command line.
    pub fn from_env() -> Self {
        Self::new(std::env::args())
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Runs `app` and returns its exit code.
    ///
    /// A failed `run` is logged and yields exit code 1 unless the app set
    /// a non-zero code itself.
    pub fn start<A: App + ?Sized>(mut self, app: &mut A) -> i32 {
        init_logging(self.context.debug);
        info!(target: "app", "Starting (debug: {})", self.context.debug);

        if let Err(err) = app.run(&mut self.context) {
            error!(target: "app", "Application failed: {:#}", err);
            if self.context.exit_code == 0 {
                self.context.exit_code = 1;
            }
        }

        app.quit(&mut self.context);
        info!(target: "app", "Exiting with code {}", self.context.exit_code);
        self.context.exit_code
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
