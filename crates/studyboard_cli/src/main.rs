//! Terminal frontend for the StudyBoard dashboard.
//!
//! Usage: `studyboard_cli [STORE_PATH]`
//!
//! The store path falls back to `STUDYBOARD_DATA`, then `studyboard.db` in
//! the working directory. Set `STUDYBOARD_LOG_DIR` to an absolute path to
//! enable rolling file logs.

mod app;
mod widget;

use std::env;
use std::io;
use std::process::ExitCode;

use studyboard_core::{default_log_level, init_logging, open_store};

use crate::app::App;

fn main() -> ExitCode {
    if let Ok(log_dir) = env::var("STUDYBOARD_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging unavailable: {err}");
        }
    }

    let path = env::args()
        .nth(1)
        .or_else(|| env::var("STUDYBOARD_DATA").ok())
        .unwrap_or_else(|| "studyboard.db".to_string());

    let conn = match open_store(&path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("cannot open store at `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = match App::new(&conn) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("cannot initialize dashboard: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    if let Err(err) = app.run(&mut input, &mut out) {
        eprintln!("io failure: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
