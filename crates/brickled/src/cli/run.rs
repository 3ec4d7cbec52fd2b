//! `run` subcommand — interactive editor over stdin/stdout.

use std::io::BufRead;
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use brickled_lib::hooks::ShellRunner;
use brickled_lib::input::{Dispatch, LogicalInput};
use brickled_lib::session::Session;
use brickled_lib::view::Screen;

use super::{GlobalOpts, RUNNING, Result, SysfsSurface, load_config, require_valid};

/// How often the loop checks the Ctrl+C flag while waiting for input.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Render a screen as plain text, marking the highlighted row with `>`.
pub(super) fn render(screen: &Screen) -> String {
    let mut out = String::new();
    match screen {
        Screen::Config(view) => {
            out.push_str(&view.header);
            out.push('\n');
        }
        Screen::Menu(_) => out.push_str("Menu\n"),
    }
    for row in screen.rows() {
        let marker = if row.highlighted { "> " } else { "  " };
        out.push_str(marker);
        out.push_str(&row.decorated());
        out.push('\n');
    }
    out
}

pub(super) fn cmd_run(opts: &GlobalOpts) -> Result<()> {
    let config = load_config(opts.config_path.as_deref());
    require_valid(&config)?;
    let settings_path = opts.settings_file(&config)?;
    let surface = SysfsSurface::new(&config.control_root);
    let runner = ShellRunner::from_config(&config);

    let mut session = Session::new(
        config,
        opts.config_file(),
        settings_path,
        surface,
        runner,
    );
    session.load()?;
    let report = session.start();
    if !report.is_complete() {
        log::warn!(
            "initial sync: {} of {} control writes failed",
            report.failed.len(),
            report.failed.len() + report.written
        );
    }
    print!("{}", render(&session.screen()));

    // Stdin blocks, so read it on its own thread and poll the channel.
    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    while RUNNING.load(Ordering::SeqCst) && !session.should_quit() {
        let line = match rx.recv_timeout(POLL_INTERVAL) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        let input = LogicalInput::from_symbol(&line);
        let (dispatch, err) = session.handle(input);
        if let Some(e) = err {
            eprintln!("[error] {e}");
        }
        if dispatch == Dispatch::Ignored {
            log::debug!("ignored input {:?}", line.trim());
            continue;
        }
        println!();
        print!("{}", render(&session.screen()));
    }

    session.shutdown()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickled_lib::state::{AppState, Page};
    use brickled_lib::view::build_screen;

    #[test]
    fn render_config_page() {
        let text = render(&build_screen(&AppState::default()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[ L1 ]  Front LED  [ R1 ]");
        assert_eq!(lines[1], "  LED: Front LED");
        assert_eq!(lines[2], "> <  Brightness: 50  >");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn render_menu_page() {
        let state = AppState {
            current_page: Page::Menu,
            ..AppState::default()
        };
        let text = render(&build_screen(&state));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Menu");
        assert_eq!(lines[1], "> Turn on all LEDs");
        assert_eq!(lines[6], "  Quit");
    }
}
