mod actions;
mod app;
mod input;
mod persistence;
mod view;

use anyhow::{Context, Result};
use app::App;
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub seed: Option<u64>,
    pub class: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub profile_path: Option<PathBuf>,
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let mut app = App::bootstrap(&options)?;

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

fn parse_options(args: &[String]) -> LaunchOptions {
    let mut options = LaunchOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--class" | "-c" => {
                if let Some(value) = args.get(idx + 1) {
                    options.class = Some(value.clone());
                    idx += 1;
                }
            }
            "--data" | "-d" => {
                if let Some(value) = args.get(idx + 1) {
                    options.data_dir = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--profile" => {
                if let Some(value) = args.get(idx + 1) {
                    options.profile_path = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(120);
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = input::map_key(key);
                actions::dispatch(app, action);
            }
        } else {
            app.on_tick();
        }
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "gemwitch-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_options_reads_every_flag() {
        let args: Vec<String> = [
            "--seed",
            "99",
            "--class",
            "grove_warden",
            "--data",
            "assets",
            "--profile",
            "/tmp/p.json",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let options = parse_options(&args);
        assert_eq!(options.seed, Some(99));
        assert_eq!(options.class.as_deref(), Some("grove_warden"));
        assert_eq!(options.data_dir, Some(PathBuf::from("assets")));
        assert_eq!(options.profile_path, Some(PathBuf::from("/tmp/p.json")));
    }

    #[test]
    fn parse_options_ignores_stray_values() {
        let args: Vec<String> = ["--seed", "not-a-number", "extra"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let options = parse_options(&args);
        assert_eq!(options.seed, None);
        assert!(options.class.is_none());
    }
}
