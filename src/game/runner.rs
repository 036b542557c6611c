use super::keymap;
use super::session::GameSession;
use crate::config::DojoConfig;
use crate::view::{RenderParams, View};
use anyhow::Result;
use chrono::Local;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{Write, stdout};

/// The interactive loop: owns the terminal, feeds keys to the session,
/// redraws after every event.
pub struct Runner {
    session: GameSession,
    view: View,
    config: DojoConfig,
}

impl Runner {
    pub fn new(session: GameSession, config: DojoConfig) -> Self {
        let view = View::new(config.show_line_numbers);
        Self {
            session,
            view,
            config,
        }
    }

    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;

        let result = self.run_loop();

        execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self) -> Result<()> {
        loop {
            self.render()?;

            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.kind == KeyEventKind::Release {
                        continue;
                    }
                    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
                        // Mid-sequence, the next key belongs to the
                        // interpreter, not the global shortcuts.
                        if self.session.is_waiting_for_second_key() {
                            continue;
                        }
                        match key_event.code {
                            KeyCode::Char('q') => break,
                            KeyCode::Char('r') => self.session.restart(),
                            _ => {}
                        }
                        continue;
                    }
                    if self.session.passed() && key_event.code == KeyCode::Enter {
                        if !self.session.advance() {
                            // Catalogue finished.
                            break;
                        }
                        continue;
                    }
                    match keymap::translate(&key_event) {
                        Some(key) => {
                            self.session
                                .handle_key(&key, Local::now().date_naive());
                        }
                        None if self.config.bell_on_error => ring_bell()?,
                        None => {}
                    }
                }
                // The next render repaints the whole frame anyway.
                Event::Resize(..) => {}
                _ => {}
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let progress = self.session.progress();
        let pending = self.session.pending_display();
        let params = RenderParams {
            level: self.session.level(),
            chapter_title: self.session.chapter_title(),
            lines: self.session.lines(),
            cursor: self.session.cursor(),
            pending: &pending,
            passed: self.session.passed(),
            status_message: self.session.message(),
            player_name: &self.config.player_name,
            completed: progress.completed_levels() as usize,
            total: self.session.total_levels(),
            xp: progress.xp,
            streak: progress.streak,
        };
        self.view.render(&params)?;
        Ok(())
    }
}

fn ring_bell() -> Result<()> {
    print!("\x07");
    stdout().flush()?;
    Ok(())
}
