//! Terminal frontend: draws the canvas as truecolor blocks and drives the
//! session from stdin and Ctrl-C.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor, queue,
    style::{Color, Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use image::Rgb;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::{self, Instant},
};

use crate::{
    audio::AudioEngineHandle,
    canvas::{Canvas, GRID_CELLS},
    error::{SessionError, SessionResult},
    log_error, log_warn,
    timer::{
        DeadlineScheduler, DurationSlider, SessionController, SessionFrontend, SoundEvent,
        TickScheduler, TimerSnapshot, Transition,
    },
};

const ENABLE_LOGS: bool = true;

pub struct TerminalFrontend<W: Write> {
    out: W,
    audio: Option<AudioEngineHandle>,
    notice: Option<String>,
}

impl<W: Write> TerminalFrontend<W> {
    pub fn new(out: W, audio: Option<AudioEngineHandle>) -> Self {
        Self {
            out,
            audio,
            notice: None,
        }
    }

    /// Shown under the canvas until the next notice replaces it.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, canvas: &Canvas, snapshot: &TimerSnapshot) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
        queue!(self.out, Print(format!("{}\r\n\r\n", snapshot.title())))?;

        for row in 0..GRID_CELLS {
            for column in 0..GRID_CELLS {
                let Rgb([r, g, b]) = canvas.cell(column, row);
                queue!(self.out, PrintStyledContent("  ".on(Color::Rgb { r, g, b })))?;
            }
            queue!(self.out, Print("\r\n"))?;
        }

        queue!(
            self.out,
            Print(format!(
                "\r\n[ {} ]  Enter: press  Ctrl-C: quit\r\n",
                snapshot.button_label()
            ))
        )?;
        if !snapshot.is_running() {
            queue!(
                self.out,
                Print(format!(
                    "{} min  +/-: change\r\n",
                    snapshot.total_secs / 60
                ))
            )?;
        }
        if let Some(notice) = &self.notice {
            queue!(self.out, Print(format!("{notice}\r\n")))?;
        }
        self.out.flush()
    }
}

impl<W: Write> SessionFrontend for TerminalFrontend<W> {
    fn render(&mut self, canvas: &Canvas, snapshot: &TimerSnapshot) {
        if let Err(e) = self.draw(canvas, snapshot) {
            log_warn!("Failed to draw canvas: {}", e);
        }
    }

    fn play_sound(&mut self, event: SoundEvent) {
        if let Some(audio) = &self.audio {
            if let Err(e) = audio.play(event) {
                log_warn!("Failed to queue {:?}: {}", event, e);
            }
        }
    }
}

type TerminalController<W> = SessionController<DeadlineScheduler, TerminalFrontend<W>>;

/// Applies one line of input. While idle, `+` and `-` step the duration
/// slider and return `None`; during a session they are ignored. Any other
/// line presses the action button.
pub fn handle_input<S: TickScheduler, F: SessionFrontend>(
    controller: &mut SessionController<S, F>,
    slider: &mut DurationSlider,
    line: &str,
) -> Option<SessionResult<Transition>> {
    match line.trim() {
        step @ ("+" | "-") => {
            if !controller.is_running() {
                if step == "+" {
                    slider.increment();
                } else {
                    slider.decrement();
                }
                controller.set_duration(slider.duration());
                controller.refresh();
            }
            None
        }
        _ => Some(controller.on_action_button_pressed()),
    }
}

/// Runs the event loop until Ctrl-C or end of input. Session errors are shown
/// to the user and the loop carries on with an idle canvas.
pub async fn run_ritual<W: Write>(controller: &mut TerminalController<W>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut slider = DurationSlider::new(controller.duration().whole_minutes());
    controller.refresh();

    loop {
        let deadline = controller.scheduler().next_deadline();
        let due = async move {
            match deadline {
                Some(at) => time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = due => {
                if controller.scheduler_mut().take_due(Instant::now()).is_some() {
                    let result = controller.on_tick();
                    report(controller, result);
                }
            }
            line = lines.next_line() => {
                match line.context("failed to read from stdin")? {
                    Some(line) => {
                        controller.frontend_mut().clear_notice();
                        if let Some(result) = handle_input(controller, &mut slider, &line) {
                            report(controller, result);
                        }
                    }
                    None => {
                        if controller.is_running() {
                            let result = controller.on_action_button_pressed();
                            report(controller, result);
                        }
                        break;
                    }
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                if controller.is_running() {
                    let result = controller.on_action_button_pressed();
                    report(controller, result);
                }
                break;
            }
        }
    }

    if let Some(audio) = &controller.frontend().audio {
        audio.stop().ok();
    }
    Ok(())
}

fn report<W: Write>(controller: &mut TerminalController<W>, result: Result<Transition, SessionError>) {
    let notice = match result {
        Ok(Transition::Concluded {
            record: Some(record),
            ..
        }) => format!(
            "Saved {} ({} min) to {}",
            record.date,
            record.duration_minutes,
            controller.store().data_dir().display()
        ),
        Ok(_) => return,
        Err(e) => {
            log_error!("{}", e);
            format!("Error: {e}")
        }
    };
    controller.frontend_mut().set_notice(notice);
    controller.refresh();
}
