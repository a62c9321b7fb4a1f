//! Runtime: terminal lifecycle, event loop and effect execution.
//!
//! - A blocking input thread reads crossterm events and forwards them over a
//!   Tokio channel.
//! - A single `select!` loop owns the `App`, routes input through the
//!   `MainView`, executes the returned `Effect`s and redraws.
//! - Ticks run fast only while a status message or feedback pulse is waiting
//!   to expire.

use std::collections::VecDeque;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rat_focus::FocusBuilder;
use ratatui::{Terminal, prelude::CrosstermBackend};
use tally_types::{Effect, Msg};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use crate::app::{App, AppOptions};
use crate::ui::components::Component;
use crate::ui::main_view::MainView;

/// Upper bound on effects drained per input event, guarding against
/// messages that keep producing messages.
const MAX_EFFECTS_PER_EVENT: usize = 64;

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel. Mouse moves are throttled.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);

    tokio::task::spawn_blocking(move || {
        let sixteen_ms = Duration::from_millis(16);
        let mut last_mouse_move = Instant::now();
        loop {
            match event::poll(sixteen_ms) {
                Ok(true) => {}
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                    continue;
                }
                Err(error) => {
                    tracing::warn!(%error, "Failed to poll terminal events");
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    let is_mouse_move = matches!(&event, Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < sixteen_ms {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if let Err(error) = sender.blocking_send(event) {
                        tracing::debug!(%error, "Input channel closed");
                        break;
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, "Failed to read terminal event");
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    let old_focus = std::mem::take(&mut app.focus);
    app.focus = FocusBuilder::rebuild_for(&*app, Some(old_focus));
    if app.focus.focused().is_none() {
        app.focus.first();
    }
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),
        _ => Vec::new(),
    }
}

/// Executes effects in order. Messages are fed back through the main view and
/// whatever they return is executed in turn.
fn process_effects(app: &mut App, main_view: &mut MainView, effects: Vec<Effect>) {
    let mut queue: VecDeque<Effect> = effects.into();
    let mut processed = 0;
    while let Some(effect) = queue.pop_front() {
        processed += 1;
        if processed > MAX_EFFECTS_PER_EVENT {
            tracing::warn!(dropped = queue.len() + 1, "Effect budget exhausted");
            break;
        }
        match effect {
            Effect::Feedback(style) => app.pulse_feedback(style),
            Effect::SendMsg(msg) => queue.extend(main_view.handle_message(app, &msg)),
            // Routed by the main view, which knows the emitting field.
            other => tracing::debug!(effect = ?other, "Unrouted sheet effect"),
        }
    }
}

fn is_quit(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Entry point for the runtime: sets up the terminal, runs the event loop and
/// restores the terminal on exit, including when the loop fails.
pub async fn run_app(options: AppOptions) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::new();
    let mut app = App::new(options);
    let mut terminal = setup_terminal()?;

    let outcome = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver).await;
    cleanup_terminal(&mut terminal)?;
    tracing::info!("Terminal restored");
    outcome
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(1000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(terminal, app, main_view)?;

    loop {
        let target_interval = if app.needs_animation() { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let needs_render = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    tracing::debug!("Input channel closed; shutting down");
                    break;
                };
                if is_quit(&event) {
                    break;
                }
                let effects = handle_input_event(app, main_view, event);
                process_effects(app, main_view, effects);
                true
            }
            _ = ticker.tick() => {
                let animating = app.needs_animation();
                let effects = main_view.handle_message(app, &Msg::Tick);
                process_effects(app, main_view, effects);
                animating
            }
            _ = signal::ctrl_c() => break,
        };

        if needs_render {
            render(terminal, app, main_view)?;
        }
    }
    Ok(())
}
