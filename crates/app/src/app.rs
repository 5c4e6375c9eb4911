use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use ledger::{Ledger, LedgerEvent, Record, Store};
use tokio::sync::broadcast;

use crate::{
    error::{AppError, Result},
    ui,
    ui::keymap::AppAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
}

/// The two-field entry form.
#[derive(Debug, Default)]
pub struct FormState {
    pub name: String,
    pub amount: String,
    pub focus: Field,
}

pub struct App<S: Store> {
    ledger: Ledger<S>,
    events: broadcast::Receiver<LedgerEvent>,
    pub form: FormState,
    pub toast: Option<ToastState>,
    should_quit: bool,
}

impl<S: Store> App<S> {
    pub fn new(ledger: Ledger<S>) -> Self {
        let events = ledger.subscribe();
        let toast = ledger.startup_error().map(|err| ToastState {
            message: format!("Stored expenses not loaded: {err}"),
            level: ToastLevel::Error,
        });

        Self {
            ledger,
            events,
            form: FormState::default(),
            toast,
            should_quit: false,
        }
    }

    pub fn records(&self) -> &[Record] {
        self.ledger.records()
    }

    pub fn total(&self) -> f64 {
        self.ledger.total()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key).await;
                }
            }
            self.drain_ledger_events();
        }
        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        match ui::keymap::map_key(key) {
            AppAction::Quit => self.should_quit = true,
            AppAction::NextField => {
                self.form.focus = match self.form.focus {
                    Field::Name => Field::Amount,
                    Field::Amount => Field::Name,
                };
            }
            AppAction::Submit => self.submit().await,
            AppAction::Backspace => {
                self.focused_field_mut().pop();
            }
            AppAction::Input(ch) => self.focused_field_mut().push(ch),
            AppAction::None => {}
        }
    }

    async fn submit(&mut self) {
        match self
            .ledger
            .add_expense(&self.form.name, &self.form.amount)
            .await
        {
            Ok(record) => {
                let message = format!("Added {record}");
                self.toast = Some(ToastState {
                    message,
                    level: ToastLevel::Success,
                });
                self.form.name.clear();
                self.form.amount.clear();
                self.form.focus = Field::Name;
            }
            Err(err) => {
                self.toast = Some(ToastState {
                    message: err.to_string(),
                    level: ToastLevel::Error,
                });
            }
        }
    }

    /// Surface storage warnings raised by the ledger since the last tick.
    fn drain_ledger_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(LedgerEvent::SaveFailed(reason)) => {
                    self.toast = Some(ToastState {
                        message: format!("Save failed: {reason}"),
                        level: ToastLevel::Error,
                    });
                }
                Ok(LedgerEvent::Changed) => {}
                Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(_) => break,
            }
        }
    }

    fn focused_field_mut(&mut self) -> &mut String {
        match self.form.focus {
            Field::Name => &mut self.form.name,
            Field::Amount => &mut self.form.amount,
        }
    }
}
