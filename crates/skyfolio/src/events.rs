//! Event sources feeding the main loop.
//!
//! Terminal input and the shooting-star spawn timer run on their own
//! threads and forward everything over one channel, so all state changes
//! happen on the main thread between frames.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

/// How long the input thread blocks before re-checking the running flag.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Something for the main loop to handle.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal event.
    Input(Event),
    /// The spawn timer fired.
    SpawnTick,
    /// Reading terminal input failed; the input thread has stopped.
    InputError(io::Error),
}

/// Owns the event channel and the threads writing to it.
#[derive(Debug)]
pub struct EventHub {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
    /// Flag to signal thread termination.
    running: Arc<RwLock<bool>>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHub {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            running: Arc::new(RwLock::new(true)),
        }
    }

    /// Start forwarding crossterm events.
    pub fn with_input_reader(self) -> Self {
        let sender = self.sender.clone();
        let running = Arc::clone(&self.running);
        thread::spawn(move || {
            while is_running(&running) {
                let event = match event::poll(INPUT_POLL) {
                    Ok(true) => event::read().map(AppEvent::Input),
                    Ok(false) => continue,
                    Err(err) => Err(err),
                };
                let failed = event.is_err();
                let event = event.unwrap_or_else(AppEvent::InputError);
                if sender.send(event).is_err() || failed {
                    break;
                }
            }
        });
        self
    }

    /// Send [`AppEvent::SpawnTick`] every `interval`.
    pub fn with_spawn_timer(self, interval: Duration) -> Self {
        let sender = self.sender.clone();
        let running = Arc::clone(&self.running);
        thread::spawn(move || {
            let mut next = Instant::now() + interval;
            loop {
                thread::sleep(next.saturating_duration_since(Instant::now()));
                if !is_running(&running) || sender.send(AppEvent::SpawnTick).is_err() {
                    break;
                }
                next += interval;
            }
        });
        self
    }

    /// Wait up to `timeout` for the next event.
    pub fn next(&self, timeout: Duration) -> Option<AppEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Ask the threads to exit.
    pub fn stop(&self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
    }
}

impl Drop for EventHub {
    fn drop(&mut self) {
        self.stop();
    }
}

fn is_running(flag: &RwLock<bool>) -> bool {
    flag.read().map(|running| *running).unwrap_or(false)
}
