//! Fixed-cadence tick thread
//!
//! ```text
//!   input threads ──InputSender──┐
//!                                ▼
//!   RunnerHandle ──Control──▶ [tick thread] ──Snapshot──▶ RenderSink
//!                               owns GameLoop
//! ```
//!
//! The tick thread is the only owner of the [`GameLoop`]. Input is drained at
//! the start of each tick; pause/resume/shutdown are handled between ticks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, never, select, unbounded};
use log::{error, info};

use crate::game_loop::GameLoop;
use crate::highscores::ScoreStore;
use crate::input::{InputEvent, InputQueue, InputSender};
use crate::render::RenderSink;
use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Pause,
    Resume,
    Shutdown,
}

/// Configures and starts the tick thread
#[derive(Debug, Clone)]
pub struct GameRunner {
    interval: Duration,
    start_paused: bool,
}

impl GameRunner {
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Tick interval must be positive");
        Self {
            interval,
            start_paused: false,
        }
    }

    /// Start without ticking until [`RunnerHandle::resume`]
    pub fn paused(mut self, paused: bool) -> Self {
        self.start_paused = paused;
        self
    }

    pub fn spawn<S, R>(self, game: GameLoop<S>, sink: R) -> RunnerHandle<S>
    where
        S: ScoreStore + Send + 'static,
        R: RenderSink + Send + 'static,
    {
        let queue = InputQueue::new();
        let inputs = queue.sender();
        let (control_tx, control_rx) = unbounded();
        let paused = Arc::new(AtomicBool::new(self.start_paused));

        info!("Starting tick thread ({:?} per tick)", self.interval);
        let thread = thread::spawn(move || self.run(game, sink, queue, control_rx));

        RunnerHandle {
            inputs,
            control: control_tx,
            paused,
            thread: Some(thread),
        }
    }

    fn run<S: ScoreStore, R: RenderSink>(
        self,
        mut game: GameLoop<S>,
        mut sink: R,
        queue: InputQueue,
        control: Receiver<Control>,
    ) -> GameLoop<S> {
        let ticker = crossbeam_channel::tick(self.interval);
        let mut paused = self.start_paused;
        let mut last_tick = Instant::now();

        loop {
            let ticks = if paused { never() } else { ticker.clone() };

            select! {
                recv(control) -> msg => match msg {
                    Ok(Control::Pause) => {
                        if !paused {
                            paused = true;
                            info!("Paused at tick {}", game.state().time_ticks);
                        }
                    }
                    Ok(Control::Resume) => {
                        if paused {
                            paused = false;
                            // Time spent paused is not play time
                            last_tick = Instant::now();
                            info!("Resumed");
                        }
                    }
                    Ok(Control::Shutdown) | Err(_) => break,
                },
                recv(ticks) -> _ => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_tick);
                    last_tick = now;

                    let input = TickInput::from_events(queue.drain());
                    game.tick(&input, elapsed);
                    sink.present(&game.snapshot());
                }
            }
        }

        info!("Tick thread exiting");
        game
    }
}

/// Control surface for a running tick thread. Dropping it stops the thread.
pub struct RunnerHandle<S: ScoreStore> {
    inputs: InputSender,
    control: Sender<Control>,
    paused: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<GameLoop<S>>>,
}

impl<S: ScoreStore> RunnerHandle<S> {
    /// Queue input for the next tick
    pub fn send(&self, event: InputEvent) -> bool {
        self.inputs.send(event)
    }

    /// Producer handle for input threads
    pub fn input_sender(&self) -> InputSender {
        self.inputs.clone()
    }

    /// Stop ticking after the current tick. Returns false if the thread is gone.
    pub fn pause(&self) -> bool {
        self.request(Control::Pause, true)
    }

    /// Returns false if the thread is gone
    pub fn resume(&self) -> bool {
        self.request(Control::Resume, false)
    }

    fn request(&self, control: Control, paused: bool) -> bool {
        if self.control.send(control).is_err() {
            return false;
        }
        self.paused.store(paused, Ordering::SeqCst);
        true
    }

    /// Last requested state. The thread applies it between ticks.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Stop the thread and hand back the game. `None` if the thread panicked.
    pub fn shutdown(mut self) -> Option<GameLoop<S>> {
        self.stop()
    }

    fn stop(&mut self) -> Option<GameLoop<S>> {
        let thread = self.thread.take()?;
        let _ = self.control.send(Control::Shutdown);
        match thread.join() {
            Ok(game) => Some(game),
            Err(e) => {
                error!("Tick thread panicked: {:?}", e);
                None
            }
        }
    }
}

impl<S: ScoreStore> Drop for RunnerHandle<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
