use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Owner of the periodic tick of one game.
///
/// `start` while a timer is active does nothing, so a game can never run
/// two timers. `cancel` stops the timer before returning and may be called
/// any number of times.
pub trait TickScheduler {
    fn start(&mut self, period: Duration);
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

/// Scheduler without a clock: the caller advances the game with `step()`.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    period: Option<Duration>,
    started_count: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period of the active timer.
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// How many timers have been started in total.
    pub fn started_count(&self) -> usize {
        self.started_count
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, period: Duration) {
        if self.period.is_some() {
            return;
        }
        self.period = Some(period);
        self.started_count += 1;
    }

    fn cancel(&mut self) {
        self.period = None;
    }

    fn is_active(&self) -> bool {
        self.period.is_some()
    }
}

/// Tokio-backed scheduler. Each period the timer task sends its generation
/// number over the tick channel; the game loop owns the receiver and runs
/// the tick itself.
///
/// Must be started from within a tokio runtime.
pub struct IntervalScheduler {
    tick_tx: mpsc::UnboundedSender<u64>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl IntervalScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tick_tx,
            handle: None,
            generation: 0,
        };
        (scheduler, tick_rx)
    }

    /// False for ticks queued by a timer that has since been cancelled.
    pub fn is_current(&self, generation: u64) -> bool {
        self.handle.is_some() && generation == self.generation
    }
}

impl TickScheduler for IntervalScheduler {
    fn start(&mut self, period: Duration) {
        if self.is_active() {
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let tick_tx = self.tick_tx.clone();

        self.handle = Some(tokio::spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick completes immediately
            timer.tick().await;

            loop {
                timer.tick().await;
                if tick_tx.send(generation).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
