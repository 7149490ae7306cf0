//! Tick-based deferred work.
//!
//! Tasks are plain data. The owner of the scheduler calls [`TickScheduler::advance`]
//! once per tick and runs whatever comes back.

use std::collections::BTreeMap;

/// Identifies one scheduled task or timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

pub trait TickScheduler<T>: Send + Sync {
    /// Runs `task` once, `delay` ticks from now. A delay of 0 counts as 1.
    fn run_later(&mut self, delay: u64, task: T) -> TaskHandle;

    /// Runs `task` after `delay` ticks and then every `period` ticks until cancelled.
    fn run_timer(&mut self, delay: u64, period: u64, task: T) -> TaskHandle;

    fn cancel(&mut self, handle: TaskHandle);

    fn is_cancelled(&self, handle: TaskHandle) -> bool;

    /// Moves one tick forward and returns the tasks due on the new tick.
    fn advance(&mut self) -> Vec<T>;

    fn current_tick(&self) -> u64;
}

#[derive(Debug)]
struct Entry<T> {
    due: u64,
    period: Option<u64>,
    task: T,
}

/// Default single-context scheduler.
#[derive(Debug)]
pub struct TickQueue<T> {
    tick: u64,
    next_handle: u64,
    entries: BTreeMap<TaskHandle, Entry<T>>,
}

impl<T> TickQueue<T> {
    pub fn new() -> Self {
        Self {
            tick: 0,
            next_handle: 0,
            entries: BTreeMap::new(),
        }
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, delay: u64, period: Option<u64>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(
            handle,
            Entry {
                due: self.tick + delay.max(1),
                period: period.map(|p| p.max(1)),
                task,
            },
        );
        handle
    }
}

impl<T> Default for TickQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> TickScheduler<T> for TickQueue<T> {
    fn run_later(&mut self, delay: u64, task: T) -> TaskHandle {
        self.insert(delay, None, task)
    }

    fn run_timer(&mut self, delay: u64, period: u64, task: T) -> TaskHandle {
        self.insert(delay, Some(period), task)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.entries.remove(&handle);
    }

    fn is_cancelled(&self, handle: TaskHandle) -> bool {
        !self.entries.contains_key(&handle)
    }

    fn advance(&mut self) -> Vec<T> {
        self.tick += 1;
        let now = self.tick;

        // Handles increase monotonically, so iteration order is scheduling order.
        let due: Vec<TaskHandle> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.due <= now)
            .map(|(handle, _)| *handle)
            .collect();

        let mut ready = Vec::with_capacity(due.len());
        for handle in due {
            let Some(entry) = self.entries.get_mut(&handle) else {
                continue;
            };
            match entry.period {
                Some(period) => {
                    entry.due = now + period;
                    ready.push(entry.task.clone());
                }
                None => {
                    if let Some(entry) = self.entries.remove(&handle) {
                        ready.push(entry.task);
                    }
                }
            }
        }
        ready
    }

    fn current_tick(&self) -> u64 {
        self.tick
    }
}
