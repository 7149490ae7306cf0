use crate::item::ItemStack;
use crate::scheduler::TaskHandle;

/// Steps through a fixed list of items, one step per click.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleItem {
    items: Vec<ItemStack>,
    index: usize,
}

impl CycleItem {
    pub fn new(items: Vec<ItemStack>) -> Self {
        Self { items, index: 0 }
    }

    pub fn display_item(&self) -> Option<ItemStack> {
        self.items.get(self.index).cloned()
    }

    pub fn advance(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + 1) % self.items.len();
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Steps through a fixed list of items on a timer while its Gui is open.
#[derive(Debug)]
pub struct AutoCycleItem {
    cycle: CycleItem,
    period_ticks: u64,
    timer: Option<TaskHandle>,
}

impl AutoCycleItem {
    pub fn new(items: Vec<ItemStack>, period_ticks: u64) -> Self {
        Self {
            cycle: CycleItem::new(items),
            period_ticks: period_ticks.max(1),
            timer: None,
        }
    }

    pub fn display_item(&self) -> Option<ItemStack> {
        self.cycle.display_item()
    }

    pub fn advance(&mut self) {
        self.cycle.advance();
    }

    pub fn index(&self) -> usize {
        self.cycle.index()
    }

    pub fn period_ticks(&self) -> u64 {
        self.period_ticks
    }

    pub fn timer(&self) -> Option<TaskHandle> {
        self.timer
    }

    pub(crate) fn set_timer(&mut self, timer: TaskHandle) {
        self.timer = Some(timer);
    }

    pub(crate) fn take_timer(&mut self) -> Option<TaskHandle> {
        self.timer.take()
    }

    /// Same items and period, no running timer.
    pub(super) fn unscheduled(&self) -> Self {
        Self {
            cycle: self.cycle.clone(),
            period_ticks: self.period_ticks,
            timer: None,
        }
    }
}
