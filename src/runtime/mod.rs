//! Owner of every Gui and virtual inventory, driven one tick at a time.

pub mod commit;
pub mod dispatch;
pub mod plugin;

use std::collections::{BTreeMap, HashMap};

use bevy::prelude::*;

use crate::config::{GuiLayout, GuiSettings};
use crate::gui::{BindingId, Gui, GuiBuildError, GuiBuilder, GuiId};
use crate::host::{Host, SlotContainer, ViewerId};
use crate::interaction::InteractionEvent;
use crate::inventory::{InventoryId, InventoryStore, VirtualInventory};
use crate::item::ItemStack;
use crate::provider::{AsyncPoll, ItemProvider};
use crate::scheduler::{TickQueue, TickScheduler};

pub use dispatch::DispatchOutcome;
pub use plugin::{
    ContainerClick, ContainerClosed, ContainerDrag, ContainerGuiPlugin, InteractionDisposition,
};

/// Work the runtime schedules for a later tick.
#[derive(Debug, Clone)]
pub enum Deferred {
    /// Copy the host-settled cells of `event` into `inventory`.
    Commit {
        inventory: InventoryId,
        event: InteractionEvent,
    },
    /// Step the auto-cycling provider at `index`.
    AdvanceCycle { gui: GuiId, index: usize },
}

#[derive(Resource)]
pub struct GuiRuntime<H: Host> {
    settings: GuiSettings,
    host: H,
    guis: BTreeMap<GuiId, Gui>,
    inventories: InventoryStore,
    scheduler: Box<dyn TickScheduler<Deferred>>,
    listeners: HashMap<ViewerId, GuiId>,
    /// Scheduled commits not yet run, per interacting viewer.
    pending_commits: HashMap<ViewerId, usize>,
    next_gui: u64,
}

impl<H: Host> GuiRuntime<H> {
    pub fn new(host: H, settings: GuiSettings) -> Self {
        Self::with_scheduler(host, settings, TickQueue::new())
    }

    pub fn with_scheduler(
        host: H,
        settings: GuiSettings,
        scheduler: impl TickScheduler<Deferred> + 'static,
    ) -> Self {
        Self {
            settings,
            host,
            guis: BTreeMap::new(),
            inventories: InventoryStore::new(),
            scheduler: Box::new(scheduler),
            listeners: HashMap::new(),
            pending_commits: HashMap::new(),
            next_gui: 0,
        }
    }

    pub fn settings(&self) -> &GuiSettings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler(&self) -> &dyn TickScheduler<Deferred> {
        self.scheduler.as_ref()
    }

    pub fn current_tick(&self) -> u64 {
        self.scheduler.current_tick()
    }

    /// True while an interaction of `viewer` waits for its deferred commit.
    ///
    /// Hosts must not dispatch further interactions of that viewer until this
    /// clears; [`ContainerGuiPlugin`] holds them back.
    pub fn has_pending_commit(&self, viewer: ViewerId) -> bool {
        self.pending_commits.contains_key(&viewer)
    }

    pub fn inventories(&self) -> &InventoryStore {
        &self.inventories
    }

    pub fn create_inventory(&mut self, inventory: VirtualInventory) -> InventoryId {
        let id = self.inventories.insert(inventory);
        debug!("Created virtual inventory {:?}", id);
        id
    }

    pub fn inventory(&self, id: InventoryId) -> Option<&VirtualInventory> {
        self.inventories.get(id)
    }

    pub fn get_item(&self, inventory: InventoryId, slot: usize) -> Option<ItemStack> {
        self.inventories.get(inventory)?.get_item(slot)
    }

    /// Stores `item` and refreshes every Gui cell showing that slot.
    /// Unknown inventories and out-of-range slots are ignored.
    pub fn set_item(&mut self, inventory: InventoryId, slot: usize, item: Option<ItemStack>) {
        let Some(target) = self.inventories.get_mut(inventory) else {
            return;
        };
        if !target.store(slot, item) {
            return;
        }
        let observers = target.observers().to_vec();
        for observer in observers {
            if let Some(gui) = self.guis.get_mut(&observer.gui) {
                gui.refresh_virtual_slot(observer.binding, slot, &self.inventories);
            }
        }
    }

    /// Re-renders every cell, in every Gui, that shows `inventory`.
    pub fn refresh_inventory(&mut self, inventory: InventoryId) {
        let Some(target) = self.inventories.get(inventory) else {
            return;
        };
        for observer in target.observers() {
            if let Some(gui) = self.guis.get_mut(&observer.gui) {
                gui.refresh_binding(observer.binding, &self.inventories);
            }
        }
    }

    /// Builder seeded from `layout`, with the configured default stack size on every item.
    pub fn layout_builder(&self, layout: &GuiLayout) -> GuiBuilder {
        let layout = layout.clone().with_max_stack(self.settings.default_max_stack);
        GuiBuilder::from_layout(&layout)
    }

    /// Compiles `builder`, opens the result for its viewer and starts its timers.
    ///
    /// A viewer sees one Gui at a time; one already open for the same viewer is closed first.
    pub fn open_gui(&mut self, builder: GuiBuilder) -> Result<GuiId, GuiBuildError> {
        let layout = builder.compile(&self.inventories)?;
        let id = GuiId(self.next_gui);
        self.next_gui += 1;

        if let Some(previous) = self.listeners.get(&layout.viewer).copied() {
            self.close_gui(previous);
        }

        let container = self.host.create_container(layout.title.as_deref(), layout.rows);
        let mut gui = Gui::new(id, layout, container);

        for (binding, bound) in gui.bindings() {
            if let Some(inventory) = self.inventories.get_mut(bound.inventory) {
                inventory.register_gui(id, binding);
            }
        }

        for index in 0..gui.size() {
            if let Some(provider) = gui.provider_mut(index) {
                start_timers(&mut *self.scheduler, id, index, provider);
            }
        }

        gui.refresh_all(&self.inventories);
        gui.open();
        self.listeners.insert(gui.viewer(), id);
        info!(
            "Opened gui {:?} ({} rows) for viewer {:?}",
            id,
            gui.rows(),
            gui.viewer()
        );
        self.guis.insert(id, gui);
        Ok(id)
    }

    pub fn gui(&self, id: GuiId) -> Option<&Gui> {
        self.guis.get(&id)
    }

    /// Gui currently receiving `viewer`'s interactions.
    pub fn gui_for(&self, viewer: ViewerId) -> Option<GuiId> {
        self.listeners.get(&viewer).copied()
    }

    pub fn container(&self, gui: GuiId) -> Option<&dyn SlotContainer> {
        Some(self.guis.get(&gui)?.container())
    }

    /// The host's handle on a Gui's container, for applying its own click results.
    pub fn container_mut(&mut self, gui: GuiId) -> Option<&mut dyn SlotContainer> {
        Some(self.guis.get_mut(&gui)?.container_mut())
    }

    pub fn refresh_gui(&mut self, gui: GuiId) {
        if let Some(gui) = self.guis.get_mut(&gui) {
            gui.refresh_all(&self.inventories);
        }
    }

    pub fn refresh_index(&mut self, gui: GuiId, index: usize) {
        if let Some(gui) = self.guis.get_mut(&gui) {
            gui.refresh_index(index, &self.inventories);
        }
    }

    pub fn handle_inventory_scroll(&mut self, gui: GuiId, binding: BindingId, delta: i32) -> bool {
        let Some(target) = self.guis.get_mut(&gui) else {
            return false;
        };
        let scrolled = target.handle_inventory_scroll(binding, delta, &self.inventories);
        if scrolled {
            debug!("Scrolled binding {:?} of gui {:?} by {}", binding, gui, delta);
        }
        scrolled
    }

    /// Closes the container, stops the listener, destroys every provider and
    /// unregisters from every inventory. Returns false for unknown Guis.
    pub fn close_gui(&mut self, id: GuiId) -> bool {
        let Some(mut gui) = self.guis.remove(&id) else {
            return false;
        };
        gui.close_container();
        if self.listeners.get(&gui.viewer()) == Some(&id) {
            self.listeners.remove(&gui.viewer());
        }
        for timer in gui.destroy_providers() {
            self.scheduler.cancel(timer);
        }
        for inventory in gui.inventories() {
            if let Some(inventory) = self.inventories.get_mut(inventory) {
                inventory.unregister_gui(id);
            }
        }
        info!("Closed gui {:?} for viewer {:?}", id, gui.viewer());
        true
    }

    /// Advances one interaction tick: runs due tasks, then resolves async providers.
    pub fn tick(&mut self) {
        for task in self.scheduler.advance() {
            match task {
                Deferred::Commit { inventory, event } => self.commit(inventory, event),
                Deferred::AdvanceCycle { gui, index } => self.advance_cycle(gui, index),
            }
        }
        self.poll_async_providers();
    }

    fn advance_cycle(&mut self, id: GuiId, index: usize) {
        let Some(gui) = self.guis.get_mut(&id) else {
            return;
        };
        let provider = match gui.provider_mut(index) {
            Some(ItemProvider::Async(item)) => item.resolved_mut(),
            other => other,
        };
        if let Some(ItemProvider::AutoCycle(item)) = provider {
            item.advance();
            gui.refresh_index(index, &self.inventories);
        }
    }

    fn poll_async_providers(&mut self) {
        for (id, gui) in self.guis.iter_mut() {
            for index in gui.pending_async_cells() {
                let Some(ItemProvider::Async(item)) = gui.provider_mut(index) else {
                    continue;
                };
                match item.poll() {
                    AsyncPoll::Pending => continue,
                    AsyncPoll::Resolved => {
                        if let Some(resolved) = item.resolved_mut() {
                            start_timers(&mut *self.scheduler, *id, index, resolved);
                        }
                        debug!("Async provider at {:?}[{}] resolved", id, index);
                    }
                    AsyncPoll::Failed(err) => {
                        warn!("Async provider at {:?}[{}] failed: {err}", id, index);
                    }
                }
                gui.refresh_index(index, &self.inventories);
            }
        }
    }
}

fn start_timers(
    scheduler: &mut dyn TickScheduler<Deferred>,
    gui: GuiId,
    index: usize,
    provider: &mut ItemProvider,
) {
    if let ItemProvider::AutoCycle(item) = provider {
        let period = item.period_ticks();
        let timer = scheduler.run_timer(period, period, Deferred::AdvanceCycle { gui, index });
        item.set_timer(timer);
    }
}

impl GuiBuilder {
    /// Compiles this builder and opens the Gui in `runtime`.
    pub fn build_and_open<H: Host>(self, runtime: &mut GuiRuntime<H>) -> Result<GuiId, GuiBuildError> {
        runtime.open_gui(self)
    }
}
