use std::marker::PhantomData;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;

use super::{DispatchOutcome, GuiRuntime};
use crate::config::{GuiLayout, GuiSettings, LAYOUT_EXTENSION, RonLoader};
use crate::host::{Host, ViewerId};
use crate::interaction::{RawClick, RawDrag};
use crate::sets::GuiSet;

/// A click the host observed in a viewer's open container.
#[derive(Message, Debug, Clone)]
pub struct ContainerClick {
    pub viewer: ViewerId,
    pub click: RawClick,
}

#[derive(Message, Debug, Clone)]
pub struct ContainerDrag {
    pub viewer: ViewerId,
    pub drag: RawDrag,
}

/// The viewer closed their container on the host side.
#[derive(Message, Debug, Clone, Copy)]
pub struct ContainerClosed {
    pub viewer: ViewerId,
}

/// Fired for every dispatched interaction; tells the host whether to apply it.
#[derive(Message, Debug, Clone)]
pub struct InteractionDisposition {
    pub viewer: ViewerId,
    pub outcome: DispatchOutcome,
}

/// Runs a [`GuiRuntime`] inside a bevy app. One `Update` is one tick.
///
/// A viewer's interactions are dispatched in arrival order, and none is
/// dispatched while an earlier one of the same viewer waits for its commit.
/// With `AssetPlugin` added first, `*.gui.ron` files load as [`GuiLayout`] assets.
pub struct ContainerGuiPlugin<H> {
    pub settings: GuiSettings,
    /// Writes predicted cell contents into containers during `HostApply`,
    /// for hosts that do not mutate containers themselves.
    pub apply_predictions: bool,
    _host: PhantomData<fn() -> H>,
}

impl<H> ContainerGuiPlugin<H> {
    pub fn new(settings: GuiSettings) -> Self {
        Self {
            settings,
            apply_predictions: false,
            _host: PhantomData,
        }
    }

    pub fn applying_predictions(mut self) -> Self {
        self.apply_predictions = true;
        self
    }
}

impl<H> Default for ContainerGuiPlugin<H> {
    fn default() -> Self {
        Self::new(GuiSettings::default())
    }
}

impl<H: Host + Default> Plugin for ContainerGuiPlugin<H> {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GuiRuntime<H>>() {
            app.insert_resource(GuiRuntime::new(H::default(), self.settings.clone()));
        }

        if app.is_plugin_added::<AssetPlugin>() {
            app.init_asset::<GuiLayout>()
                .register_asset_loader(RonLoader::<GuiLayout>::new(&[LAYOUT_EXTENSION]));
        }

        app.add_message::<ContainerClick>()
            .add_message::<ContainerDrag>()
            .add_message::<ContainerClosed>()
            .add_message::<InteractionDisposition>()
            .configure_sets(
                Update,
                (GuiSet::Dispatch, GuiSet::HostApply, GuiSet::Commit).chain(),
            )
            .add_systems(Update, dispatch_interactions::<H>.in_set(GuiSet::Dispatch))
            .add_systems(Update, run_tick::<H>.in_set(GuiSet::Commit));

        if self.apply_predictions {
            app.add_systems(Update, apply_predictions::<H>.in_set(GuiSet::HostApply));
        }
    }
}

/// A raw interaction not yet handed to the runtime.
#[derive(Debug, Clone)]
enum Queued {
    Click(RawClick),
    Drag(RawDrag),
    Closed,
}

fn dispatch_interactions<H: Host>(
    mut runtime: ResMut<GuiRuntime<H>>,
    mut queue: Local<Vec<(ViewerId, Queued)>>,
    mut clicks: MessageReader<ContainerClick>,
    mut drags: MessageReader<ContainerDrag>,
    mut closed: MessageReader<ContainerClosed>,
    mut dispositions: MessageWriter<InteractionDisposition>,
) {
    queue.extend(
        clicks
            .read()
            .map(|message| (message.viewer, Queued::Click(message.click.clone()))),
    );
    queue.extend(
        drags
            .read()
            .map(|message| (message.viewer, Queued::Drag(message.drag.clone()))),
    );
    queue.extend(closed.read().map(|message| (message.viewer, Queued::Closed)));

    let mut held = Vec::new();
    for (viewer, interaction) in queue.drain(..) {
        // Once one interaction of a viewer is held, the rest of theirs stay behind it.
        if runtime.has_pending_commit(viewer) {
            held.push((viewer, interaction));
            continue;
        }
        let outcome = match interaction {
            Queued::Click(click) => runtime.dispatch_click(viewer, &click),
            Queued::Drag(drag) => runtime.dispatch_drag(viewer, &drag),
            Queued::Closed => {
                runtime.dispatch_closed(viewer);
                None
            }
        };
        if let Some(outcome) = outcome {
            dispositions.write(InteractionDisposition { viewer, outcome });
        }
    }

    if !held.is_empty() {
        debug!("Holding {} interaction(s) until earlier commits land", held.len());
    }
    *queue = held;
}

fn apply_predictions<H: Host>(
    mut runtime: ResMut<GuiRuntime<H>>,
    mut dispositions: MessageReader<InteractionDisposition>,
) {
    for disposition in dispositions.read() {
        let outcome = &disposition.outcome;
        if outcome.is_cancelled() {
            continue;
        }
        let Some(container) = runtime.container_mut(outcome.gui) else {
            continue;
        };
        for change in &outcome.slot_changes {
            container.set_item(change.physical_slot, change.new_item.clone());
        }
    }
}

fn run_tick<H: Host>(mut runtime: ResMut<GuiRuntime<H>>) {
    runtime.tick();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::gui::{BindingId, Direction, GuiBuilder, GuiId};
    use crate::host::MemoryHost;
    use crate::interaction::InventoryAction;
    use crate::inventory::{InventoryId, VirtualInventory};
    use crate::item::ItemStack;
    use crate::provider::ItemProvider;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ContainerGuiPlugin::<MemoryHost>::default().applying_predictions());
        app
    }

    #[test]
    fn click_commits_within_one_update() {
        let mut app = app();
        let inventory = {
            let mut runtime = app.world_mut().resource_mut::<GuiRuntime<MemoryHost>>();
            let inventory = runtime.create_inventory(VirtualInventory::new(5));
            GuiBuilder::new()
                .viewer(ViewerId(1))
                .structure(["vvvvv"])
                .bind_inventory('v', inventory, Direction::Horizontal)
                .build_and_open(&mut *runtime)
                .unwrap();
            inventory
        };

        app.world_mut().write_message(ContainerClick {
            viewer: ViewerId(1),
            click: RawClick::new(InventoryAction::PlaceAll, 2)
                .with_cursor(Some(ItemStack::new("gold", 3))),
        });
        app.update();

        let runtime = app.world().resource::<GuiRuntime<MemoryHost>>();
        assert_eq!(runtime.get_item(inventory, 2), Some(ItemStack::new("gold", 3)));
    }

    #[test]
    fn closing_message_closes_the_gui() {
        let mut app = app();
        let gui = {
            let mut runtime = app.world_mut().resource_mut::<GuiRuntime<MemoryHost>>();
            GuiBuilder::new()
                .viewer(ViewerId(4))
                .build_and_open(&mut *runtime)
                .unwrap()
        };

        app.world_mut().write_message(ContainerClosed {
            viewer: ViewerId(4),
        });
        app.update();

        let runtime = app.world().resource::<GuiRuntime<MemoryHost>>();
        assert!(runtime.gui(gui).is_none());
        assert_eq!(runtime.gui_for(ViewerId(4)), None);
    }

    /// Ten-slot inventory shown in three cells, with a `>` cell one row down
    /// scrolling it forward.
    fn scrolling_stash(app: &mut App) -> (GuiId, InventoryId) {
        let mut runtime = app.world_mut().resource_mut::<GuiRuntime<MemoryHost>>();
        let inventory = runtime.create_inventory(VirtualInventory::new(10));
        let gui = GuiBuilder::new()
            .viewer(ViewerId(1))
            .structure(["vvv", ">"])
            .bind_inventory('v', inventory, Direction::Horizontal)
            .bind('>', ItemProvider::scroll(ItemStack::new("arrow", 1), BindingId(0), 1))
            .build_and_open(&mut *runtime)
            .unwrap();
        (gui, inventory)
    }

    fn click(app: &mut App, click: RawClick) {
        app.world_mut().write_message(ContainerClick {
            viewer: ViewerId(1),
            click,
        });
    }

    #[test]
    fn scroll_in_the_same_update_waits_for_the_commit() {
        let mut app = app();
        let (gui, inventory) = scrolling_stash(&mut app);

        click(
            &mut app,
            RawClick::new(InventoryAction::PlaceAll, 0).with_cursor(Some(ItemStack::new("gold", 3))),
        );
        click(&mut app, RawClick::new(InventoryAction::PickupAll, 9));
        app.update();

        {
            let runtime = app.world().resource::<GuiRuntime<MemoryHost>>();
            assert_eq!(runtime.get_item(inventory, 0), Some(ItemStack::new("gold", 3)));
            assert_eq!(runtime.gui(gui).unwrap().scroll_window(BindingId(0)), Some((0, 2)));
            assert!(!runtime.has_pending_commit(ViewerId(1)));
        }

        app.update();

        {
            let runtime = app.world().resource::<GuiRuntime<MemoryHost>>();
            assert_eq!(runtime.gui(gui).unwrap().scroll_window(BindingId(0)), Some((1, 3)));
            assert_eq!(runtime.container(gui).unwrap().item(0), None);
        }

        // Picking up what cell 0 shows now must not touch slot 0.
        click(&mut app, RawClick::new(InventoryAction::PickupAll, 0));
        app.update();

        let runtime = app.world().resource::<GuiRuntime<MemoryHost>>();
        assert_eq!(runtime.get_item(inventory, 0), Some(ItemStack::new("gold", 3)));
        assert_eq!(runtime.get_item(inventory, 1), None);
    }

    #[test]
    fn close_waits_behind_a_pending_commit() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(
            ContainerGuiPlugin::<MemoryHost>::new(GuiSettings {
                commit_delay_ticks: 2,
                ..GuiSettings::default()
            })
            .applying_predictions(),
        );
        let (gui, inventory) = scrolling_stash(&mut app);

        click(
            &mut app,
            RawClick::new(InventoryAction::PlaceAll, 1).with_cursor(Some(ItemStack::new("gold", 2))),
        );
        app.world_mut().write_message(ContainerClosed {
            viewer: ViewerId(1),
        });
        app.update();

        assert!(app.world().resource::<GuiRuntime<MemoryHost>>().gui(gui).is_some());

        app.update();
        app.update();

        let runtime = app.world().resource::<GuiRuntime<MemoryHost>>();
        assert!(runtime.gui(gui).is_none());
        assert_eq!(runtime.get_item(inventory, 1), Some(ItemStack::new("gold", 2)));
    }

    #[test]
    fn layouts_load_through_the_asset_server() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.add_plugins(ContainerGuiPlugin::<MemoryHost>::default());

        let handle: Handle<GuiLayout> = app
            .world()
            .resource::<AssetServer>()
            .load("layouts/stash.gui.ron");

        let mut loaded = None;
        for _ in 0..500 {
            app.update();
            loaded = app.world().resource::<Assets<GuiLayout>>().get(&handle).cloned();
            if loaded.is_some() {
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }

        let layout = loaded.expect("stash layout never loaded");
        assert_eq!(layout.title.as_deref(), Some("Stash"));
        assert_eq!(layout.structure.len(), 4);
        assert!(layout.items.contains_key(&'#'));
    }
}
