use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use container_gui::gui::Direction;
use container_gui::prelude::*;

const STASH_LAYOUT: &str = "layouts/stash.gui.ron";
const DEMO_VIEWER: ViewerId = ViewerId(1);
const FALLBACK_ROWS: [&str; 4] = [
    ". . . . . . . . .",
    ". v v v v v v v .",
    ". v v v v v v v .",
    ". < . . c . . > .",
];

/// The demo's coin stash, once its Gui is open.
#[derive(Resource)]
struct Stash(InventoryId);

#[derive(Resource)]
struct StashLayout(Handle<GuiLayout>);

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .add_plugins(LogPlugin::default())
        .add_plugins(ContainerGuiPlugin::<MemoryHost>::default().applying_predictions())
        .add_systems(Startup, start_loading)
        .add_systems(Update, open_stash.run_if(not(resource_exists::<Stash>)))
        .add_systems(Update, report_dispositions.after(GuiSet::Dispatch));

    for _ in 0..500 {
        app.update();
        if app.world().contains_resource::<Stash>() {
            break;
        }
        std::thread::sleep(Duration::from_millis(2));
    }

    // Put four coins into the first stash cell, scroll one row down and run the
    // compass command. All three arrive in one frame; the runtime serialises them.
    for click in [
        RawClick::new(InventoryAction::PlaceAll, 10)
            .with_cursor(Some(ItemStack::new("gold_coin", 4))),
        RawClick::new(InventoryAction::PickupAll, 34),
        RawClick::new(InventoryAction::PickupAll, 31),
    ] {
        app.world_mut().write_message(ContainerClick {
            viewer: DEMO_VIEWER,
            click,
        });
    }

    for _ in 0..3 {
        app.update();
    }

    let runtime = app.world().resource::<GuiRuntime<MemoryHost>>();
    if let Some(stash) = app.world().get_resource::<Stash>() {
        info!("Stash slot 0 holds {:?}", runtime.get_item(stash.0, 0));
    }
    info!("Commands run: {:?}", runtime.host().dispatched);

    app.world_mut().write_message(ContainerClosed {
        viewer: DEMO_VIEWER,
    });
    app.update();
}

fn start_loading(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(StashLayout(asset_server.load(STASH_LAYOUT)));
}

fn open_stash(
    mut commands: Commands,
    mut runtime: ResMut<GuiRuntime<MemoryHost>>,
    layout: Res<StashLayout>,
    layouts: Res<Assets<GuiLayout>>,
    asset_server: Res<AssetServer>,
) {
    let builder = match layouts.get(&layout.0) {
        Some(layout) => runtime.layout_builder(layout),
        None if asset_server.load_state(&layout.0).is_failed() => {
            warn!("Failed to load {}; using a bare stash", STASH_LAYOUT);
            GuiBuilder::new().structure(FALLBACK_ROWS)
        }
        None => return,
    };

    let stash = runtime.create_inventory(VirtualInventory::with_hooks(
        42,
        AllowList::new(["gold_coin", "silver_coin"]),
    ));
    commands.insert_resource(Stash(stash));
    let result = builder
        .viewer(DEMO_VIEWER)
        .bind_inventory('v', stash, Direction::Horizontal)
        .bind(
            '<',
            ItemProvider::scroll(ItemStack::new("arrow_up", 1), BindingId(0), -7),
        )
        .bind(
            '>',
            ItemProvider::scroll(ItemStack::new("arrow_down", 1), BindingId(0), 7),
        )
        .bind(
            'c',
            ItemProvider::command(ItemStack::new("compass", 1), "warp spawn"),
        )
        .build_and_open(&mut *runtime);

    if let Err(err) = result {
        error!("Failed to open the stash: {err}");
    }
}

fn report_dispositions(mut dispositions: MessageReader<InteractionDisposition>) {
    for disposition in dispositions.read() {
        debug!(
            "Viewer {:?}: cancelled={} changes={}",
            disposition.viewer,
            disposition.outcome.is_cancelled(),
            disposition.outcome.slot_changes.len()
        );
    }
}
