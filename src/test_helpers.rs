pub mod fixtures {
    use std::future::Future;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::task::Poll;

    use crate::config::GuiSettings;
    use crate::gui::{Direction, GuiBuilder, GuiId};
    use crate::host::{MemoryHost, ViewerId};
    use crate::inventory::{InventoryId, VirtualInventory};
    use crate::item::ItemStack;
    use crate::runtime::GuiRuntime;

    pub const VIEWER: ViewerId = ViewerId(1);

    pub fn stack(id: &str, count: u16) -> ItemStack {
        ItemStack::new(id, count)
    }

    pub fn test_runtime() -> GuiRuntime<MemoryHost> {
        GuiRuntime::new(MemoryHost::new(), GuiSettings::default())
    }

    /// Runtime with one empty inventory of `size` slots shown horizontally
    /// through every `v` of `structure`.
    pub fn runtime_with_inventory(
        size: usize,
        structure: &[&str],
    ) -> (GuiRuntime<MemoryHost>, GuiId, InventoryId) {
        let mut runtime = test_runtime();
        let inventory = runtime.create_inventory(VirtualInventory::new(size));
        let gui = GuiBuilder::new()
            .viewer(VIEWER)
            .structure(structure.iter().copied())
            .bind_inventory('v', inventory, Direction::Horizontal)
            .build_and_open(&mut runtime)
            .unwrap();
        (runtime, gui, inventory)
    }

    /// A latch tests open by hand.
    #[derive(Debug, Clone, Default)]
    pub struct Gate(Arc<AtomicBool>);

    impl Gate {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn open(&self) {
            self.0.store(true, Ordering::SeqCst);
        }

        pub fn is_open(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    /// Future that stays pending until `gate` opens, then yields `make()`.
    pub fn gated<T, F>(gate: &Gate, make: F) -> impl Future<Output = T> + Send + 'static
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let gate = gate.clone();
        let mut make = Some(make);
        std::future::poll_fn(move |_| {
            if !gate.is_open() {
                return Poll::Pending;
            }
            match make.take() {
                Some(make) => Poll::Ready(make()),
                None => Poll::Pending,
            }
        })
    }
}
