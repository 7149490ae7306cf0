use std::collections::{BTreeMap, BTreeSet};

use super::{BindingId, GuiBuildError, InventoryBinding, MAX_ROWS, ROW_WIDTH};
use crate::config::GuiLayout;
use crate::host::ViewerId;
use crate::inventory::{InventoryId, InventoryStore};
use crate::provider::ItemProvider;

/// Order in which a virtual inventory binding numbers its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Row by row, left to right.
    #[default]
    Horizontal,
    /// Column by column, top to bottom.
    Vertical,
}

#[derive(Debug, Clone, Copy)]
struct PendingBinding {
    inventory: InventoryId,
    direction: Direction,
    id: BindingId,
}

/// Validated cell layout, ready to be opened by a runtime.
#[derive(Debug)]
pub struct CompiledGui {
    pub(crate) viewer: ViewerId,
    pub(crate) title: Option<String>,
    pub(crate) rows: usize,
    pub(crate) cells: Vec<Option<ItemProvider>>,
    pub(crate) bindings: BTreeMap<BindingId, InventoryBinding>,
    pub(crate) allow_close: bool,
}

/// Assembles a Gui from a character grid.
///
/// Each character of a structure row is one cell; spaces are stripped so rows
/// can be written spaced out, and characters without a binding are empty cells.
#[derive(Debug)]
pub struct GuiBuilder {
    title: Option<String>,
    structure: Vec<String>,
    items: BTreeMap<char, ItemProvider>,
    inventories: BTreeMap<char, PendingBinding>,
    inventory_bindings: u32,
    viewer: Option<ViewerId>,
    allow_close: bool,
    error: Option<GuiBuildError>,
}

impl Default for GuiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GuiBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            structure: Vec::new(),
            items: BTreeMap::new(),
            inventories: BTreeMap::new(),
            inventory_bindings: 0,
            viewer: None,
            allow_close: true,
            error: None,
        }
    }

    /// Seeds a builder with the title, rows and static items of a layout file.
    pub fn from_layout(layout: &GuiLayout) -> Self {
        let mut builder = Self::new()
            .structure(layout.structure.iter().cloned())
            .allow_close(layout.allow_close);
        if let Some(title) = &layout.title {
            builder = builder.title(title.clone());
        }
        for (ch, item) in &layout.items {
            builder = builder.bind(*ch, item.clone());
        }
        builder
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the structure; one string per row.
    pub fn structure<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.structure = rows.into_iter().map(Into::into).collect();
        self
    }

    pub fn viewer(mut self, viewer: ViewerId) -> Self {
        self.viewer = Some(viewer);
        self
    }

    pub fn allow_close(mut self, allow: bool) -> Self {
        self.allow_close = allow;
        self
    }

    /// Binds `ch` to a provider. Plain item stacks become simple providers.
    pub fn bind(mut self, ch: char, provider: impl Into<ItemProvider>) -> Self {
        if ch == ' ' {
            return self.fail(GuiBuildError::SpaceBinding);
        }
        if self.items.contains_key(&ch) {
            return self.fail(GuiBuildError::DuplicateBinding(ch));
        }
        self.items.insert(ch, provider.into());
        self
    }

    /// Binds `ch` to consecutive slots of `inventory`, with the next free binding id.
    pub fn bind_inventory(self, ch: char, inventory: InventoryId, direction: Direction) -> Self {
        let id = BindingId(self.inventory_bindings);
        self.bind_inventory_with_id(ch, inventory, direction, id)
    }

    pub fn bind_inventory_with_id(
        mut self,
        ch: char,
        inventory: InventoryId,
        direction: Direction,
        id: BindingId,
    ) -> Self {
        if ch == ' ' {
            return self.fail(GuiBuildError::SpaceBinding);
        }
        if self.inventories.contains_key(&ch) {
            return self.fail(GuiBuildError::DuplicateBinding(ch));
        }
        self.inventories.insert(
            ch,
            PendingBinding {
                inventory,
                direction,
                id,
            },
        );
        self.inventory_bindings += 1;
        self
    }

    fn fail(mut self, error: GuiBuildError) -> Self {
        self.error.get_or_insert(error);
        self
    }

    /// Stripped rows, each exactly [`ROW_WIDTH`] cells wide.
    fn grid(&self) -> Result<Vec<Vec<char>>, GuiBuildError> {
        if self.structure.len() > MAX_ROWS {
            return Err(GuiBuildError::TooManyRows(self.structure.len()));
        }
        if self.structure.is_empty() {
            return Ok(vec![vec![' '; ROW_WIDTH]]);
        }

        self.structure
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let mut cells: Vec<char> = row.chars().filter(|c| *c != ' ').collect();
                if cells.len() > ROW_WIDTH {
                    return Err(GuiBuildError::RowTooWide {
                        row: index + 1,
                        width: cells.len(),
                    });
                }
                cells.resize(ROW_WIDTH, ' ');
                Ok(cells)
            })
            .collect()
    }

    /// Validates the configuration and lowers it into a flat cell array.
    pub fn compile(mut self, inventories: &InventoryStore) -> Result<CompiledGui, GuiBuildError> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        let viewer = self.viewer.ok_or(GuiBuildError::MissingViewer)?;
        let grid = self.grid()?;

        if let Some(ch) = self.inventories.keys().find(|ch| self.items.contains_key(ch)) {
            return Err(GuiBuildError::ConflictingBinding(*ch));
        }

        let mut ids = BTreeSet::new();
        for pending in self.inventories.values() {
            if !ids.insert(pending.id) {
                return Err(GuiBuildError::DuplicateBindingId(pending.id));
            }
            if !inventories.contains(pending.inventory) {
                return Err(GuiBuildError::UnknownInventory(pending.inventory));
            }
        }

        let rows = grid.len();
        let mut cells: Vec<Option<ItemProvider>> = (0..rows * ROW_WIDTH).map(|_| None).collect();

        let mut positions: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        for (index, ch) in grid.iter().flatten().enumerate() {
            if self.items.contains_key(ch) {
                positions.entry(*ch).or_default().push(index);
            }
        }
        for (ch, indices) in positions {
            let Some(provider) = self.items.remove(&ch) else {
                continue;
            };
            let Some((last, rest)) = indices.split_last() else {
                continue;
            };
            for &index in rest {
                cells[index] = Some(provider.try_clone().ok_or(GuiBuildError::ProviderReused(ch))?);
            }
            cells[*last] = Some(provider);
        }

        let mut bindings: BTreeMap<BindingId, InventoryBinding> = self
            .inventories
            .values()
            .map(|pending| {
                (
                    pending.id,
                    InventoryBinding {
                        inventory: pending.inventory,
                        cells: Vec::new(),
                    },
                )
            })
            .collect();

        let row_major = (0..rows).flat_map(move |y| (0..ROW_WIDTH).map(move |x| (y, x)));
        let column_major = (0..ROW_WIDTH).flat_map(move |x| (0..rows).map(move |y| (y, x)));
        let passes: [(Direction, Box<dyn Iterator<Item = (usize, usize)>>); 2] = [
            (Direction::Horizontal, Box::new(row_major)),
            (Direction::Vertical, Box::new(column_major)),
        ];

        for (direction, order) in passes {
            for (y, x) in order {
                let Some(pending) = self.inventories.get(&grid[y][x]) else {
                    continue;
                };
                if pending.direction != direction {
                    continue;
                }
                let Some(binding) = bindings.get_mut(&pending.id) else {
                    continue;
                };
                let index = y * ROW_WIDTH + x;
                let slot = binding.cells.len();
                binding.cells.push(index);
                cells[index] = Some(ItemProvider::virtual_slot(pending.inventory, pending.id, slot));
            }
        }

        Ok(CompiledGui {
            viewer,
            title: self.title,
            rows,
            cells,
            bindings,
            allow_close: self.allow_close,
        })
    }
}
