pub mod dogs;
pub mod gibs;
pub mod palette;
pub mod tile;

pub use gibs::{GibsLayer, layer_by_id, tile_url};
pub use palette::{PaletteRequest, PaletteResponse, PaletteSlot};
pub use tile::{GridLoadTracker, GridPhase, GridRequest, TileCoord, grid_coords};
