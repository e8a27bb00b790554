//! # Store Primitives
//!
//! Hardcoded constants shared by the store, the view projection and the CLI.

/// Length of a store-allocated identifier.
pub const ID_LENGTH: usize = 10;

/// URL-safe alphabet identifiers are drawn from (`A-Za-z0-9_-`).
pub const ID_ALPHABET: [char; 64] = [
    '_', '-', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
    'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Maximum draws before the allocator gives up.
///
/// With 64^10 candidates a collision streak this long means the random
/// source is broken, not that the store is full.
pub const MAX_ID_ATTEMPTS: usize = 64;

/// The view external callers select first.
pub const DEFAULT_LAYOUT: &str = "default";

/// Node type used for components without an explicit one.
pub const DEFAULT_NODE_TYPE: &str = "componentDetails";

/// Node type of group containers in a projected view.
pub const GROUP_NODE_TYPE: &str = "group";

/// Background of a group whose layout sets no color.
pub const DEFAULT_GROUP_BACKGROUND: &str = "rgba(255, 0, 255, 0.2)";

/// Columns of the fallback grid for components with no layout in a view.
pub const VIEW_GRID_COLUMNS: usize = 5;

/// Horizontal step of the fallback grid.
pub const VIEW_GRID_STEP_X: f64 = 200.0;

/// Vertical step of the fallback grid.
pub const VIEW_GRID_STEP_Y: f64 = 100.0;

/// Maximum size of a Graph Document accepted by the JSON reader (100 MB).
pub const MAX_DOCUMENT_SIZE: usize = 100 * 1024 * 1024;
