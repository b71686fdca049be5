pub mod builder;
pub mod client;
pub mod error;
pub mod fields;
pub mod image;
pub mod normalize;
pub mod sheet;
pub mod state;

mod rate_limit;

pub use builder::{Catalog, CatalogFilter};
pub use client::SheetClient;
pub use error::CatalogError;
pub use fields::{Field, RawRow, FIELD_ALIASES};
pub use image::{primary_image_url, resolve_image, resolve_image_with_size, resolve_images};
pub use normalize::{normalize_row, normalize_rows, NormalizeOptions};
pub use sheet::read_rows;
pub use state::{build_catalog, CatalogState, LoadStatus};
