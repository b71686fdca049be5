pub mod cart;
pub mod error;
pub mod line;
pub mod order;
pub mod state;
pub mod storage;

pub use cart::Cart;
pub use error::{CartError, OrderError, StorageError};
pub use line::{CartLine, StoredLine};
pub use order::{
    build_direct_message, build_order_message, checkout_url, CheckoutConfig, CustomerDetails,
    MessageTemplate, OrderMessage,
};
pub use state::{CartCommand, CartState};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
