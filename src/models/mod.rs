pub mod fields;
pub mod normalize;
pub mod order;
pub mod position;

pub use fields::{Field, Resolved};
pub use normalize::{PositionsPayload, Record, normalize_records};
pub use order::{Code, Label, Order, OrderSide, OrderStatus, OrderType};
pub use position::{Position, ProfitLoss, ProfitLossSource, QuantityCheck, Valuation, retain_held};
