//! Tableau-based GBA construction, GBA→BA and model→BA conversion,
//! synchronous product, and Büchi emptiness checking.

mod acceptance;
mod ba;
mod emptiness;
mod error;
mod gba;
mod model;
mod product;
mod symbol;
mod tableau;

pub use ba::{from_gba, Ba, CounterState};
pub use emptiness::{find_accepting_lasso, Lasso};
pub use error::AutomataError;
pub use gba::{Gba, NodeId};
pub use model::{lift_model, validate as validate_model, Kripke, ModelState};
pub use product::synchronous_product;
pub use symbol::{Alphabet, Symbol};
pub use tableau::{build_gba, TableauNode};
