pub mod request;
pub mod result;
pub mod selection;
pub mod state;

pub use request::{ResolvedRequest, ScaffoldRequest};
pub use result::ScaffoldResult;
pub use selection::FeatureSelection;
pub use state::SelectionState;
