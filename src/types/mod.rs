pub mod category;
pub mod identifiers;
pub mod item;
pub mod selection_bundle;

pub use category::Category;
pub use identifiers::{NormalizedKey, SelectionVersion};
pub use item::Item;
pub use selection_bundle::{
    CandidateList, Candidates, CategoryOutcome, CategoryTrace, Pick, PickKind, Selection,
};
