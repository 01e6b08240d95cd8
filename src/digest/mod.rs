pub mod enrich;
pub mod output;
pub mod sources;

pub use enrich::{enrich_selection, Enricher};
pub use output::{DailyDigest, DigestError, DIGEST_FILE_NAME};
pub use sources::{gather_candidates, CandidateSource};
