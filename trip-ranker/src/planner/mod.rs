//! Trip selection and ranking.
//!
//! Pure functions over upstream trip candidates:
//! - picking the single fastest trip
//! - attaching per-train journey detail to every leg
//! - scoring trips by comfort and ranking them best-first

mod enrich;
mod fastest;
mod rank;

pub use enrich::{distinct_product_numbers, enrich_trips};
pub use fastest::select_fastest;
pub use rank::{ScoredTrip, comfort_score, crowd_points, facility_count, rank_by_comfort};
