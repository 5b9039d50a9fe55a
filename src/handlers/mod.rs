// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer JWT + resolved user)
pub mod public;    // Tier 1: No authentication required (/auth/*, /health)
pub mod protected; // Tier 2: JWT authentication required (/reports/*)

pub mod utils;
