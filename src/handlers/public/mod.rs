// handlers/public/mod.rs - Public handlers (no authentication)
//
// Token acquisition and liveness. Nothing here may read a Principal.

pub mod auth;
pub mod health;
