// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (JWT auth)
pub mod public; // No authentication required
pub mod protected; // Bearer token required, caller injected as `AuthUser`
