// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Registration and read-only profile lookups. Handlers in this tier get no
// caller identity and must validate every input themselves.

pub mod profile;
pub mod users;
