// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Routes in this tier sit behind `jwt_auth_middleware`, which rejects the
// request with 401 before the handler runs unless a valid token is present.
// Handlers receive the caller as `Extension<AuthUser>`.

pub mod profile;
