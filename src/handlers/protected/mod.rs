// handlers/protected/mod.rs - Handlers behind JWT authentication
//
// Each handler pulls the `Caller` injected by `jwt_auth_middleware` and
// hands it to the matching service function together with the gateway.
pub mod member;
pub mod project;
