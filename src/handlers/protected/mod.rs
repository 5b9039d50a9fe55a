// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route in this tier sits behind jwt_auth_middleware and
// validate_user_middleware, which inject the acting Principal. Handlers pass
// that principal explicitly to the services; none of them trust owner or id
// fields from request bodies.

pub mod reports;
