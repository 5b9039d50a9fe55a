// handlers/public/auth/mod.rs - Public authentication handlers
//
// Account creation and token acquisition; neither requires a bearer token.

pub mod login;  // POST /auth/login - verify credentials and issue JWT
pub mod signup; // POST /auth/signup - create a new account

pub use login::post as login_post;
pub use signup::post as signup_post;
