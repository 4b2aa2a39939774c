pub mod controller;
pub mod model;
pub mod router;

pub use model::*;
pub use router::{init_login_router, init_pages_router};
