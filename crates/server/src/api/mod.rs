pub mod handlers;
pub mod launcher;
pub mod middleware;
pub mod routes;
pub mod workspaces;

pub use routes::create_router;
