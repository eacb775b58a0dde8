pub mod routes;
pub mod tool_call;
