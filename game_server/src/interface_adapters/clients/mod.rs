// Outbound HTTP clients to other services.

pub mod ai;
