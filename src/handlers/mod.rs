// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT auth, caller injected by middleware)
pub mod protected; // /api/*
pub mod public; // /, /health
