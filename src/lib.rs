//! # Identity Service
//!
//! HTTP service for student identity management: registration, login with a
//! bcrypt-checked secret, and verification of the session tokens it issues.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli.rs           # clap commands (serve, hash-secret)
//! ├── docs.rs          # OpenAPI document
//! ├── logging.rs       # tracing subscriber and request logging
//! ├── middleware/      # bearer token and JSON extractors
//! ├── modules/
//! │   ├── auth/        # login and verify-auth handlers
//! │   ├── health/      # liveness probe
//! │   └── students/    # registration handler and service
//! ├── router.rs        # routes and tower layers
//! └── state.rs         # shared application state
//! crates/
//! ├── identity-auth    # token maker, authenticator, store boundaries
//! ├── identity-cache   # Redis token store
//! ├── identity-config  # environment configuration
//! ├── identity-core    # AppError, error codes, bcrypt helpers
//! ├── identity-db      # Postgres pool and students repository
//! ├── identity-events  # student_registered events on Redis Streams
//! └── identity-models  # student entity, validation and DTOs
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | POST | `/v1/identities/students` | 201 `{ id }` |
//! | POST | `/v1/identities/students/login` | 201 `{ token_id, expires_at, token }` |
//! | POST | `/v1/identities/students/verify-auth` | 200 |
//! | GET | `/healthcheck` | 200 |
//!
//! Errors use `{ "err_code": "identity_service.error.<code>", "message": "..." }`.
//!
//! ## Quick Start
//!
//! ```bash
//! TOKEN_SECRET=change-me
//! DB_HOST=localhost DB_PORT=5432 DB_USER=identity DB_PASSWORD=identity DB_NAME=identity
//! MEMORY_DB_HOST=localhost MEMORY_DB_PORT=6379
//! SWAGGER_ENABLED=true
//! ```
//!
//! ```bash
//! cargo run -- serve
//! cargo run -- hash-secret "celacanto provoca maremoto"
//! ```

pub mod cli;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

// Re-export workspace crates for convenience
pub use identity_auth;
pub use identity_config;
pub use identity_core;
pub use identity_db;
pub use identity_events;
pub use identity_models;
