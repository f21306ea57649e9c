//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing token)|
//! | 40-49   | badge            | Session, API, and sync outcomes          |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (config dir not writable, ...).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Badge (40-49)
// =============================================================================

/// Token rejected by the API (401/403) at login.
pub const EXIT_NOT_AUTH: u8 = 40;

/// API unreachable.
pub const EXIT_NETWORK: u8 = 41;

/// API answered with an unexpected HTTP status or body.
pub const EXIT_UPSTREAM: u8 = 42;

/// Background fetch ran and reported `failed`.
pub const EXIT_SYNC_FAILED: u8 = 43;

/// Badge permission denied by the host.
pub const EXIT_PERMISSION_DENIED: u8 = 44;

/// Background fetch returned without reporting: no session, or sync disabled.
pub const EXIT_SYNC_SKIPPED: u8 = 45;
