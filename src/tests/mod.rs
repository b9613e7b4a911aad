// Test modules for campus-client crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on behavior verification.

// Test helper utilities shared across test modules
pub mod helpers;

pub mod handler;
