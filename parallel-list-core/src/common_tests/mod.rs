//! Test suites shared by every guard backend.
//!
//! Each suite is generic over `G: Guard` so the same checks run against
//! `DeferredGuard` here and `EpochGuard` in parallel-list-crossbeam.
