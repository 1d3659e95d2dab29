//! Match aggregate and scoring state machine.

/// Match record, mutation operations, and undo/redo.
pub mod engine;
/// Operation status values for the silent-no-op guard contract.
pub mod outcome;
