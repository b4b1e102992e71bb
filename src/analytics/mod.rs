/// Analytics layer: pure, deterministic numeric functions over datasets.
///
/// Every function here takes its full input by reference and returns a new
/// value — no mutation, no I/O, no shared state. Identical inputs give
/// bit-identical outputs, which is what lets a dashboard memoize on dataset
/// identity alone. Degenerate input (empty, constant, too short) degrades
/// to a documented neutral result instead of erroring; only shape
/// violations (ragged matrices) are hard errors.

pub mod describe;
pub mod rank;
pub mod reduce;
pub mod response;
pub mod timeseries;
