//! Controller layer: routes UI actions to the backend command queue.

pub mod orchestration;
