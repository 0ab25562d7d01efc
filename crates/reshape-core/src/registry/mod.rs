//! Module: registry
//! Responsibility: wrapper and reactive-wrapper type classification.
//! Does not own: conversion rules (see `convert`).
//! Boundary: pure predicates over raw types, plus reactive adaptation.

mod reactive;
mod wrapper;


// re-exports
pub use reactive::{ReactiveError, ReactiveWrapperRegistry, ReactiveWrappers};
pub use wrapper::{WrapperTypeRegistry, WrapperTypes};
