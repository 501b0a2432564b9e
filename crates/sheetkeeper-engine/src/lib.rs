//! sheetkeeper_engine - Pure sheet bookkeeping computations.

pub mod engine;
