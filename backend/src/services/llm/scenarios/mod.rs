//! LLM Analysis Scenarios

pub mod healthcare;
