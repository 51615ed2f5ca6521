mod common;
mod pipeline_test;
