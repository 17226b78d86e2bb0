#![allow(dead_code)]

pub mod mock_repositories;

pub use mock_repositories::{
    a_query, a_record, CapturingSink, MockNextHandler, MockRuleRepository,
};
