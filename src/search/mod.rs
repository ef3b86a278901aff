//! Search Module
//!
//! Web search used by the research agent to ground plans in current
//! prices, trends and guidelines. Backed by the Tavily search API.

pub mod tavily;

pub use tavily::{SearchError, TavilyClient, WebResult};
