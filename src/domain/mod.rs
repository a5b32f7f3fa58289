//! Domain objects and tool integrations
//!
//! Provides the space-launch business logic exposed over the MCP protocol

pub mod tools;
