//! Request execution primitives shared by the node executor.

pub mod http;
