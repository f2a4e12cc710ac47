//! Shared building blocks for the `kubeq` command line front end.

pub mod config;
