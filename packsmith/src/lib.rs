//! Packsmith - resource pack workbench
//!
//! This library manages projects that assemble a resource pack by layering a
//! project's own files over a baseline asset set and any number of library
//! packs. Its centrepiece is the import pipeline, which populates a project
//! from an existing pack archive.
//!
//! # Modules
//!
//! - [`archive`] - Read-only access to zip pack archives
//! - [`asset`] - Canonical asset keys and archive path classification
//! - [`source`] - Baseline and library asset sources, layered into a set
//! - [`project`] - The mutable project a pack is imported into
//! - [`import`] - The monitored import sequence
//! - [`library`] - On-disk store of library packs
//! - [`config`] - INI configuration file
//! - [`logging`] - Tracing subscriber setup

pub mod archive;
pub mod asset;
pub mod config;
pub mod import;
pub mod library;
pub mod logging;
pub mod project;
pub mod source;
