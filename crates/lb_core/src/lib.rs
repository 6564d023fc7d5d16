/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Core types for the lb template engine.
//!
//! This crate holds everything the template passes operate on but do not own:
//! the mutable [`Document`] tree, helpers for the nested [`Data`] bound to
//! templates, the engine configuration ([`EngineConfig`], [`Markers`]) and the
//! language property store used for i18n fallback ([`LanguageProperties`]).

pub mod config;
pub mod data;
pub mod dom;
pub mod error;
pub mod locale;

pub use config::{EngineConfig, Markers};
pub use data::Data;
pub use dom::{Attribute, Document, NodeId, NodeKind};
pub use error::CoreError;
pub use locale::{
    contains, default_language_code, EnvLocale, FixedLocale, HookError, LanguageProperties,
    LocaleProvider, Property, PropertyFn,
};
