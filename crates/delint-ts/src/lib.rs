//! # delint-ts
//!
//! Tree-sitter based JavaScript/TypeScript front end for delint.
//!
//! Parsing is delegated to Tree-sitter's JavaScript and TypeScript
//! grammars; this crate only lowers the resulting concrete syntax trees
//! into the `delint-core` node kinds. It provides:
//!
//! - [`SourceParser`] trait for pluggable language support
//! - [`EcmaParser`] for JavaScript, TypeScript and TSX sources
//! - [`Dialect`] for grammar selection by file extension

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ecma;
pub mod frontend;
mod lower;

pub use ecma::{Dialect, EcmaParser};
pub use frontend::{ParseError, SourceParser};
