//! The per-page review flow over an active session.

mod controller;
mod page;

pub use {
    controller::{AnnotationController, ItemView, PageView},
    page::Pagination,
};
