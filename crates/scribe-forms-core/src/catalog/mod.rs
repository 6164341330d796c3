//! Work-item catalog: the per-language mapping of audio clips to machine
//! outputs, grouped into forms.

#[allow(clippy::module_inception)]
mod catalog;
mod work_item;

pub use {catalog::WorkItemCatalog, work_item::WorkItem};
