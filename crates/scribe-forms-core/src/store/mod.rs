mod fs_store;
mod location;
mod memory_store;
mod object_store;

pub use {
    fs_store::FsObjectStore, location::StoreLocation, memory_store::MemoryObjectStore,
    object_store::ObjectStore,
};
