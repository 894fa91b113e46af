mod object_store_gcs;

pub use object_store_gcs::GcsObjectStore;
