pub mod cloud_storage;
pub mod db;
pub mod media;
pub mod openai;
