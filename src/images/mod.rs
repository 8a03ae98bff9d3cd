//! Image store for uploaded school photos.
//!
//! Uploads are written once into a public directory under a generated,
//! timestamp-prefixed name and are never modified afterwards. The server
//! exposes the same directory as static files, so the stored path is directly
//! usable by a browser.

mod storage;

pub use storage::{ImageStore, StoredImage};
