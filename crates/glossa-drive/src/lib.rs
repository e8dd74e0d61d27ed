pub mod client;
pub mod types;

pub use client::DriveClient;
pub use types::{DocumentContent, DriveError, DriveFile, DriveRequest, DriveResponse};
