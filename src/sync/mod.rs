// One-way forwarding of new records to the spreadsheet endpoint

mod forwarder;

pub use forwarder::{SyncError, SyncForwarder, SyncPayload};
