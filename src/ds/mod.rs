pub mod recency_list;

pub use recency_list::{EntryId, RecencyList};
