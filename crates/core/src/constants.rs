//! Application constants and configuration defaults.

/// Sender value for system-generated entries (joins, leaves, title changes).
pub const GROUP_NOTIFICATION: &str = "group_notification";

/// User filter value meaning "all senders combined".
pub const OVERALL: &str = "Overall";

/// Body text the exporter writes in place of attached media.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// Default number of entries in the most-common-words table.
pub const DEFAULT_TOP_WORDS: usize = 20;

/// Default number of entries in the busiest-senders table.
pub const DEFAULT_TOP_SENDERS: usize = 5;

/// Default number of entries in the emoji table (0 keeps all).
pub const DEFAULT_TOP_EMOJI: usize = 0;

/// Decimal places kept on percentage shares.
pub const PERCENT_PRECISION: i32 = 2;

/// Maximum transcript size accepted for import (100 MB).
pub const MAX_IMPORT_FILE_SIZE: u64 = 100 * 1024 * 1024;
