/// User-Agent header for outgoing requests.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The number of ranks displayed on a single page of a ranking.
///
/// This should be as low as necessary to fit a ranking into
/// a single chat message.
pub const PAGE_SIZE: usize = 10;

/// The seconds after which the controls of a ranking are frozen.
///
/// The deadline is fixed when the ranking is sent, and is not
/// extended by navigating the ranking.
pub const DEFAULT_PAGER_TIMEOUT_SECS: u64 = 10;

/// The total time allowed for a single request to the stats API.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// The stats API's origin.
pub const DEFAULT_API_URL: &str = "https://api.wigle.net";

/// The placeholder login that the standings use for unnamed uploads.
/// It is matched case-sensitively, and never displayed.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Group members with this flag in their status have left the group,
/// and are not displayed in the group's user ranking.
pub const DEPARTED_STATUS_FLAG: char = 'L';
