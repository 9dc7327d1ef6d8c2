//! Application constants
//!
//! Centralized location for endpoints, sentinels and UI defaults.

/// Default base URL of the GRID data service
pub const DEFAULT_API_URL: &str = "https://api.grid.gg";

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "x-api-key";

/// Page size of the series search (only the first page is fetched)
pub const SEARCH_PAGE_SIZE: u32 = 50;

/// Download option id meaning "the compressed events archive"
pub const ARCHIVE_OPTION_ID: &str = "events-grid-compressed";

/// File id that marks an events archive in the file listing
pub const ARCHIVE_MANIFEST_ID: &str = "events-grid";

/// Extension of per-game replay files
pub const REPLAY_EXTENSION: &str = "rofl";

/// Directory name under the user's config dir
pub const CONFIG_DIR_NAME: &str = "stealth-grid-cli";

/// Credential file name
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file name (written next to the credential file)
pub const LOG_FILE_NAME: &str = "stealth-grid.log";

/// Suggested file name for CSV exports
pub const DEFAULT_EXPORT_NAME: &str = "series.csv";

/// Title of the game list
pub const GAME_LIST_TITLE: &str = "Stealth Grid - Select a Game";

/// Title of the download option list
pub const DOWNLOAD_LIST_TITLE: &str = "Select Download Option";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
