//! # System Constants
//!
//! Well-known identifiers and defaults shared by the discovery core and the
//! `discovery` command line tool.

/// Delimiter between resource path segments. Reserved: ids may not contain it.
pub const PATH_DELIMITER: char = '>';

/// Id of the synthetic root used when no cluster identity is configured
pub const NO_CLUSTER_ID: &str = "no-cluster";

/// Default location of the in-flight generation marker
pub const DEFAULT_MARKER_PATH: &str = "/tmp/dm_inprogress";

/// Default location of the persisted health snapshot
pub const DEFAULT_SNAPSHOT_PATH: &str = "/tmp/dm_health.json";

/// Default topology ids used by the topology collector
pub mod topology {
    pub const DEFAULT_SITE_ID: &str = "site_001";
    pub const DEFAULT_RACK_ID: &str = "rack_001";
    pub const DEFAULT_NODE_ID: &str = "node_001";
}

/// Environment variables read by configuration and logging
pub mod env {
    pub const CONFIG_PREFIX: &str = "DISCOVERY";
    pub const LOG_FORMAT: &str = "DISCOVERY_LOG_FORMAT";
}

/// Exit code used by the CLI for any failed command (EINVAL)
pub const EXIT_INVALID: i32 = 22;
