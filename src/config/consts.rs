// src/config/consts.rs

// Module source markers
pub const IDS_START: &str = "mod:RegisterEnableMob(";
pub const VARS_START: &str = "if L then";
pub const IDS_END: char = ')';
pub const VARS_END: &str = "end";

// Net config
pub const DEFAULT_BASE_URL: &str = "https://{subdomain}.wowhead.com";
pub const NPC_PATH: &str = "/npc={id}";
pub const NOT_FOUND_MARKER: &str = "notFound";
pub const HEADING_SELECTOR: &str = "h1.heading-size-1";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_REDIRECTS: usize = 5;

// Batch
pub const DEFAULT_SUFFIX: &str = "Trash.lua";
pub const TRASH_SUFFIX: &str = " Trash";

// Concurrency
pub const WORKERS: usize = 4;
