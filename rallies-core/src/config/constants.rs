/// Model ID constants for the supported completion backends
pub mod models {
    pub mod openai {
        pub const DEFAULT_MODEL: &str = "gpt-4.1";
    }

    pub mod google {
        pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
    }
}

/// Remote endpoints
pub mod urls {
    pub const RALLIES_API_BASE: &str = "https://rallies.ai";
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

    pub const COMPLETE_ACTION_PATH: &str = "/api/complete-cli-action";
    pub const FEED_PATH: &str = "/api/get-feed-conversations?myfeed=0";
    pub const CHAT_LINK_BASE: &str = "https://rallies.ai/chat";
    pub const SUPPORT_EMAIL: &str = "support@rallies.ai";
}

/// Environment variable names
pub mod env {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    /// Overrides the per-user configuration directory
    pub const RALLIES_HOME: &str = "RALLIES_HOME";
}

/// Files stored under the configuration directory
pub mod files {
    pub const CONFIG_DIR_NAME: &str = ".rallies";
    pub const CONFIG_FILE: &str = "config.json";
    pub const HISTORY_FILE: &str = "history.txt";
    pub const SESSION_FILE_PREFIX: &str = "session_";
    pub const SESSION_FILE_EXTENSION: &str = "json";
    pub const SESSION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
}

/// Timeouts and limits
pub mod limits {
    use std::time::Duration;

    pub const ACTION_TIMEOUT: Duration = Duration::from_secs(180);
    pub const FEED_TIMEOUT: Duration = Duration::from_secs(10);
    pub const STRUCTURED_OUTPUT_ATTEMPTS: usize = 3;

    pub const FEED_MIN_SCORE: i64 = 4;
    pub const FEED_MAX_ITEMS: usize = 25;
    pub const FEED_QUESTION_MAX_CHARS: usize = 80;

    pub const SESSION_SUBJECT_MAX_CHARS: usize = 70;

    /// Seconds the "retrieving" message stays up before filler phrases rotate
    pub const RETRIEVING_PHASE_SECS: u64 = 10;
    pub const FILLER_ROTATION_SECS: u64 = 10;
    pub const PROGRESS_POLL_INTERVAL: Duration = Duration::from_secs(1);
}

/// Conversation role strings as they appear on the wire
pub mod message_roles {
    pub const USER: &str = "user";
    pub const ASSISTANT: &str = "assistant";
    pub const DEVELOPER: &str = "developer";
    pub const SYSTEM: &str = "system";
}

pub mod defaults {
    pub const DEFAULT_PROVIDER: &str = "openai";
}
