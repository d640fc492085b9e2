#[derive(clap::Parser, Debug, Clone, Default)]
#[command(
    name = "whm-disk-monitor",
    version,
    about = "Check disk quota usage of every account owned by a WHM reseller and report via Telegram"
)]
pub struct Args {
    /// WHM host name (without scheme or port)
    #[arg(long, env = "WHM_HOST")]
    pub whm_host: Option<String>,

    /// WHM API port
    #[arg(long, env = "WHM_PORT", default_value_t = 2087)]
    pub whm_port: u16,

    /// WHM reseller user; only accounts owned by this user are checked
    #[arg(long, env = "WHM_USER")]
    pub whm_user: Option<String>,

    /// WHM API token
    #[arg(long, env = "WHM_API_TOKEN", hide_env_values = true)]
    pub whm_token: Option<String>,

    /// Disk usage percentage that triggers an alert
    #[arg(long, env = "DISK_ALERT_THRESHOLD", default_value_t = 90.0)]
    pub threshold: f64,

    /// IANA timezone used for log and message timestamps
    #[arg(long, env = "MONITOR_TIMEZONE", default_value = "Europe/Amsterdam")]
    pub timezone: String,

    /// Append-only log file
    #[arg(long, env = "MONITOR_LOG_FILE", default_value = "disk_usage_monitor.log")]
    pub log_file: String,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    /// Telegram chat or channel id that receives reports
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    /// Skip TLS certificate verification for the WHM API (self-signed panels)
    #[arg(long, env = "WHM_INSECURE")]
    pub insecure: bool,

    /// Pause after each account check, in milliseconds
    #[arg(long, env = "ACCOUNT_DELAY_MS", default_value_t = 1000)]
    pub account_delay_ms: u64,

    /// Timeout for each WHM API call, in seconds
    #[arg(long, env = "WHM_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Send a test message to Telegram and exit
    #[arg(long, conflicts_with = "test_connection")]
    pub test_telegram: bool,

    /// Check WHM API connectivity and exit
    #[arg(long)]
    pub test_connection: bool,

    /// Debug mode: log request URLs and raw response excerpts
    #[arg(short, long, env = "MONITOR_DEBUG")]
    pub debug: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
