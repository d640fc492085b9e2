//! Immutable run configuration built once from the command line.

use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;

use crate::cli::Args;
use crate::error::ConfigError;

const BOT_TOKEN_PLACEHOLDER: &str = "YOUR_BOT_TOKEN_HERE";
const CHAT_ID_PLACEHOLDER: &str = "YOUR_CHAT_ID_HERE";
const MAX_THRESHOLD: f64 = 1000.0;

/// Connection settings for the WHM JSON API.
#[derive(Clone, Debug)]
pub struct WhmConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub token: String,
    pub insecure: bool,
    pub timeout: Duration,
}

impl WhmConfig {
    pub fn base_url(&self) -> String {
        format!("https://{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub whm: WhmConfig,
    pub telegram: TelegramConfig,
    pub threshold: f64,
    pub timezone: Tz,
    pub log_file: PathBuf,
    pub account_delay: Duration,
    pub debug: bool,
}

/// Settings needed to log and to reach Telegram, without touching WHM.
#[derive(Clone, Debug)]
pub struct NotifierConfig {
    pub telegram: TelegramConfig,
    pub timezone: Tz,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl NotifierConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let bot_token = required(
            &args.telegram_bot_token,
            "--telegram-bot-token",
            "TELEGRAM_BOT_TOKEN",
        )?;
        let chat_id = required(&args.telegram_chat_id, "--telegram-chat-id", "TELEGRAM_CHAT_ID")?;
        if bot_token == BOT_TOKEN_PLACEHOLDER {
            return Err(ConfigError::Placeholder("TELEGRAM_BOT_TOKEN"));
        }
        if chat_id == CHAT_ID_PLACEHOLDER {
            return Err(ConfigError::Placeholder("TELEGRAM_CHAT_ID"));
        }

        let timezone: Tz = args
            .timezone
            .trim()
            .parse()
            .map_err(|_| ConfigError::Timezone(args.timezone.clone()))?;

        Ok(NotifierConfig {
            telegram: TelegramConfig { bot_token, chat_id },
            timezone,
            log_file: PathBuf::from(&args.log_file),
            debug: args.debug,
        })
    }
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let notifier = NotifierConfig::from_args(args)?;

        let whm = WhmConfig {
            host: required(&args.whm_host, "--whm-host", "WHM_HOST")?,
            port: args.whm_port,
            user: required(&args.whm_user, "--whm-user", "WHM_USER")?,
            token: required(&args.whm_token, "--whm-token", "WHM_API_TOKEN")?,
            insecure: args.insecure,
            timeout: Duration::from_secs(args.timeout_secs),
        };

        if !args.threshold.is_finite() || args.threshold <= 0.0 || args.threshold > MAX_THRESHOLD {
            return Err(ConfigError::Threshold(args.threshold));
        }

        Ok(Config {
            whm,
            telegram: notifier.telegram,
            threshold: args.threshold,
            timezone: notifier.timezone,
            log_file: notifier.log_file,
            account_delay: Duration::from_millis(args.account_delay_ms),
            debug: notifier.debug,
        })
    }
}

fn required(
    value: &Option<String>,
    flag: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::Missing { flag, env })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_args() -> Args {
        Args {
            whm_host: Some("panel.example.net".to_string()),
            whm_port: 2087,
            whm_user: Some("reseller".to_string()),
            whm_token: Some("TOKEN".to_string()),
            threshold: 90.0,
            timezone: "Europe/Amsterdam".to_string(),
            log_file: "monitor.log".to_string(),
            telegram_bot_token: Some("123:abc".to_string()),
            telegram_chat_id: Some("-100200".to_string()),
            account_delay_ms: 1000,
            timeout_secs: 30,
            ..Default::default()
        }
    }

    #[test]
    fn builds_from_complete_args() {
        let config = Config::from_args(&complete_args()).unwrap();
        assert_eq!(config.whm.base_url(), "https://panel.example.net:2087");
        assert_eq!(config.whm.user, "reseller");
        assert_eq!(config.timezone, chrono_tz::Europe::Amsterdam);
        assert_eq!(config.account_delay, Duration::from_secs(1));
        assert_eq!(config.whm.timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_missing_and_blank_values() {
        let mut args = complete_args();
        args.whm_host = None;
        assert_eq!(
            Config::from_args(&args).unwrap_err(),
            ConfigError::Missing { flag: "--whm-host", env: "WHM_HOST" }
        );

        let mut args = complete_args();
        args.whm_token = Some("   ".to_string());
        assert!(matches!(
            Config::from_args(&args),
            Err(ConfigError::Missing { env: "WHM_API_TOKEN", .. })
        ));
    }

    #[test]
    fn notifier_settings_do_not_need_whm() {
        let mut args = complete_args();
        args.whm_host = None;
        args.whm_user = None;
        args.whm_token = None;

        let notifier = NotifierConfig::from_args(&args).unwrap();
        assert_eq!(notifier.telegram.chat_id, "-100200");
        assert_eq!(notifier.timezone, chrono_tz::Europe::Amsterdam);
        assert!(Config::from_args(&args).is_err());

        args.telegram_bot_token = Some(BOT_TOKEN_PLACEHOLDER.to_string());
        assert_eq!(
            NotifierConfig::from_args(&args).unwrap_err(),
            ConfigError::Placeholder("TELEGRAM_BOT_TOKEN")
        );
    }

    #[test]
    fn rejects_placeholder_telegram_settings() {
        let mut args = complete_args();
        args.telegram_bot_token = Some(BOT_TOKEN_PLACEHOLDER.to_string());
        assert_eq!(
            Config::from_args(&args).unwrap_err(),
            ConfigError::Placeholder("TELEGRAM_BOT_TOKEN")
        );

        let mut args = complete_args();
        args.telegram_chat_id = Some(CHAT_ID_PLACEHOLDER.to_string());
        assert_eq!(
            Config::from_args(&args).unwrap_err(),
            ConfigError::Placeholder("TELEGRAM_CHAT_ID")
        );
    }

    #[test]
    fn rejects_bad_threshold_and_timezone() {
        for bad in [0.0, -5.0, f64::NAN, 1500.0] {
            let mut args = complete_args();
            args.threshold = bad;
            assert!(matches!(Config::from_args(&args), Err(ConfigError::Threshold(_))));
        }

        let mut args = complete_args();
        args.timezone = "Mars/Olympus".to_string();
        assert_eq!(
            Config::from_args(&args).unwrap_err(),
            ConfigError::Timezone("Mars/Olympus".to_string())
        );
    }
}
