use crate::models::OutputLanguage;
use std::env;

const LOCALE_VARS: [&str; 4] = ["LC_ALL", "LC_MESSAGES", "LANG", "LANGUAGE"];

pub struct LocaleDetector;

impl LocaleDetector {
    /// Detect the system locale and return the matching OutputLanguage
    pub fn detect_system_locale() -> OutputLanguage {
        LOCALE_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find_map(|locale| Self::parse_locale(&locale))
            .unwrap_or(OutputLanguage::English)
    }

    /// Handles `zh_CN.UTF-8`, `zh_TW`, `zh`, `Chinese_China.936`, `en_US`, `C`, `POSIX`.
    pub(crate) fn parse_locale(locale: &str) -> Option<OutputLanguage> {
        let locale_lower = locale.to_lowercase();

        if locale_lower.starts_with("zh") || locale_lower.contains("chinese") {
            return Some(OutputLanguage::Chinese);
        }

        if locale_lower.starts_with("en")
            || locale_lower.contains("english")
            || locale_lower == "c"
            || locale_lower.starts_with("c.")
            || locale_lower == "posix"
        {
            return Some(OutputLanguage::English);
        }

        None
    }

    /// Current locale variables, for debug output
    pub fn get_system_locale_info() -> String {
        LOCALE_VARS
            .iter()
            .map(|var| match env::var(var) {
                Ok(value) => format!("{}={}", var, value),
                Err(_) => format!("{}=(not set)", var),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
