//! Toast notification markup.

use std::fmt;

use super::escape_html;

/// Toast severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information.
    #[default]
    Info,
    /// Action succeeded.
    Success,
    /// Action failed.
    Error,
}

impl Severity {
    /// Font Awesome icon name.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "times-circle",
            Self::Info => "info-circle",
        }
    }

    /// Tailwind colour family for the icon.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "green",
            Self::Error => "red",
            Self::Info => "blue",
        }
    }

    /// Name used in the `alert-<type>` class.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class list of the toast container.
#[must_use]
pub fn toast_class(severity: Severity) -> String {
    format!(
        "alert alert-{severity} bg-white dark:bg-gray-800 shadow-lg rounded-lg p-4 max-w-md \
         flex items-center justify-between animate-slide-in fixed top-20 right-4 z-50"
    )
}

/// Inner markup of a toast. The dismiss control carries `data-action="dismiss"`.
#[must_use]
pub fn toast_markup(message: &str, severity: Severity) -> String {
    let icon = severity.icon();
    let color = severity.color();
    let message = escape_html(message);
    format!(
        r#"
        <div class="flex items-center">
            <i class="fas fa-{icon} text-{color}-500 mr-3"></i>
            <span class="text-gray-800 dark:text-gray-200">{message}</span>
        </div>
        <button data-action="dismiss" class="ml-4 text-gray-500 hover:text-gray-700 dark:text-gray-400 dark:hover:text-gray-200">
            <i class="fas fa-times"></i>
        </button>
    "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_styles() {
        assert_eq!(Severity::Success.icon(), "check-circle");
        assert_eq!(Severity::Error.color(), "red");
        assert_eq!(Severity::default(), Severity::Info);
        assert_eq!(Severity::Info.icon(), "info-circle");
        assert_eq!(Severity::Info.color(), "blue");
    }

    #[test]
    fn test_toast_markup_escapes_message() {
        let html = toast_markup("<img src=x onerror=alert(1)>", Severity::Error);
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
        assert!(html.contains("fa-times-circle text-red-500"));
        assert!(html.contains(r#"data-action="dismiss""#));
    }

    #[test]
    fn test_toast_class_carries_alert() {
        let class = toast_class(Severity::Success);
        assert!(class.starts_with("alert alert-success "));
        assert!(class.contains("fixed"));
    }
}
