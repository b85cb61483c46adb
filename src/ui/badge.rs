//! Unread-message badge.

/// Visible state of the unread-count badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeState {
    /// Badge shown with the given label.
    Visible(String),
    /// Badge hidden (`display: none`).
    Hidden,
}

impl BadgeState {
    /// Compute the badge for an unread count, capping the label at `cap`.
    ///
    /// A count that is absent, zero or negative hides the badge; counts
    /// above `cap` read `"{cap}+"`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chirec_ui::ui::BadgeState;
    ///
    /// assert_eq!(BadgeState::for_count(Some(150), 99), BadgeState::Visible("99+".into()));
    /// assert_eq!(BadgeState::for_count(Some(0), 99), BadgeState::Hidden);
    /// ```
    #[must_use]
    pub fn for_count(count: Option<i64>, cap: u64) -> Self {
        match count.and_then(|n| u64::try_from(n).ok()) {
            Some(n) if n > cap => Self::Visible(format!("{cap}+")),
            Some(n) if n > 0 => Self::Visible(n.to_string()),
            _ => Self::Hidden,
        }
    }

    /// CSS `display` value for this state.
    #[must_use]
    pub fn display(&self) -> &'static str {
        match self {
            Self::Visible(_) => "flex",
            Self::Hidden => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_counts() {
        assert_eq!(BadgeState::for_count(Some(0), 99), BadgeState::Hidden);
        assert_eq!(BadgeState::for_count(None, 99), BadgeState::Hidden);
        assert_eq!(BadgeState::for_count(Some(-1), 99), BadgeState::Hidden);
        assert_eq!(BadgeState::for_count(Some(i64::MIN), 99), BadgeState::Hidden);
        assert_eq!(BadgeState::for_count(Some(5), 99), BadgeState::Visible("5".into()));
        assert_eq!(BadgeState::for_count(Some(99), 99), BadgeState::Visible("99".into()));
        assert_eq!(BadgeState::for_count(Some(100), 99), BadgeState::Visible("99+".into()));
        assert_eq!(BadgeState::for_count(Some(150), 99), BadgeState::Visible("99+".into()));
    }

    #[test]
    fn test_display_values() {
        assert_eq!(BadgeState::Hidden.display(), "none");
        assert_eq!(BadgeState::Visible("1".into()).display(), "flex");
    }
}
