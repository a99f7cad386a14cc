//! Mode-dependent field locking.

use serde::Serialize;

use crate::models::Mode;

/// Result of [`compute_field_locks`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldLocks {
    pub readonly: bool,
    /// Submit, reset and add-entry controls are hidden, not just disabled.
    pub hide_controls: bool,
    pub submit_label: Option<&'static str>,
}

pub fn compute_field_locks(mode: Mode) -> FieldLocks {
    FieldLocks {
        readonly: mode.is_readonly(),
        hide_controls: mode.is_readonly(),
        submit_label: mode.submit_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_locks_everything() {
        let locks = compute_field_locks(Mode::View);
        assert!(locks.readonly);
        assert!(locks.hide_controls);
        assert_eq!(locks.submit_label, None);
    }

    #[test]
    fn test_create_and_edit_are_editable() {
        for mode in [Mode::Create, Mode::Edit] {
            let locks = compute_field_locks(mode);
            assert!(!locks.readonly);
            assert!(!locks.hide_controls);
        }
        assert_eq!(compute_field_locks(Mode::Edit).submit_label, Some("Update"));
    }
}
