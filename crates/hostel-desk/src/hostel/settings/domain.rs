use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::SettingsError;

/// Singleton record of operational toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub application_deadline: Option<NaiveDate>,
    pub max_applications_per_student: u32,
    pub payment_enabled: bool,
    pub notifications_enabled: bool,
    pub auto_approval_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl SettingsRecord {
    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            application_deadline: None,
            max_applications_per_student: 1,
            payment_enabled: false,
            notifications_enabled: true,
            auto_approval_enabled: false,
            updated_at: now,
        }
    }
}

/// Whitelisted partial update. Unknown keys are rejected at deserialization.
///
/// `application_deadline` distinguishes an absent key (keep) from an explicit `null` (clear).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsPatch {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub application_deadline: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub max_applications_per_student: Option<u32>,
    #[serde(default)]
    pub payment_enabled: Option<bool>,
    #[serde(default)]
    pub notifications_enabled: Option<bool>,
    #[serde(default)]
    pub auto_approval_enabled: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply(
        self,
        mut record: SettingsRecord,
        now: DateTime<Utc>,
    ) -> Result<SettingsRecord, SettingsError> {
        if let Some(limit) = self.max_applications_per_student {
            if limit == 0 {
                return Err(SettingsError::Validation(
                    "max_applications_per_student must be at least 1".to_string(),
                ));
            }
            record.max_applications_per_student = limit;
        }
        if let Some(deadline) = self.application_deadline {
            record.application_deadline = deadline;
        }
        if let Some(flag) = self.payment_enabled {
            record.payment_enabled = flag;
        }
        if let Some(flag) = self.notifications_enabled {
            record.notifications_enabled = flag;
        }
        if let Some(flag) = self.auto_approval_enabled {
            record.auto_approval_enabled = flag;
        }
        record.updated_at = now;
        Ok(record)
    }
}

fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn defaults_match_fresh_install() {
        let record = SettingsRecord::defaults(now());
        assert_eq!(record.max_applications_per_student, 1);
        assert!(record.notifications_enabled);
        assert!(!record.payment_enabled);
        assert!(!record.auto_approval_enabled);
        assert_eq!(record.application_deadline, None);
    }

    #[test]
    fn patch_distinguishes_null_from_absent_deadline() {
        let absent: SettingsPatch = serde_json::from_str(r#"{"payment_enabled": true}"#).unwrap();
        assert_eq!(absent.application_deadline, None);

        let cleared: SettingsPatch =
            serde_json::from_str(r#"{"application_deadline": null}"#).unwrap();
        assert_eq!(cleared.application_deadline, Some(None));

        let set: SettingsPatch =
            serde_json::from_str(r#"{"application_deadline": "2025-08-31"}"#).unwrap();
        assert_eq!(
            set.application_deadline,
            Some(NaiveDate::from_ymd_opt(2025, 8, 31))
        );
    }

    #[test]
    fn patch_rejects_unknown_keys() {
        let result = serde_json::from_str::<SettingsPatch>(r#"{"is_admin": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn apply_rejects_zero_limit() {
        let patch = SettingsPatch {
            max_applications_per_student: Some(0),
            ..SettingsPatch::default()
        };
        let err = patch
            .apply(SettingsRecord::defaults(now()), now())
            .expect_err("zero limit");
        assert!(matches!(err, SettingsError::Validation(_)));
    }
}
