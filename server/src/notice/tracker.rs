//! Per-user dismissal state of version-gated notices.
//!
//! Each record remembers the threshold (required version) it was taken for.
//! When the threshold moves, the dismissal is dropped and the notice shows
//! again.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use amona_types::options_adapter::OptionsAdapter;

use super::addon::{Notice, arrange};
use super::version;
use crate::prelude::*;

const META_PREFIX: &str = "amona-notice:";

/// Stored dismissal record of one notice for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeDismissalRecord {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub threshold: Option<Box<str>>,
	#[serde(default)]
	pub dismissed: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub snoozed_until: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeState {
	Unseen,
	DismissedForVersion(Box<str>),
}

#[derive(Debug, Clone)]
pub struct NoticeTracker {
	options: Arc<dyn OptionsAdapter>,
}

fn meta_key(notice_id: &str) -> String {
	format!("{}{}", META_PREFIX, notice_id)
}

impl NoticeTracker {
	pub fn new(options: Arc<dyn OptionsAdapter>) -> Self {
		Self { options }
	}

	pub async fn read_record(
		&self,
		user_id: UserId,
		notice_id: &str,
	) -> ClResult<NoticeDismissalRecord> {
		let Some(value) = self.options.read_user_meta(user_id, &meta_key(notice_id)).await? else {
			return Ok(NoticeDismissalRecord::default());
		};
		Ok(serde_json::from_value(value).unwrap_or_else(|err| {
			warn!("Unreadable notice record '{}' of user {}: {}", notice_id, user_id, err);
			NoticeDismissalRecord::default()
		}))
	}

	async fn write_record(
		&self,
		user_id: UserId,
		notice_id: &str,
		record: &NoticeDismissalRecord,
	) -> ClResult<()> {
		let value = serde_json::to_value(record)?;
		self.options.update_user_meta(user_id, &meta_key(notice_id), &value).await
	}

	/// Record the current threshold, clearing the dismissal when it changed
	pub async fn sync_threshold(
		&self,
		user_id: UserId,
		notice_id: &str,
		threshold: &str,
	) -> ClResult<NoticeDismissalRecord> {
		let mut record = self.read_record(user_id, notice_id).await?;
		match record.threshold.as_deref() {
			Some(recorded) if version::is_same(recorded, threshold) => return Ok(record),
			Some(recorded) => {
				info!(
					"Notice '{}' threshold moved {} -> {} for user {}, resetting",
					notice_id, recorded, threshold, user_id
				);
				record = NoticeDismissalRecord::default();
			}
			None => {
				if record.dismissed || record.snoozed_until.is_some() {
					debug!("Notice '{}' dismissed before any threshold, resetting", notice_id);
				}
				record = NoticeDismissalRecord::default();
			}
		}

		record.threshold = Some(threshold.into());
		self.write_record(user_id, notice_id, &record).await?;
		Ok(record)
	}

	pub async fn dismiss(
		&self,
		user_id: UserId,
		notice_id: &str,
		repeat_after: Option<u64>,
	) -> ClResult<NoticeState> {
		self.dismiss_at(user_id, notice_id, repeat_after, Timestamp::now()).await
	}

	/// Dismiss a notice for good (`repeat_after` absent or 0) or snooze it
	pub async fn dismiss_at(
		&self,
		user_id: UserId,
		notice_id: &str,
		repeat_after: Option<u64>,
		now: Timestamp,
	) -> ClResult<NoticeState> {
		let mut record = self.read_record(user_id, notice_id).await?;
		match repeat_after {
			Some(secs) if secs > 0 => {
				record.snoozed_until = Some(now.add_seconds(secs));
				debug!("Notice '{}' snoozed for {}s by user {}", notice_id, secs, user_id);
			}
			_ => {
				record.dismissed = true;
				record.snoozed_until = None;
				debug!("Notice '{}' dismissed by user {}", notice_id, user_id);
			}
		}
		self.write_record(user_id, notice_id, &record).await?;
		Ok(state_of(&record))
	}

	pub async fn state(&self, user_id: UserId, notice_id: &str) -> ClResult<NoticeState> {
		Ok(state_of(&self.read_record(user_id, notice_id).await?))
	}

	pub async fn should_display(
		&self,
		user_id: UserId,
		notice_id: &str,
		threshold: &str,
	) -> ClResult<bool> {
		self.should_display_at(user_id, notice_id, threshold, Timestamp::now()).await
	}

	/// Sync the threshold, then show unless dismissed or snoozed past `now`
	pub async fn should_display_at(
		&self,
		user_id: UserId,
		notice_id: &str,
		threshold: &str,
		now: Timestamp,
	) -> ClResult<bool> {
		let record = self.sync_threshold(user_id, notice_id, threshold).await?;
		let snoozed = record.snoozed_until.is_some_and(|until| until > now);
		Ok(!record.dismissed && !snoozed)
	}

	/// Drop the notices the user dismissed or snoozed, then arrange the rest
	pub async fn displayable(&self, user_id: UserId, candidates: Vec<Notice>) -> ClResult<Vec<Notice>> {
		let now = Timestamp::now();
		let mut shown = Vec::with_capacity(candidates.len());
		for notice in candidates {
			if self.should_display_at(user_id, &notice.id, &notice.threshold, now).await? {
				shown.push(notice);
			}
		}
		Ok(arrange(shown))
	}
}

fn state_of(record: &NoticeDismissalRecord) -> NoticeState {
	if record.dismissed {
		NoticeState::DismissedForVersion(record.threshold.clone().unwrap_or_default())
	} else {
		NoticeState::Unseen
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_record_json_shape() {
		let record = NoticeDismissalRecord {
			threshold: Some("4.1.0".into()),
			dismissed: true,
			snoozed_until: None,
		};
		assert_eq!(serde_json::to_value(&record).unwrap(), json!({ "threshold": "4.1.0", "dismissed": true }));

		let parsed: NoticeDismissalRecord = serde_json::from_value(json!({})).unwrap();
		assert_eq!(parsed, NoticeDismissalRecord::default());
	}

	#[test]
	fn test_state_of_record() {
		assert_eq!(state_of(&NoticeDismissalRecord::default()), NoticeState::Unseen);

		let record = NoticeDismissalRecord {
			threshold: Some("4.1.0".into()),
			dismissed: true,
			snoozed_until: None,
		};
		assert_eq!(state_of(&record), NoticeState::DismissedForVersion("4.1.0".into()));
	}
}

// vim: ts=4
