//! Notice dismissal tracker tests

mod common;

use amona_admin::notice::addon::{ADDON_SUPPORTED_VERSION_NOTICE, MINIMUM_ADDON_VERSION_NOTICE, addon_notices};
use amona_admin::notice::{NoticeDismissalRecord, NoticeState};
use amona_types::types::{Timestamp, UserId};
use common::{create_test_app, sample_addon};

const NOTICE: &str = "nas-minimum-addon-version-notice";

#[tokio::test]
async fn test_new_notice_is_unseen_and_shown() {
	let t = create_test_app().await;
	let tracker = &t.app.notices;

	assert_eq!(tracker.state(UserId(1), NOTICE).await.unwrap(), NoticeState::Unseen);
	assert!(tracker.should_display(UserId(1), NOTICE, "4.1.0").await.unwrap());
}

#[tokio::test]
async fn test_dismissal_is_reset_when_threshold_moves() {
	let t = create_test_app().await;
	let tracker = &t.app.notices;
	let user = UserId(1);

	tracker.sync_threshold(user, NOTICE, "4.1.0").await.unwrap();
	let state = tracker.dismiss(user, NOTICE, None).await.unwrap();
	assert_eq!(state, NoticeState::DismissedForVersion("4.1.0".into()));
	assert!(!tracker.should_display(user, NOTICE, "4.1.0").await.unwrap());

	// Same threshold written differently keeps the dismissal
	assert!(!tracker.should_display(user, NOTICE, "4-1-0").await.unwrap());

	assert!(tracker.should_display(user, NOTICE, "4.2.0").await.unwrap());
	assert_eq!(tracker.state(user, NOTICE).await.unwrap(), NoticeState::Unseen);
}

#[tokio::test]
async fn test_dismissal_before_first_threshold_is_cleared() {
	let t = create_test_app().await;
	let tracker = &t.app.notices;
	let user = UserId(1);

	tracker.dismiss(user, NOTICE, None).await.unwrap();
	assert_eq!(tracker.state(user, NOTICE).await.unwrap(), NoticeState::DismissedForVersion("".into()));

	assert!(tracker.should_display(user, NOTICE, "4.1.0").await.unwrap());
	assert_eq!(
		tracker.read_record(user, NOTICE).await.unwrap(),
		NoticeDismissalRecord { threshold: Some("4.1.0".into()), dismissed: false, snoozed_until: None }
	);
}

#[tokio::test]
async fn test_dismissal_is_per_user() {
	let t = create_test_app().await;
	let tracker = &t.app.notices;

	tracker.sync_threshold(UserId(1), NOTICE, "4.1.0").await.unwrap();
	tracker.dismiss(UserId(1), NOTICE, Some(0)).await.unwrap();

	assert!(!tracker.should_display(UserId(1), NOTICE, "4.1.0").await.unwrap());
	assert!(tracker.should_display(UserId(2), NOTICE, "4.1.0").await.unwrap());
}

#[tokio::test]
async fn test_snooze_expires() {
	let t = create_test_app().await;
	let tracker = &t.app.notices;
	let user = UserId(1);
	let now = Timestamp(1_000_000);

	tracker.sync_threshold(user, NOTICE, "4.1.0").await.unwrap();
	let state = tracker.dismiss_at(user, NOTICE, Some(3600), now).await.unwrap();
	assert_eq!(state, NoticeState::Unseen);

	assert!(!tracker.should_display_at(user, NOTICE, "4.1.0", Timestamp(1_000_100)).await.unwrap());
	assert!(tracker.should_display_at(user, NOTICE, "4.1.0", Timestamp(1_003_600)).await.unwrap());

	let record = tracker.read_record(user, NOTICE).await.unwrap();
	assert_eq!(
		record,
		NoticeDismissalRecord {
			threshold: Some("4.1.0".into()),
			dismissed: false,
			snoozed_until: Some(Timestamp(1_003_600)),
		}
	);
}

#[tokio::test]
async fn test_displayable_filters_and_arranges() {
	let t = create_test_app().await;
	let tracker = &t.app.notices;
	let user = UserId(1);
	let addon = sample_addon("3.9.1", "4.1.0");

	let shown = tracker.displayable(user, addon_notices(&addon, "Amona")).await.unwrap();
	let ids: Vec<&str> = shown.iter().map(|n| n.id.as_ref()).collect();
	assert_eq!(ids, vec![MINIMUM_ADDON_VERSION_NOTICE, ADDON_SUPPORTED_VERSION_NOTICE]);

	tracker.dismiss(user, MINIMUM_ADDON_VERSION_NOTICE, None).await.unwrap();
	let shown = tracker.displayable(user, addon_notices(&addon, "Amona")).await.unwrap();
	let ids: Vec<&str> = shown.iter().map(|n| n.id.as_ref()).collect();
	assert_eq!(ids, vec![ADDON_SUPPORTED_VERSION_NOTICE]);

	// A newer minimum brings the dismissed notice back
	let addon = sample_addon("3.9.1", "4.2.0");
	let shown = tracker.displayable(user, addon_notices(&addon, "Amona")).await.unwrap();
	assert_eq!(shown.len(), 2);
}

// vim: ts=4
