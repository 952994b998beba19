mod common;

use anyhow::Result;
use chrono::NaiveDate;
use common::setup_test_db;
use school_admin_bot::database::models::*;
use school_admin_bot::parser::ParsedLesson;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn parsed(number: u32, subject: &str) -> ParsedLesson {
    ParsedLesson {
        lesson_number: number,
        subject: subject.to_string(),
        classroom: None,
        start_time: None,
        end_time: None,
        lesson_type: None,
        teacher: None,
    }
}

fn lessons(count: u32, prefix: &str) -> Vec<ParsedLesson> {
    (1..=count).map(|n| parsed(n, &format!("{prefix} {n}"))).collect()
}

#[tokio::test]
async fn test_replace_day_leaves_only_new_lessons() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let day = date(2025, 12, 1);

    for old in 0..=3u32 {
        for new in 0..=3u32 {
            Lesson::replace_day(&db.pool, day, &lessons(old, "old")).await?;
            let inserted = Lesson::replace_day(&db.pool, day, &lessons(new, "new")).await?;
            assert_eq!(inserted, u64::from(new));

            let stored = Lesson::find_by_date(&db.pool, day).await?;
            assert_eq!(stored.len(), new as usize, "old={old} new={new}");
            assert!(stored.iter().all(|lesson| lesson.subject.starts_with("new")));
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_replace_day_keeps_other_dates() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Lesson::replace_day(&db.pool, date(2025, 12, 1), &lessons(2, "Mon")).await?;
    Lesson::replace_day(&db.pool, date(2025, 12, 2), &lessons(3, "Tue")).await?;
    Lesson::replace_day(&db.pool, date(2025, 12, 1), &[]).await?;

    assert!(Lesson::find_by_date(&db.pool, date(2025, 12, 1)).await?.is_empty());
    assert_eq!(Lesson::find_by_date(&db.pool, date(2025, 12, 2)).await?.len(), 3);

    assert_eq!(Lesson::delete_all(&db.pool).await?, 3);
    Ok(())
}

#[tokio::test]
async fn test_replace_day_is_atomic() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let day = date(2025, 12, 1);
    Lesson::replace_day(&db.pool, day, &lessons(2, "old")).await?;

    // A duplicate lesson number violates the unique index mid-transaction
    let broken = vec![parsed(1, "new"), parsed(1, "again")];
    assert!(Lesson::replace_day(&db.pool, day, &broken).await.is_err());

    let stored = Lesson::find_by_date(&db.pool, day).await?;
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|lesson| lesson.subject.starts_with("old")));
    Ok(())
}

#[tokio::test]
async fn test_attendance_upsert_keeps_one_record() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let day = date(2025, 11, 20);

    Attendance::mark(&db.pool, 42, day, AttendanceStatus::Present, None, 42).await?;
    let updated = Attendance::mark(
        &db.pool,
        42,
        day,
        AttendanceStatus::Absent,
        Some("Болезнь"),
        42,
    )
    .await?;

    assert_eq!(updated.status(), Some(AttendanceStatus::Absent));
    assert_eq!(updated.reason.as_deref(), Some("Болезнь"));
    assert_eq!(Attendance::count_for(&db.pool, 42, day).await?, 1);

    // Marking again without a reason clears the old one
    let late = Attendance::mark(&db.pool, 42, day, AttendanceStatus::Late, None, 42).await?;
    assert_eq!(late.status(), Some(AttendanceStatus::Late));
    assert!(late.reason.is_none());
    assert_eq!(Attendance::count_for(&db.pool, 42, day).await?, 1);

    Attendance::mark(&db.pool, 42, date(2025, 11, 21), AttendanceStatus::Present, None, 42).await?;
    let recent = Attendance::recent_for_user(&db.pool, 42, 10).await?;
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].date, date(2025, 11, 21));

    Ok(())
}

#[tokio::test]
async fn test_roll_for_date_joins_names() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let day = date(2025, 11, 20);

    User::touch(&db.pool, 1, Some("ann")).await?;
    User::set_full_name(&db.pool, 1, "Ann Lee").await?;
    Attendance::mark(&db.pool, 1, day, AttendanceStatus::Present, None, 1).await?;
    Attendance::mark(&db.pool, 2, day, AttendanceStatus::Late, None, 2).await?;

    let roll = Attendance::roll_for_date(&db.pool, day).await?;
    assert_eq!(roll.len(), 2);
    let ann = roll.iter().find(|entry| entry.telegram_id == 1).unwrap();
    assert_eq!(ann.full_name.as_deref(), Some("Ann Lee"));
    let unknown = roll.iter().find(|entry| entry.telegram_id == 2).unwrap();
    assert!(unknown.full_name.is_none());

    Ok(())
}

#[tokio::test]
async fn test_user_touch_preserves_profile() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    User::touch(&db.pool, 7, Some("OldHandle")).await?;
    User::set_full_name(&db.pool, 7, "Иванов Иван").await?;
    User::set_birthday(&db.pool, 7, 29, 2).await?;
    User::set_admin(&db.pool, 7, true).await?;

    User::touch(&db.pool, 7, Some("NewHandle")).await?;
    User::touch(&db.pool, 7, None).await?;

    let user = User::find_by_telegram_id(&db.pool, 7).await?.unwrap();
    assert_eq!(user.username.as_deref(), Some("NewHandle"));
    assert_eq!(user.full_name.as_deref(), Some("Иванов Иван"));
    assert_eq!(user.birthday(), Some((29, 2)));
    assert!(user.is_admin);
    assert!(user.is_registered());

    let by_handle = User::find_by_username(&db.pool, "@newhandle").await?.unwrap();
    assert_eq!(by_handle.telegram_id, 7);
    assert_eq!(User::list_all(&db.pool).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_set_admin_on_unknown_user() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    assert_eq!(User::set_admin(&db.pool, 404, true).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_birthdays_by_day_and_calendar_order() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    for (id, name, day, month) in [(1, "Борис", 5, 12), (2, "Анна", 20, 11), (3, "Вера", 20, 11)] {
        User::touch(&db.pool, id, None).await?;
        User::set_full_name(&db.pool, id, name).await?;
        User::set_birthday(&db.pool, id, day, month).await?;
    }
    User::touch(&db.pool, 4, None).await?;

    let today: Vec<i64> = User::find_by_birthday(&db.pool, 20, 11)
        .await?
        .iter()
        .map(|user| user.telegram_id)
        .collect();
    assert_eq!(today, vec![2, 3]);

    let ordered: Vec<String> = User::list_birthdays(&db.pool)
        .await?
        .iter()
        .map(User::display_name)
        .collect();
    assert_eq!(ordered, vec!["Анна", "Вера", "Борис"]);

    Ok(())
}

#[tokio::test]
async fn test_homework_upcoming_hides_past_entries() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let today = date(2025, 11, 20);

    Homework::create(&db.pool, "История".into(), "§3".into(), date(2025, 11, 19), 1).await?;
    Homework::create(&db.pool, "Физика".into(), "№5".into(), date(2025, 11, 22), 1).await?;
    Homework::create(&db.pool, "Химия".into(), "лаб.".into(), today, 1).await?;

    let upcoming = Homework::find_upcoming(&db.pool, today).await?;
    let subjects: Vec<&str> = upcoming.iter().map(|hw| hw.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Химия", "Физика"]);

    // Past homework is filtered, not deleted
    assert_eq!(Homework::delete_all(&db.pool).await?, 3);
    Ok(())
}

#[tokio::test]
async fn test_settings_seed_only_once() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    assert!(Setting::seed(&db.pool, ADMIN_PASSWORD_KEY, "first").await?);
    assert!(!Setting::seed(&db.pool, ADMIN_PASSWORD_KEY, "second").await?);
    assert_eq!(Setting::get(&db.pool, ADMIN_PASSWORD_KEY).await?.as_deref(), Some("first"));

    Setting::set(&db.pool, ADMIN_PASSWORD_KEY, "rotated").await?;
    assert_eq!(Setting::get(&db.pool, ADMIN_PASSWORD_KEY).await?.as_deref(), Some("rotated"));
    assert!(Setting::get(&db.pool, "missing").await?.is_none());

    Ok(())
}
