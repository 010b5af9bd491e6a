use claims::assert_ok;
use lumen::commands::{ThemeSession, ThemeSource};
use lumen_core::observer::{OsColorScheme, SystemPreferenceObserver};
use lumen_core::theme::{FilePreferenceStore, ThemePreference};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tempfile::TempDir;

static OS_DARK: AtomicBool = AtomicBool::new(false);

fn fake_os_theme() -> ThemePreference {
    ThemePreference::from_dark(OS_DARK.load(Ordering::SeqCst))
}

fn file_session(dir: &TempDir, scheme: &Rc<OsColorScheme>) -> ThemeSession {
    ThemeSession::new(
        FilePreferenceStore::new(dir.path().join(FilePreferenceStore::FILE_NAME)),
        SystemPreferenceObserver::new(scheme.clone()),
        ThemePreference::Light,
    )
}

#[test]
fn toggle_persists_across_sessions() {
    let dir = TempDir::new().unwrap();
    let scheme = Rc::new(OsColorScheme::with_detector(|| ThemePreference::Light));

    let first = assert_ok!(file_session(&dir, &scheme).toggle(false, &mut Vec::new()));
    assert_eq!(first.active, ThemePreference::Dark);

    let mut out = Vec::new();
    let second = assert_ok!(file_session(&dir, &scheme).show(false, &mut out));
    assert_eq!(second.active, ThemePreference::Dark);
    assert_eq!(second.source, ThemeSource::Stored);
    assert!(String::from_utf8(out).unwrap().contains("stored preference"));
}

#[test]
fn set_writes_preference_file() {
    let dir = TempDir::new().unwrap();
    let scheme = Rc::new(OsColorScheme::with_detector(|| ThemePreference::Dark));

    assert_ok!(file_session(&dir, &scheme).set(ThemePreference::Light, true, &mut Vec::new()));

    let contents =
        std::fs::read_to_string(dir.path().join(FilePreferenceStore::FILE_NAME)).unwrap();
    assert!(contents.contains("theme = \"light\""));
}

#[tokio::test]
async fn watch_follows_os_changes_until_shutdown() {
    let dir = TempDir::new().unwrap();
    OS_DARK.store(false, Ordering::SeqCst);
    let scheme = Rc::new(OsColorScheme::with_detector(fake_os_theme));
    let session = file_session(&dir, &scheme);

    let shutdown = async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        OS_DARK.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
    };

    let mut out = Vec::new();
    let changes = assert_ok!(
        session
            .watch(&scheme, Duration::from_millis(5), shutdown, false, &mut out)
            .await
    );

    assert_eq!(changes, 1);
    assert_eq!(session.controller().active(), Some(ThemePreference::Dark));
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Theme: light (from system color scheme)"));
    assert!(text.contains("Theme: dark (from system color scheme)"));
}
