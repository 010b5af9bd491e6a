use super::write_report;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use lumen_core::observer::{OsColorScheme, SystemPreferenceObserver};
use lumen_core::theme::{FilePreferenceStore, PreferenceStore, ThemeController, ThemePreference};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

/// Where the active theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    Stored,
    System,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeReport {
    pub active: ThemePreference,
    pub source: ThemeSource,
    pub stored: Option<ThemePreference>,
    pub system: Option<ThemePreference>,
}

impl fmt::Display for ThemeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            ThemeSource::Stored => "stored preference",
            ThemeSource::System => "system color scheme",
            ThemeSource::Fallback => "fallback",
        };
        writeln!(f, "Theme: {} (from {source})", self.active)?;
        match self.system {
            Some(system) => writeln!(f, "System color scheme: {system}"),
            None => writeln!(f, "System color scheme: unavailable"),
        }
    }
}

/// A theme controller wired to a store and the system observer, as one CLI
/// invocation uses it.
pub struct ThemeSession {
    controller: ThemeController,
    observer: SystemPreferenceObserver,
}

impl ThemeSession {
    pub fn new(
        store: impl PreferenceStore + 'static,
        observer: SystemPreferenceObserver,
        fallback: ThemePreference,
    ) -> Self {
        Self {
            controller: ThemeController::new(store, observer.clone()).with_fallback(fallback),
            observer,
        }
    }

    /// Session backed by the configured preference file and the OS scheme.
    pub fn from_config(config: &AppConfig, scheme: Rc<OsColorScheme>) -> AppResult<Self> {
        let store = match config.theme().store_path() {
            Some(path) => FilePreferenceStore::new(path),
            None => FilePreferenceStore::in_config_dir()?,
        };
        log::debug!("Using preference file {}", store.path().display());
        Ok(Self::new(
            store,
            SystemPreferenceObserver::new(scheme),
            config.theme().fallback(),
        ))
    }

    pub fn controller(&self) -> &ThemeController {
        &self.controller
    }

    /// Snapshot of the resolved state. Only meaningful after initialization.
    pub fn report(&self) -> AppResult<ThemeReport> {
        let active = self
            .controller
            .active()
            .ok_or(lumen_core::ThemeError::NotInitialized)?;
        Ok(self.report_for(active))
    }

    fn report_for(&self, active: ThemePreference) -> ThemeReport {
        let stored = self.controller.stored();
        let system = self.observer.current();
        let source = if stored.is_some() {
            ThemeSource::Stored
        } else if system.is_some() {
            ThemeSource::System
        } else {
            ThemeSource::Fallback
        };
        ThemeReport {
            active,
            source,
            stored,
            system,
        }
    }

    pub fn show(&self, json: bool, out: &mut dyn Write) -> AppResult<ThemeReport> {
        self.controller.initialize()?;
        let report = self.report()?;
        write_report(out, json, &report)?;
        Ok(report)
    }

    pub fn set(
        &self,
        theme: ThemePreference,
        json: bool,
        out: &mut dyn Write,
    ) -> AppResult<ThemeReport> {
        self.controller.initialize()?;
        self.controller.set(theme)?;
        let report = self.report()?;
        write_report(out, json, &report)?;
        Ok(report)
    }

    pub fn toggle(&self, json: bool, out: &mut dyn Write) -> AppResult<ThemeReport> {
        self.controller.initialize()?;
        self.controller.toggle()?;
        let report = self.report()?;
        write_report(out, json, &report)?;
        Ok(report)
    }

    /// Poll `scheme` every `interval` and print each theme change until
    /// `shutdown` completes. Returns the number of changes printed.
    pub async fn watch(
        &self,
        scheme: &OsColorScheme,
        interval: Duration,
        shutdown: impl Future<Output = ()>,
        json: bool,
        out: &mut dyn Write,
    ) -> AppResult<usize> {
        if interval.is_zero() {
            return Err(AppError::Input(
                "watch polling interval must be greater than zero".to_string(),
            ));
        }
        self.controller.bootstrap()?;
        let initial = self.report()?;
        write_report(out, json, &initial)?;
        if initial.source == ThemeSource::Stored && !json {
            writeln!(
                out,
                "A stored preference is set; OS color scheme changes will not change the theme."
            )?;
        }

        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        let _watch = self
            .controller
            .watch(move |theme| sink.borrow_mut().push(theme));

        let mut ticker = tokio::time::interval(interval);
        tokio::pin!(shutdown);
        let mut changes = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    scheme.poll();
                    let drained: Vec<ThemePreference> = pending.borrow_mut().drain(..).collect();
                    for theme in drained {
                        changes += 1;
                        write_report(out, json, &self.report_for(theme))?;
                    }
                    out.flush()?;
                }
            }
        }

        log::info!("Stopped watching after {changes} theme changes");
        Ok(changes)
    }
}

impl fmt::Debug for ThemeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSession")
            .field("controller", &self.controller)
            .finish()
    }
}
