//! Shared recording mocks for the update service integration tests.
//!
//! Every collaborator appends to one shared [`Recorder`], so tests can
//! assert on the order of calls across engine, notifier, dialogs, and host.
//!
//! Include with `mod common;` at the top of each test file.

#![allow(dead_code)]

use liftoff_config::UpdateConfig;
use liftoff_update::{
    Collaborators, ConfirmResponse, DialogError, Dialogs, EngineError, Environment, HostApp,
    InstallationType, Notification, Notifier, Platform, UpdateEngine, UpdateService,
    VersionStore,
};
use std::cell::RefCell;
use std::rc::Rc;

/// One observed collaborator call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Check(u64),
    Install { silent: bool },
    Notify(Notification),
    Information { title: String, body: String },
    Confirm { title: String, body: String },
    Progress(Option<f64>),
    Focus,
    BounceDock,
    RemoveShutdownBlockers,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Call>>>);

impl Recorder {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn checks(&self) -> usize {
        self.count(|c| matches!(c, Call::Check(_)))
    }

    pub fn installs(&self) -> usize {
        self.count(|c| matches!(c, Call::Install { .. }))
    }

    pub fn confirms(&self) -> usize {
        self.count(|c| matches!(c, Call::Confirm { .. }))
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Notify(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

pub struct MockEngine {
    calls: Recorder,
    fail_check: bool,
    fail_install: bool,
}

impl UpdateEngine for MockEngine {
    fn check_for_updates(&self, generation: u64) -> Result<(), EngineError> {
        self.calls.push(Call::Check(generation));
        if self.fail_check {
            return Err(EngineError::Unavailable("mock engine offline".into()));
        }
        Ok(())
    }

    fn quit_and_install(&self, silent: bool) -> Result<(), EngineError> {
        self.calls.push(Call::Install { silent });
        if self.fail_install {
            return Err(EngineError::Command("mock install failed".into()));
        }
        Ok(())
    }
}

pub struct MockNotifier(Recorder);

impl Notifier for MockNotifier {
    fn show(&self, notification: &Notification) {
        self.0.push(Call::Notify(notification.clone()));
    }
}

pub struct MockDialogs {
    calls: Recorder,
    response: Result<ConfirmResponse, DialogError>,
    information_fails: bool,
}

impl Dialogs for MockDialogs {
    fn show_information(&self, title: &str, body: &str) -> Result<(), DialogError> {
        self.calls.push(Call::Information {
            title: title.into(),
            body: body.into(),
        });
        if self.information_fails {
            return Err(DialogError::Unavailable);
        }
        Ok(())
    }

    fn confirm(&self, title: &str, body: &str) -> Result<ConfirmResponse, DialogError> {
        self.calls.push(Call::Confirm {
            title: title.into(),
            body: body.into(),
        });
        self.response.clone()
    }
}

pub struct MockHost {
    calls: Recorder,
    windows: usize,
}

impl HostApp for MockHost {
    fn window_count(&self) -> usize {
        self.windows
    }

    fn set_progress(&self, fraction: Option<f64>) {
        self.calls.push(Call::Progress(fraction));
    }

    fn focus(&self) {
        self.calls.push(Call::Focus);
    }

    fn bounce_dock(&self) {
        self.calls.push(Call::BounceDock);
    }

    fn remove_shutdown_blockers(&self) {
        self.calls.push(Call::RemoveShutdownBlockers);
    }
}

/// Knobs for building a service under test
pub struct TestSetup {
    pub version: &'static str,
    pub config: UpdateConfig,
    pub store: VersionStore,
    pub engine: bool,
    pub fail_check: bool,
    pub fail_install: bool,
    pub response: Result<ConfirmResponse, DialogError>,
    pub information_fails: bool,
    pub windows: usize,
}

impl Default for TestSetup {
    fn default() -> Self {
        Self {
            version: "1.2.0",
            config: UpdateConfig::default(),
            store: VersionStore::in_memory(),
            engine: true,
            fail_check: false,
            fail_install: false,
            response: Ok(ConfirmResponse::Cancel),
            information_fails: false,
            windows: 1,
        }
    }
}

impl TestSetup {
    /// Build the service without starting it
    pub fn build(self) -> (UpdateService, Recorder) {
        let calls = Recorder::default();
        let engine: Option<Box<dyn UpdateEngine>> = self.engine.then(|| {
            Box::new(MockEngine {
                calls: calls.clone(),
                fail_check: self.fail_check,
                fail_install: self.fail_install,
            }) as Box<dyn UpdateEngine>
        });
        let service = UpdateService::new(
            &self.config,
            self.version,
            self.store,
            Collaborators {
                engine,
                notifier: Box::new(MockNotifier(calls.clone())),
                dialogs: Box::new(MockDialogs {
                    calls: calls.clone(),
                    response: self.response,
                    information_fails: self.information_fails,
                }),
                host: Box::new(MockHost {
                    calls: calls.clone(),
                    windows: self.windows,
                }),
            },
        );
        (service, calls)
    }

    /// Build and start on a supported environment, host not yet ready.
    ///
    /// The recorder is cleared so only post-start calls are visible.
    pub fn start(self) -> (UpdateService, Recorder) {
        let (mut service, calls) = self.build();
        service.start(&supported_environment(), false);
        calls.clear();
        (service, calls)
    }
}

/// A packaged macOS install, which auto-update supports
pub fn supported_environment() -> Environment {
    Environment::new(Platform::MacOS, InstallationType::MacOSBundle)
}

/// Started service with default knobs
pub fn started_service() -> (UpdateService, Recorder) {
    TestSetup::default().start()
}
