use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use gtk4::prelude::*;
use gtk4::Application;
use tracing::{debug, info, trace, warn};

use babar_components::{GlibScheduler, GtkViewFactory, HyprHost, MessageBus, PanelWindow};
use babar_core::{
    load_css, AppIndex, BarEvent, BarSettings, ConfigPaths, Extension, FavoritesConfig, HostContext,
    HostSignal, ServiceHub, SignalRegistry, WorkspaceNames,
};

const APP_ID: &str = "org.babar.Bar";

const SIGINT: i32 = 2;
const SIGTERM: i32 = 15;

/// Everything the event loop needs once the panel is up
struct Shell {
    hypr: Rc<HyprHost>,
    panel: Rc<PanelWindow>,
    registry: Rc<SignalRegistry>,
    extension: Rc<RefCell<Extension>>,
}

impl Shell {
    fn build(app: &Application, paths: &ConfigPaths, settings: &BarSettings, bus: MessageBus) -> Self {
        let hypr = Rc::new(HyprHost::new(
            settings,
            AppIndex::scan(),
            WorkspaceNames::load(&paths.workspace_names),
            &FavoritesConfig::load(&paths.favorites),
            bus.clone(),
        ));

        let panel = Rc::new(PanelWindow::new(app, settings, hypr.clone(), bus.clone()));
        panel.present();

        let registry = Rc::new(SignalRegistry::new());
        let host = HostContext {
            workspaces: hypr.clone(),
            windows: hypr.clone(),
            overview: hypr.clone(),
            apps: hypr.clone(),
            favorites: hypr.clone(),
            names: hypr.clone(),
            panel: panel.clone(),
            views: Rc::new(GtkViewFactory::new(app, panel.clone(), bus)),
            signals: registry.clone(),
            scheduler: Rc::new(GlibScheduler::new()),
        };

        let settings_path = paths.settings.clone();
        let extension = Extension::new(host, move || BarSettings::load(&settings_path));

        Self {
            hypr,
            panel,
            registry,
            extension: Rc::new(RefCell::new(extension)),
        }
    }

    /// Update host state from a service event and raise the matching signal
    fn handle_event(&self, event: BarEvent) {
        let signal = match &event {
            BarEvent::HyprlandConnected => Some(HostSignal::ExtensionStateChanged),
            other => other.signal(),
        };

        match event {
            BarEvent::Snapshot { snapshot, .. } => {
                self.hypr.set_snapshot(snapshot);
                self.panel
                    .set_app_menu_text(self.hypr.focused_app_name().as_deref());
            }
            BarEvent::WorkspaceNamesChanged(names) => self.hypr.set_names(names),
            BarEvent::FavoritesChanged(config) => self.hypr.set_favorites(&config),
            BarEvent::HyprlandConnected => info!("Hyprland connected"),
            BarEvent::HyprlandDisconnected => warn!("Hyprland connection lost"),
            BarEvent::SettingsChanged => debug!("Settings file changed"),
        }

        let Some(signal) = signal else { return };
        if self.registry.is_connected(signal) {
            self.extension.borrow_mut().handle_signal(signal);
        } else {
            trace!("No handler for {:?}", signal);
        }
    }
}

/// Run the bar until the GTK application quits
pub fn run(paths: ConfigPaths) -> anyhow::Result<()> {
    info!("Initializing BaBar");

    let settings = BarSettings::load(&paths.settings);

    // Create service hub (starts tokio runtime and services)
    let services = Arc::new(ServiceHub::new(paths.clone(), settings.min_workspaces)?);
    let _guard = services.enter_runtime();

    let app = Application::builder()
        .application_id(APP_ID)
        .flags(gtk4::gio::ApplicationFlags::NON_UNIQUE)
        .build();

    let services_clone = services.clone();
    app.connect_activate(move |app| {
        load_css();

        let (input_tx, input_rx) = async_channel::unbounded();
        let bus = MessageBus::new(services_clone.command_sender(), input_tx);
        let shell = Rc::new(Shell::build(app, &paths, &settings, bus));
        shell.extension.borrow_mut().enable();

        // View input, delivered after the widget callback has returned
        let extension = shell.extension.clone();
        glib::spawn_future_local(async move {
            while let Ok(input) = input_rx.recv().await {
                extension.borrow().handle_input(input);
            }
        });

        let event_rx = services_clone.event_receiver();
        let event_shell = shell.clone();
        glib::spawn_future_local(async move {
            while let Ok(event) = event_rx.recv().await {
                event_shell.handle_event(event);
            }
        });

        let extension = shell.extension.clone();
        app.connect_shutdown(move |_| extension.borrow_mut().disable());

        for signum in [SIGINT, SIGTERM] {
            let app = app.clone();
            glib::unix_signal_add_local(signum, move || {
                info!("Received signal {}, quitting", signum);
                app.quit();
                glib::ControlFlow::Break
            });
        }

        info!("BaBar activated");
    });

    // clap already consumed the command line
    let exit_code = app.run_with_args::<&str>(&[]);

    info!("BaBar exiting");

    std::process::exit(exit_code.into());
}
