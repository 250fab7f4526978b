use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{Context, Result};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager};
use parking_lot::RwLock;
use spacetalk::config_ext::{ConfigExt, settings_for_hotkey};
use spacetalk::controls::{RecordingFlag, click, proxy_controls};
use spacetalk::event::SpacetalkEvent;
use spacetalk::icon::MicState;
use spacetalk::input;
use spacetalk::notify::NotificationLayer;
use spacetalk::{
    APP_NAME_PRETTY, ConfigManager, ControlRole, DEFAULT_LOG_LEVEL, KeyDispatcher, KeyEvent,
    VERSION,
};
use tao::dpi::LogicalSize;
use tao::event::{Event, StartCause, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::WindowBuilder;
use tracing::{debug, error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tray_icon::menu::{AboutMetadataBuilder, Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};

fn main() -> Result<()> {
    // Initialize the logger
    let notifications = NotificationLayer::new();
    let notifications_enabled = notifications.switch();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SPACETALK_LOG")
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .finish()
        .with(notifications)
        .init();

    // Load config
    let config_manager = ConfigManager::new()?;
    let config = Arc::new(RwLock::new(config_manager.load()?));
    // save back the config to create the file if it doesn't exist
    config_manager.save(&config.read())?;
    notifications_enabled.store(config.read().notifications(), Ordering::Relaxed);

    let event_loop: EventLoop<SpacetalkEvent> = EventLoopBuilder::with_user_event().build();
    let event_sender = event_loop.create_proxy();

    // Resolve the trigger once so the window and the hotkey agree on it
    let hotkey = config.hotkey();
    let hotkey_id = hotkey.id();
    let mut dispatcher = KeyDispatcher::new(settings_for_hotkey(&config.read(), &hotkey));

    // Key events only reach us while this window has focus
    let window = WindowBuilder::new()
        .with_title(format!(
            "{} - hold {} to record",
            APP_NAME_PRETTY,
            dispatcher.settings().trigger_key
        ))
        .with_inner_size(LogicalSize::new(360.0, 120.0))
        .build(&event_loop)
        .context("Failed to create window")?;

    // Set up the controls the dispatcher drives
    let recording = RecordingFlag::default();
    let mut controls = proxy_controls(&config.read(), recording.clone(), event_sender);
    let record_marker = config.read().record_control().to_string();
    let stop_marker = config.read().stop_control().to_string();

    // Optional system-wide hotkey
    let hotkey_manager = if config.read().global_hotkey() {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;
        manager
            .register(hotkey)
            .context("Failed to register hotkey")?;
        Some(manager)
    } else {
        None
    };

    // Create the tray menu
    let tray_menu = Menu::new();
    let icon_record = MenuItem::new("Record", true, None);
    let icon_stop = MenuItem::new("Stop", false, None);
    let icon_quit = MenuItem::new("Quit", true, None);
    tray_menu.append_items(&[
        // the name of the app
        &MenuItem::new(APP_NAME_PRETTY, false, None),
        &PredefinedMenuItem::separator(),
        &icon_record,
        &icon_stop,
        &PredefinedMenuItem::separator(),
        &PredefinedMenuItem::about(
            None,
            Some(
                AboutMetadataBuilder::new()
                    .version(Some(VERSION.to_owned()))
                    .build(),
            ),
        ),
        &icon_quit,
    ])?;

    let mut icon_tray: Option<TrayIcon> = None;

    let menu_channel = MenuEvent::receiver();
    let hotkey_channel = GlobalHotKeyEvent::receiver();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        // Keep the hotkey registered for as long as the loop runs
        let _ = &hotkey_manager;

        match event {
            Event::NewEvents(StartCause::Init) => {
                // We create the icon once the event loop is actually running
                // to prevent issues like https://github.com/tauri-apps/tray-icon/issues/90
                match build_tray(&tray_menu, MicState::Idle) {
                    Ok(tray) => {
                        icon_tray.replace(tray);
                    }
                    Err(e) => error!("Failed to create tray icon: {:?}", e),
                }

                // We have to request a redraw here to have the icon actually show up.
                // Tao only exposes a redraw method on the Window so we use core-foundation directly.
                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};

                    let rl = CFRunLoopGetMain();
                    CFRunLoopWakeUp(rl);
                }

                info!("Spacetalk ready");
            }
            Event::WindowEvent {
                window_id, event, ..
            } if window_id == window.id() => match event {
                WindowEvent::KeyboardInput { event, .. } => {
                    let mut key = input::from_window_key(&event);
                    let dispatch = dispatcher.handle(&mut key, &mut controls);
                    debug!(code = key.code(), repeat = event.repeat, ?dispatch, "window key");
                }
                WindowEvent::Focused(false) if dispatcher.is_armed() => {
                    // The release will go to another window, finish the press here
                    let mut release =
                        KeyEvent::released(dispatcher.settings().trigger_key.clone());
                    let dispatch = dispatcher.handle(&mut release, &mut controls);
                    info!(?dispatch, "Focus lost while trigger held");
                }
                WindowEvent::CloseRequested => {
                    icon_tray.take();
                    *control_flow = ControlFlow::Exit;
                }
                _ => {}
            },
            // Handle user provided events
            Event::UserEvent(SpacetalkEvent::ControlActivated(role)) => {
                let state = recording.mic_state();
                info!(%role, state = ?state, "Control activated");
                icon_record.set_enabled(state == MicState::Idle);
                icon_stop.set_enabled(state == MicState::Recording);
                if let Some(tray) = icon_tray.as_ref() {
                    if let Err(e) = tray.set_icon(state.icon().ok()) {
                        error!("Failed to update tray icon: {}", e);
                    }
                    tray.set_tooltip(Some(state.tooltip())).ok();
                }
            }
            _ => {}
        }

        if let Ok(event) = menu_channel.try_recv() {
            if event.id == icon_quit.id() {
                icon_tray.take();
                *control_flow = ControlFlow::Exit;
            } else if event.id == icon_record.id() {
                if !click(&mut controls, &record_marker) {
                    debug!(role = %ControlRole::Record, "menu click ignored");
                }
            } else if event.id == icon_stop.id() {
                if !click(&mut controls, &stop_marker) {
                    debug!(role = %ControlRole::Stop, "menu click ignored");
                }
            }
        }

        // Handle hotkey events
        if let Ok(event) = hotkey_channel.try_recv() {
            if event.id() == hotkey_id {
                let mut key = input::from_hotkey(&event, &dispatcher.settings().trigger_key);
                let dispatch = dispatcher.handle(&mut key, &mut controls);
                debug!(?dispatch, "global hotkey");
            }
        }
    });
}

fn build_tray(menu: &Menu, state: MicState) -> Result<TrayIcon> {
    let tray = TrayIconBuilder::new()
        .with_menu(Box::new(menu.clone()))
        .with_tooltip(state.tooltip())
        .with_icon(state.icon()?)
        .build()?;
    Ok(tray)
}
