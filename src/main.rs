use anyhow::Result;
use buffered_input::{Action, ActionMap, InputPoller, KeyboardKey, WinitInput};
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting input monitor...");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Input Monitor")
        .with_inner_size(winit::dpi::LogicalSize::new(800, 450))
        .build(&event_loop)?;

    let mut device = WinitInput::new();
    let mut poller = InputPoller::new();
    poller.set_keyboard_callback(|key, down| {
        info!("Key {:?} {}", key, if down { "pressed" } else { "released" });
    });
    poller.set_mouse_button_callback(|button, down| {
        info!(
            "Mouse button {:?} {}",
            button,
            if down { "pressed" } else { "released" }
        );
    });
    poller.set_mouse_wheel_callback(|value, delta| {
        info!("Mouse wheel: value={}, delta={}", value, delta);
    });

    let mut actions = ActionMap::new();
    let mut movement = Action::wasd_or_arrows(true);
    movement.set_vector_callback(|direction, _| {
        info!("Movement: {}", direction.normalize_or_zero());
    })?;
    actions.insert("movement", movement)?;

    let mut combo = Action::combo([
        KeyboardKey::LeftControl.into(),
        KeyboardKey::S.into(),
    ])?;
    combo.set_keyboard_callback(|key, down| {
        if down && key == KeyboardKey::S {
            info!("Save combo triggered");
        }
    })?;
    actions.insert("save", combo)?;

    info!("Window created, polling input");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent { event, .. } => {
                device.process_window_event(&event);
            }
            Event::AboutToWait => {
                // One poll per frame
                poller.poll(&device);
                actions.poll(&device);
                device.end_frame();
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
