use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

use crate::core::codec::InputMode;
use crate::core::session::{SessionController, SessionEvent, SessionState};
use crate::domain::config::DevTermConfig;
use crate::domain::error::{DevTermError, DevTermResult};
use crate::infrastructure::roster::RosterClient;

use super::args::{Args, Command, SendArgs};
use super::output::{ConsoleWriter, OutputWriter};

/// Execute a non-interactive command
pub async fn execute_command(args: Args, config: DevTermConfig) -> DevTermResult<()> {
    let writer = ConsoleWriter::new(args.output);

    match args.command {
        Some(Command::Devices) => list_devices(&config, &writer).await,
        Some(Command::Send(send_args)) => send_once(&config, &writer, send_args).await,
        Some(Command::Version) => {
            writer.write_message(&format!("devterm {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
        Some(Command::Tui) | None => unreachable!("TUI mode is dispatched in main"),
    }
}

async fn list_devices(config: &DevTermConfig, writer: &ConsoleWriter) -> DevTermResult<()> {
    let client = RosterClient::new(
        config.server.devices_url(),
        Duration::from_millis(config.global.connect_timeout_ms),
    )?;

    let devices = client.fetch().await?;
    writer.write_devices(&devices)?;
    Ok(())
}

/// Connect, send one payload, collect replies for a bounded window,
/// then close. The printed transcript mirrors what the TUI would show.
async fn send_once(
    config: &DevTermConfig,
    writer: &ConsoleWriter,
    send_args: SendArgs,
) -> DevTermResult<()> {
    let mode = if send_args.hex {
        InputMode::Hex
    } else {
        InputMode::Ascii
    };

    let mut controller = SessionController::connect(
        send_args.device.clone(),
        config.server.session_url(&send_args.device),
        Duration::from_millis(config.global.connect_timeout_ms),
        config.global.transcript_capacity,
    );

    // Wait for the session to open before the one send is permitted.
    let open_timeout = Duration::from_millis(config.global.connect_timeout_ms + 500);
    match timeout(open_timeout, controller.pump_next()).await {
        Ok(Some(SessionEvent::Opened)) => {}
        Ok(Some(SessionEvent::Errored(message))) => {
            return Err(DevTermError::Transport { message });
        }
        Ok(_) => return Err(DevTermError::NotConnected),
        Err(_) => {
            return Err(DevTermError::Transport {
                message: "timed out waiting for session to open".to_string(),
            })
        }
    }

    if mode == InputMode::Hex {
        controller.toggle_mode();
    }
    controller.input_buffer_mut().push_str(&send_args.data);
    controller.send_input()?;
    debug!("payload sent to {}", send_args.device);

    // Collect replies until the wait window elapses or the session ends.
    let deadline = tokio::time::Instant::now() + Duration::from_millis(send_args.wait_ms);
    loop {
        match tokio::time::timeout_at(deadline, controller.pump_next()).await {
            Ok(Some(SessionEvent::Data(_))) => continue,
            Ok(Some(SessionEvent::Closed)) | Ok(Some(SessionEvent::Errored(_))) | Ok(None) => break,
            Ok(Some(SessionEvent::Opened)) => continue,
            Err(_) => break,
        }
    }

    if controller.state() == SessionState::Open {
        controller.disconnect();
    }

    let entries: Vec<_> = controller.transcript().entries().cloned().collect();
    writer.write_transcript(&entries)?;
    Ok(())
}
