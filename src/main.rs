use clap::Parser;
use simplelog as sl;

use mqttif::cli::{Args, Invocation};
use mqttif::command::Command;
use mqttif::communication::{self, CommandFrame, CommunicationHandle};

fn main() {
    let args = Args::parse();

    let level = if args.verbose { sl::LevelFilter::Debug } else { sl::LevelFilter::Info };
    let _ = sl::TermLogger::init(
        level,
        sl::Config::default(),
        sl::TerminalMode::Stderr,
        sl::ColorChoice::Auto,
    );

    // Fatal diagnostics go through eprintln so they are visible even if the
    // logger failed to initialize.
    let invocation = match args.resolve() {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("mqttif: {e:#}");
            std::process::exit(2);
        }
    };

    let mut com = match communication::open_serial_port(&invocation.port, invocation.baud) {
        Ok(port) => port,
        Err(e) => {
            eprintln!("Failed to open {}: {e}", invocation.port);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut com, &invocation) {
        eprintln!("mqttif: {e:#}");
        std::process::exit(1);
    }
}

fn run(com: &mut impl CommunicationHandle, invocation: &Invocation) -> anyhow::Result<()> {
    log::info!(
        "Sending {} (opcode {:#04x}) to {}",
        invocation.command,
        invocation.command.opcode(),
        invocation.port
    );

    com.set_timeout(invocation.timeout)?;
    com.send_frame(&invocation.frame)?;
    let response = com.read_response(invocation.read_limit)?;

    // Nothing goes to stdout on a silent timeout, so the output stays
    // scriptable: stdout carries response bytes only.
    if response.is_empty() {
        log::info!("No response within {} ms", invocation.timeout.as_millis());
        return Ok(());
    }

    println!("{} bytes: {}", response.len(), format_bytes(&response));
    log::debug!("As text: {:?}", String::from_utf8_lossy(&response));

    if let Ok(reply) = CommandFrame::try_from(response.as_slice()) {
        match Command::from_opcode(reply.opcode()) {
            Some(command) => log::debug!(
                "Response parses as a {} frame with {} payload bytes",
                command,
                reply.payload().len()
            ),
            None => log::debug!(
                "Response parses as a frame with unknown opcode {:#04x}",
                reply.opcode()
            ),
        }
    }

    Ok(())
}

fn format_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect::<Vec<_>>().join(" ")
}
