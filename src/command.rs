//! The command set understood by the MQTT interface module.
//!
//! Each command is a single opcode byte on the wire; the enum discriminants
//! are the opcodes themselves, so the name-to-opcode mapping lives in exactly
//! one place.

/// A command the module accepts over its serial interface.
///
/// The CLI surfaces these under their lowerCamelCase protocol names
/// (`getNetworkName`, `startAP`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, strum::Display, strum::FromRepr)]
#[value(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum Command {
    GetNetworkName = 0x03,
    GetNetworkPass = 0x04,
    GetDeviceName = 0x05,
    #[value(name = "connectToAP")]
    #[strum(serialize = "connectToAP")]
    ConnectToAp = 0x06,
    #[value(name = "disconnectFromAP")]
    #[strum(serialize = "disconnectFromAP")]
    DisconnectFromAp = 0x07,
    #[value(name = "startAP")]
    #[strum(serialize = "startAP")]
    StartAp = 0x08,
    #[value(name = "stopAP")]
    #[strum(serialize = "stopAP")]
    StopAp = 0x09,
    StartNetworkHelper = 0x0a,
    StopNetworkHelper = 0x0b,
    Save = 0x0e,
    GetConnectionState = 0x0f,
    Reboot = 0x10,
    GetServerAddr = 0x15,
    GetServerPort = 0x16,
    GetUserName = 0x17,
    GetUserPass = 0x18,
    ConnectToServer = 0x19,
    DisconnectFromServer = 0x1a,
}

impl Command {
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    /// Reverse lookup, used when naming opcodes in log output.
    pub fn from_opcode(opcode: u8) -> Option<Self> {
        Self::from_repr(opcode)
    }
}
