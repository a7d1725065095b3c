//! Message type codes.
//!
//! Codes 2-59 apply to every device. Codes 101-118 apply to lights only.
//! Only a handful are understood on decode; the rest are listed so that
//! traffic can be named in logs.

/// Message type carried in the protocol header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Command {
    DeviceGetService = 2,
    DeviceStateService = 3,
    DeviceGetHostInfo = 12,
    DeviceStateHostInfo = 13,
    DeviceGetHostFirmware = 14,
    DeviceStateHostFirmware = 15,
    DeviceGetWifiInfo = 16,
    DeviceStateWifiInfo = 17,
    DeviceGetWifiFirmware = 18,
    DeviceStateWifiFirmware = 19,
    DeviceGetPower = 20,
    DeviceSetPower = 21,
    DeviceStatePower = 22,
    DeviceGetLabel = 23,
    DeviceSetLabel = 24,
    DeviceStateLabel = 25,
    DeviceGetVersion = 32,
    DeviceStateVersion = 33,
    DeviceGetInfo = 34,
    DeviceStateInfo = 35,
    DeviceAcknowledgement = 45,
    DeviceGetLocation = 48,
    DeviceStateLocation = 50,
    DeviceGetGroup = 51,
    DeviceStateGroup = 53,
    DeviceEchoRequest = 58,
    DeviceEchoResponse = 59,
    LightGet = 101,
    LightSetColor = 102,
    LightState = 107,
    LightGetPower = 116,
    LightSetPower = 117,
    LightStatePower = 118,
}

impl Command {
    /// Every known command, in code order.
    pub const ALL: [Command; 33] = [
        Command::DeviceGetService,
        Command::DeviceStateService,
        Command::DeviceGetHostInfo,
        Command::DeviceStateHostInfo,
        Command::DeviceGetHostFirmware,
        Command::DeviceStateHostFirmware,
        Command::DeviceGetWifiInfo,
        Command::DeviceStateWifiInfo,
        Command::DeviceGetWifiFirmware,
        Command::DeviceStateWifiFirmware,
        Command::DeviceGetPower,
        Command::DeviceSetPower,
        Command::DeviceStatePower,
        Command::DeviceGetLabel,
        Command::DeviceSetLabel,
        Command::DeviceStateLabel,
        Command::DeviceGetVersion,
        Command::DeviceStateVersion,
        Command::DeviceGetInfo,
        Command::DeviceStateInfo,
        Command::DeviceAcknowledgement,
        Command::DeviceGetLocation,
        Command::DeviceStateLocation,
        Command::DeviceGetGroup,
        Command::DeviceStateGroup,
        Command::DeviceEchoRequest,
        Command::DeviceEchoResponse,
        Command::LightGet,
        Command::LightSetColor,
        Command::LightState,
        Command::LightGetPower,
        Command::LightSetPower,
        Command::LightStatePower,
    ];

    /// The 16-bit wire code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Look up a command by wire code. Returns `None` for unknown codes.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|command| command.code() == code)
    }

    /// Returns a human-readable name for the command.
    pub fn name(self) -> &'static str {
        match self {
            Command::DeviceGetService => "GetService",
            Command::DeviceStateService => "StateService",
            Command::DeviceGetHostInfo => "GetHostInfo",
            Command::DeviceStateHostInfo => "StateHostInfo",
            Command::DeviceGetHostFirmware => "GetHostFirmware",
            Command::DeviceStateHostFirmware => "StateHostFirmware",
            Command::DeviceGetWifiInfo => "GetWifiInfo",
            Command::DeviceStateWifiInfo => "StateWifiInfo",
            Command::DeviceGetWifiFirmware => "GetWifiFirmware",
            Command::DeviceStateWifiFirmware => "StateWifiFirmware",
            Command::DeviceGetPower => "GetPower",
            Command::DeviceSetPower => "SetPower",
            Command::DeviceStatePower => "StatePower",
            Command::DeviceGetLabel => "GetLabel",
            Command::DeviceSetLabel => "SetLabel",
            Command::DeviceStateLabel => "StateLabel",
            Command::DeviceGetVersion => "GetVersion",
            Command::DeviceStateVersion => "StateVersion",
            Command::DeviceGetInfo => "GetInfo",
            Command::DeviceStateInfo => "StateInfo",
            Command::DeviceAcknowledgement => "Acknowledgement",
            Command::DeviceGetLocation => "GetLocation",
            Command::DeviceStateLocation => "StateLocation",
            Command::DeviceGetGroup => "GetGroup",
            Command::DeviceStateGroup => "StateGroup",
            Command::DeviceEchoRequest => "EchoRequest",
            Command::DeviceEchoResponse => "EchoResponse",
            Command::LightGet => "Light::Get",
            Command::LightSetColor => "Light::SetColor",
            Command::LightState => "Light::State",
            Command::LightGetPower => "Light::GetPower",
            Command::LightSetPower => "Light::SetPower",
            Command::LightStatePower => "Light::StatePower",
        }
    }
}

/// Returns a human-readable name for a raw command code.
pub fn command_name(code: u16) -> &'static str {
    Command::from_code(code).map_or("UNKNOWN", Command::name)
}
