use crate::Binding;

/// Which ports to talk to, or whether to fake the device entirely
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DeviceConfig {
    pub in_port: usize,
    pub out_port: usize,
    /// Use a [`VirtualTransport`](crate::VirtualTransport) instead of the MIDI ports
    #[cfg_attr(feature = "serde", serde(rename = "virtual"))]
    pub is_virtual: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            in_port: 0,
            out_port: 1,
            is_virtual: false,
        }
    }
}

/// Everything a [`Session`](crate::Session) needs to get going
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub device: DeviceConfig,
    pub bindings: Vec<Binding>,
}
