//! Locating the Air75 vendor configuration interface
//!
//! The keyboard exposes several HID interfaces under the same VID/PID. Only
//! the vendor interface accepts the keymap feature reports; writing to the
//! boot keyboard interface is rejected by the firmware.

use hidapi::HidApi;
use tracing::{debug, info};

use crate::error::TransportError;
use crate::types::DeviceDescriptor;

/// USB identifiers and HID usages of the Air75
pub mod device {
    /// The Air75 enumerates with Apple-compatible ids
    pub const VENDOR_ID: u16 = 0x05AC;
    pub const PRODUCT_ID: u16 = 0x024F;

    pub const USAGE_PAGE_GENERIC_DESKTOP: u16 = 0x0001;
    pub const USAGE_KEYBOARD: u16 = 0x0006;
    pub const USAGE_PAGE_CONSUMER: u16 = 0x000C;
    /// Reported when the backend cannot read the report descriptor
    pub const USAGE_PAGE_UNKNOWN: u16 = 0x0000;
    /// Start of the vendor-defined usage page range
    pub const USAGE_PAGE_VENDOR_MIN: u16 = 0xFF00;
    /// USB interface carrying the vendor collection, used when the usage
    /// page is unknown
    pub const INTERFACE_VENDOR: i32 = 1;
}

/// What an enumerated HID interface is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceRole {
    /// Boot keyboard (usage page 0x0001, usage 0x0006)
    Keyboard,
    /// Media keys (usage page 0x000C)
    Consumer,
    /// Vendor configuration endpoint, the only one that takes keymap reports
    VendorConfig,
    Other,
}

impl InterfaceRole {
    /// Classify an interface from its usage and interface number.
    ///
    /// Keyboard and consumer collections are never vendor config, whatever
    /// interface they sit on. The interface number only decides when the
    /// backend reports no usage page at all.
    pub fn classify(usage_page: u16, usage: u16, interface_number: i32) -> Self {
        if usage_page == device::USAGE_PAGE_GENERIC_DESKTOP && usage == device::USAGE_KEYBOARD {
            Self::Keyboard
        } else if usage_page == device::USAGE_PAGE_CONSUMER {
            Self::Consumer
        } else if usage_page >= device::USAGE_PAGE_VENDOR_MIN {
            Self::VendorConfig
        } else if usage_page == device::USAGE_PAGE_UNKNOWN
            && interface_number == device::INTERFACE_VENDOR
        {
            Self::VendorConfig
        } else {
            Self::Other
        }
    }

    pub fn of(descriptor: &DeviceDescriptor) -> Self {
        Self::classify(
            descriptor.usage_page,
            descriptor.usage,
            descriptor.interface_number,
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyboard => "keyboard",
            Self::Consumer => "consumer",
            Self::VendorConfig => "vendor-config",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for InterfaceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Check if an interface belongs to an Air75
pub fn is_air75(descriptor: &DeviceDescriptor) -> bool {
    descriptor.vid == device::VENDOR_ID && descriptor.pid == device::PRODUCT_ID
}

/// Pick the vendor configuration interface from a set of enumerated
/// interfaces. The first qualifying entry in iteration order wins.
pub fn find_in<I>(interfaces: I) -> Option<DeviceDescriptor>
where
    I: IntoIterator<Item = DeviceDescriptor>,
{
    interfaces.into_iter().find(|d| {
        if !is_air75(d) {
            return false;
        }
        let role = InterfaceRole::of(d);
        debug!(
            "Air75 interface {} page=0x{:04X} usage=0x{:04X} role={} path={}",
            d.interface_number, d.usage_page, d.usage, role, d.path
        );
        role == InterfaceRole::VendorConfig
    })
}

/// HID enumeration of Air75 interfaces
pub struct HidDiscovery {
    api: HidApi,
}

impl HidDiscovery {
    /// Initialise the HID library and enumerate devices
    pub fn new() -> Result<Self, TransportError> {
        let api = HidApi::new()?;
        Ok(Self { api })
    }

    fn descriptors(&self) -> impl Iterator<Item = DeviceDescriptor> + '_ {
        self.api.device_list().map(DeviceDescriptor::from)
    }

    /// Every interface of every connected Air75, with its role
    pub fn list(&self) -> Vec<(DeviceDescriptor, InterfaceRole)> {
        let interfaces: Vec<_> = self
            .descriptors()
            .filter(is_air75)
            .map(|d| {
                let role = InterfaceRole::of(&d);
                (d, role)
            })
            .collect();
        info!("Found {} Air75 interfaces", interfaces.len());
        interfaces
    }

    /// The vendor configuration interface of the first connected Air75.
    ///
    /// `None` means no keyboard is connected; that is not an error here.
    pub fn find(&self) -> Option<DeviceDescriptor> {
        let found = find_in(self.descriptors());
        match &found {
            Some(d) => info!("Selected Air75 vendor interface at {}", d.path),
            None => debug!("No Air75 vendor interface found"),
        }
        found
    }
}

/// Enumerate HID devices and return the Air75 vendor interface, if any
pub fn find() -> Result<Option<DeviceDescriptor>, TransportError> {
    Ok(HidDiscovery::new()?.find())
}

/// Enumerate every Air75 interface with its role
pub fn list() -> Result<Vec<(DeviceDescriptor, InterfaceRole)>, TransportError> {
    Ok(HidDiscovery::new()?.list())
}
