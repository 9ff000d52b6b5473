use std::{cell::RefCell, fmt::Display, sync::OnceLock};

/// Device kind selected when neither [`set_device`] nor [`DEVICE_ENV_VAR`] say otherwise.
pub const DEFAULT_DEVICE_KIND: &str = "CPU";

/// Environment variable holding the process default device, as `KIND` or `KIND:ID`.
pub const DEVICE_ENV_VAR: &str = "NTTKIT_DEVICE";

/// Identifies a backend (by `kind`, the registry key) and an instance of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Device {
    kind: String,
    id: u32,
}

impl Device {
    pub fn new(kind: impl Into<String>, id: u32) -> Self {
        Self { kind: kind.into(), id }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Parses `KIND` or `KIND:ID`. A malformed id falls back to `0`.
    pub fn parse(spec: &str) -> Self {
        match spec.trim().split_once(':') {
            Some((kind, id)) => {
                let id: u32 = id.parse().unwrap_or_else(|_| {
                    tracing::warn!(target: "nttkit", spec, "malformed device id, using 0");
                    0
                });
                Device::new(kind, id)
            }
            None => Device::new(spec.trim(), 0),
        }
    }
}

impl Default for Device {
    fn default() -> Self {
        Device::new(DEFAULT_DEVICE_KIND, 0)
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

thread_local! {
    static ACTIVE_DEVICE: RefCell<Option<Device>> = const { RefCell::new(None) };
}

/// Process default device, read once from [`DEVICE_ENV_VAR`].
pub fn default_device() -> &'static Device {
    static DEFAULT: OnceLock<Device> = OnceLock::new();
    DEFAULT.get_or_init(|| match std::env::var(DEVICE_ENV_VAR) {
        Ok(spec) if !spec.trim().is_empty() => Device::parse(&spec),
        _ => Device::default(),
    })
}

/// Selects the device used by boundary calls made from the current thread.
pub fn set_device(device: &Device) {
    tracing::debug!(target: "nttkit", %device, "active device set");
    ACTIVE_DEVICE.with(|slot| *slot.borrow_mut() = Some(device.clone()));
}

/// Reverts the current thread to the process default device.
pub fn reset_device() {
    ACTIVE_DEVICE.with(|slot| slot.borrow_mut().take());
}

pub fn active_device() -> Device {
    ACTIVE_DEVICE.with(|slot| slot.borrow().clone()).unwrap_or_else(|| default_device().clone())
}

#[cfg(test)]
mod tests {
    use super::{Device, active_device, reset_device, set_device};

    #[test]
    fn parse() {
        assert_eq!(Device::parse("CPU_PAR:3"), Device::new("CPU_PAR", 3));
        assert_eq!(Device::parse(" CPU "), Device::new("CPU", 0));
        assert_eq!(Device::parse("GPU:x"), Device::new("GPU", 0));
    }

    #[test]
    fn active_device_is_thread_local() {
        set_device(&Device::new("CPU_PAR", 0));
        assert_eq!(active_device().kind(), "CPU_PAR");
        std::thread::spawn(|| {
            assert_ne!(active_device(), Device::new("CPU_PAR", 0));
        })
        .join()
        .unwrap();
        reset_device();
        assert_ne!(active_device(), Device::new("CPU_PAR", 0));
    }
}
