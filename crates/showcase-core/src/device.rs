use crate::constants::MOBILE_CONTENT_CLASS;

/// Device class detected once at setup; never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    MobileOrTablet,
    Desktop,
}

impl DeviceClass {
    #[inline]
    pub fn from_mobile_flag(is_mobile_or_tablet: bool) -> Self {
        if is_mobile_or_tablet {
            DeviceClass::MobileOrTablet
        } else {
            DeviceClass::Desktop
        }
    }

    #[inline]
    pub fn is_mobile(self) -> bool {
        self == DeviceClass::MobileOrTablet
    }

    /// Select the literal for this device from a `[desktop, mobile]` pair.
    #[inline]
    pub fn pick<T: Copy>(self, variants: [T; 2]) -> T {
        variants[self.is_mobile() as usize]
    }

    /// Class applied to the external content container, if any.
    pub fn content_class(self) -> Option<&'static str> {
        self.is_mobile().then_some(MOBILE_CONTENT_CLASS)
    }
}
