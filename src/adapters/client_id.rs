//! Broker client identity.
//!
//! Every boot generates a fresh identity `"<prefix>-<SUFFIX>"`, where
//! SUFFIX is exactly 10 random uppercase A–Z letters.  A per-boot random
//! identity keeps a quickly rebooting device from colliding with its own
//! stale broker session.

/// `"<prefix>-XXXXXXXXXX"`; prefixes are short config strings.
pub type ClientIdString = heapless::String<48>;

/// Length of the random identity suffix.
pub const SUFFIX_LEN: usize = 10;

/// Hardware RNG on the device.
#[cfg(target_os = "espidf")]
fn random_u32() -> u32 {
    unsafe { esp_idf_svc::sys::esp_random() }
}

/// Host stand-in for the hardware RNG.
#[cfg(not(target_os = "espidf"))]
fn random_u32() -> u32 {
    rand::random::<u32>()
}

/// One uniform letter in `A..=Z`.
///
/// Rejection sampling over 5 bits keeps the distribution uniform across
/// the 26 letters.
fn random_letter() -> char {
    loop {
        let v = random_u32() & 0x1F;
        if v < 26 {
            return char::from(b'A' + v as u8);
        }
    }
}

/// `SUFFIX_LEN` random uppercase letters.
pub fn random_suffix() -> heapless::String<SUFFIX_LEN> {
    let mut s = heapless::String::new();
    for _ in 0..SUFFIX_LEN {
        let _ = s.push(random_letter());
    }
    s
}

/// Full client identity for the broker session.
pub fn client_id(prefix: &str) -> ClientIdString {
    use core::fmt::Write;
    let mut id = ClientIdString::new();
    let _ = write!(id, "{}-{}", prefix, random_suffix());
    id
}
